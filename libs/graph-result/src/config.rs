use serde::Deserialize;

use crate::error::ConfigError;

/// What to do with a column that no record field is tagged for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPolicy {
    /// Skip it; the record may cover a subset of the columns.
    #[default]
    Ignore,
    /// Fail the scan with `ScanError::UnknownColumn`.
    Reject,
}

/// Scanner configuration — parsed from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScannerConfig {
    /// Handling of unmatched columns.
    pub unknown_columns: ColumnPolicy,

    /// Separator between the binding key and its modifiers in a field tag.
    pub tag_separator: char,

    /// Tag key that excludes a field from binding.
    pub exclude_sentinel: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            unknown_columns: ColumnPolicy::Ignore,
            tag_separator: ',',
            exclude_sentinel: "-".to_string(),
        }
    }
}

impl ScannerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }
}
