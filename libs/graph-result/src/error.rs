use crate::record::FieldKind;
use crate::row::CellKind;

/// Failure of a typed or untyped read against a [`ResultSet`](crate::ResultSet).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError {
    /// No projection, no columns or no rows. Not a query failure.
    #[error("graph result: no data")]
    Empty,

    #[error("graph scan: destination must be {expected}, got {found}")]
    BindingShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("graph scan: cannot scan {found} column '{column}' into {expected} field {record}.{field}")]
    TypeMismatch {
        record: String,
        column: String,
        field: &'static str,
        expected: FieldKind,
        found: CellKind,
    },

    #[error("graph scan: unsupported field {record}.{field} of type {ty} (column '{column}')")]
    UnsupportedField {
        record: String,
        column: String,
        field: &'static str,
        ty: &'static str,
    },

    #[error("graph scan: column '{column}' has no field in {record}")]
    UnknownColumn { record: String, column: String },
}

impl ScanError {
    /// Add context to the error.
    ///
    /// For field-level variants the context is prepended to the record name;
    /// other variants are returned unchanged.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            ScanError::TypeMismatch { record, column, field, expected, found } => {
                ScanError::TypeMismatch {
                    record: format!("{ctx}: {record}"),
                    column,
                    field,
                    expected,
                    found,
                }
            }
            ScanError::UnsupportedField { record, column, field, ty } => {
                ScanError::UnsupportedField { record: format!("{ctx}: {record}"), column, field, ty }
            }
            ScanError::UnknownColumn { record, column } => {
                ScanError::UnknownColumn { record: format!("{ctx}: {record}"), column }
            }
            other => other,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ScanError::Empty)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config io error: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_prefixes_record() {
        let err = ScanError::TypeMismatch {
            record: "Pod".into(),
            column: "p".into(),
            field: "node",
            expected: FieldKind::Node,
            found: CellKind::Basic,
        }
        .with_context("row 2");
        assert_eq!(
            err.to_string(),
            "graph scan: cannot scan basic column 'p' into node field row 2: Pod.node"
        );
    }

    #[test]
    fn context_leaves_empty_alone() {
        assert_eq!(ScanError::Empty.with_context("row 0"), ScanError::Empty);
    }
}
