use std::fmt;

use serde::{Serialize, Serializer};

/// One basic query-output value.
///
/// Booleans and doubles travel as text and are not distinguished by the tag;
/// the accessor decides how the text is read.
///
/// `Unset` is the default: it behaves like `Nil` for every accessor except
/// [`Scalar::is_nil`], which reports `false` for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Scalar {
    #[default]
    Unset,
    Integer(i64),
    Nil,
    Text(String),
}

impl Scalar {
    /// Integer value narrowed to the platform width. Text is never parsed.
    pub fn int(&self) -> isize {
        match self {
            Scalar::Integer(v) => *v as isize,
            _ => 0,
        }
    }

    /// Nonzero integers and the exact text `"true"` are true.
    pub fn bool(&self) -> bool {
        match self {
            Scalar::Integer(v) => *v != 0,
            Scalar::Text(s) => s == "true",
            Scalar::Nil | Scalar::Unset => false,
        }
    }

    /// Float view; unparseable text yields `0.0`.
    pub fn float64(&self) -> f64 {
        match self {
            Scalar::Integer(v) => *v as f64,
            Scalar::Text(s) => s.parse().unwrap_or(0.0),
            Scalar::Nil | Scalar::Unset => 0.0,
        }
    }

    /// True only for an explicit `Nil`.
    pub fn is_nil(&self) -> bool {
        matches!(self, Scalar::Nil)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Scalar::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(v) => write!(f, "{v}"),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Nil | Scalar::Unset => Ok(()),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Integer(v) => serializer.serialize_i64(*v),
            Scalar::Text(s) => serializer.serialize_str(s),
            Scalar::Nil | Scalar::Unset => serializer.serialize_none(),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Integer(v)
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}
