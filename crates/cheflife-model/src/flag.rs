//! Truthy tri-state flags
//!
//! Allergen columns on imported master-ingredient rows are nominally
//! boolean but arrive as `true`, `"true"`, `"TRUE"` or `1` depending on the
//! spreadsheet that produced them. [`Flag`] normalizes that mess in one
//! place; everything else (including absent columns) is falsy.

use serde_json::Value;

/// Truthy interpretation of a loosely-typed scalar column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flag {
    /// The column is truthy
    Set,
    /// The column is falsy or absent
    #[default]
    Unset,
}

impl Flag {
    /// Interpret a raw JSON scalar.
    ///
    /// Truthy: boolean `true`, the string `"true"` (case-insensitive,
    /// trimmed), and the number `1` (integer or float). Everything else,
    /// including `null`, arrays and objects, is falsy.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let truthy = match value {
            Value::Bool(b) => *b,
            Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
            Value::Number(n) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
            _ => false,
        };
        if truthy {
            Self::Set
        } else {
            Self::Unset
        }
    }

    /// Interpret an optional scalar; absent is falsy
    #[inline]
    #[must_use]
    pub fn from_opt(value: Option<&Value>) -> Self {
        value.map_or(Self::Unset, Self::from_value)
    }

    /// Whether the flag is truthy
    #[inline]
    #[must_use]
    pub fn is_set(self) -> bool {
        matches!(self, Self::Set)
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value {
            Self::Set
        } else {
            Self::Unset
        }
    }
}
