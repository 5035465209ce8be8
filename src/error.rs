//! Crate-wide error type

use crate::sim::Vector;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the simulation kernel and its input boundary.
///
/// Gameplay outcomes (hitting a wall, falling in lava) are never errors;
/// they are level status transitions.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A value failed a shape check (e.g. JSON that is not a vector).
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeKind {
        /// What the caller required.
        expected: &'static str,
        /// Short description of what was actually supplied.
        found: String,
    },

    /// Actor boxes must have strictly positive extent on both axes.
    #[error("invalid actor size ({}, {}): both components must be positive", .0.x(), .0.y())]
    InvalidSize(Vector),

    /// A level plan contains a symbol that is neither terrain nor in the legend.
    #[error("unknown level symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol {
        /// Offending character.
        symbol: char,
        /// Zero-based row in the plan.
        row: usize,
        /// Zero-based column in the plan.
        col: usize,
    },

    /// Reading a level or settings file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings or actor JSON was malformed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Shorthand for a [`SimError::TypeKind`] describing a JSON value.
    pub fn type_kind(expected: &'static str, found: &serde_json::Value) -> Self {
        let found = match found {
            serde_json::Value::Null => "null".to_string(),
            serde_json::Value::Bool(_) => "boolean".to_string(),
            serde_json::Value::Number(_) => "number".to_string(),
            serde_json::Value::String(_) => "string".to_string(),
            serde_json::Value::Array(items) => format!("array of length {}", items.len()),
            serde_json::Value::Object(_) => "object".to_string(),
        };
        SimError::TypeKind { expected, found }
    }
}
