use thiserror::Error;

#[derive(Debug, Error)]
pub enum WealthCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl WealthCalcError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        WealthCalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for WealthCalcError {
    fn from(e: serde_json::Error) -> Self {
        WealthCalcError::SerializationError(e.to_string())
    }
}
