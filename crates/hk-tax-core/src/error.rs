use thiserror::Error;

#[derive(Debug, Error)]
pub enum HkTaxError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for HkTaxError {
    fn from(e: serde_json::Error) -> Self {
        HkTaxError::SerializationError(e.to_string())
    }
}
