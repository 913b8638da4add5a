use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error fetching menu items: {message}")]
    MenuFetchError { message: String },

    #[error("No items selected for the order")]
    EmptyOrderError,

    #[error("Error saving order: {message}")]
    SubmissionError { message: String },

    #[error("Error fetching status for order {order_id}: {message}")]
    StatusFetchError { order_id: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

impl CartError {
    /// Message shown to the user when a workflow operation fails. Failures
    /// never propagate past the workflow boundary, so this is the whole
    /// user-visible surface of an error.
    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::MenuFetchError { .. } => "Error fetching menu items.".to_string(),
            CartError::EmptyOrderError => "No items selected for the order.".to_string(),
            CartError::SubmissionError { .. } => "Error saving order.".to_string(),
            CartError::StatusFetchError { .. } => "Error fetching order status.".to_string(),
            CartError::ConfigError { message } => format!("Configuration problem: {}", message),
            CartError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for '{}': {}", field, reason)
            }
            CartError::MissingConfigError { field } => {
                format!("Missing configuration: {}", field)
            }
            other => format!("Unexpected error: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        assert_eq!(
            CartError::EmptyOrderError.user_friendly_message(),
            "No items selected for the order."
        );

        let e = CartError::SubmissionError {
            message: "500 Internal Server Error".to_string(),
        };
        assert_eq!(e.user_friendly_message(), "Error saving order.");

        let e = CartError::MissingConfigError {
            field: "user_email".to_string(),
        };
        assert!(e.user_friendly_message().contains("user_email"));
    }
}
