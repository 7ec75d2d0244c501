//! Error types for Coupon Hub

use thiserror::Error;

/// Result type alias for Coupon Hub operations
pub type Result<T> = std::result::Result<T, CouponHubError>;

/// Main error type for Coupon Hub
#[derive(Error, Debug)]
pub enum CouponHubError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Coupon not found: {0}")]
    NotFound(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CouponHubError {
    /// True for errors caused by the caller's input, not the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CouponHubError::NotFound(_)
                | CouponHubError::MissingFields(_)
                | CouponHubError::InvalidInput(_)
                | CouponHubError::Unauthorized(_)
        )
    }

    /// Get error code for MCP protocol
    pub fn code(&self) -> i64 {
        match self {
            CouponHubError::NotFound(_) => -32001,
            CouponHubError::MissingFields(_) => -32602,
            CouponHubError::InvalidInput(_) => -32602,
            CouponHubError::Unauthorized(_) => -32003,
            _ => -32000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message() {
        let err = CouponHubError::MissingFields(vec!["title", "merchantName"]);
        assert_eq!(
            err.to_string(),
            "Missing required fields: title, merchantName"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(CouponHubError::NotFound("x".to_string()).is_client_error());
        assert!(CouponHubError::MissingFields(vec!["title"]).is_client_error());
        assert!(!CouponHubError::Storage("disk full".to_string()).is_client_error());
    }
}
