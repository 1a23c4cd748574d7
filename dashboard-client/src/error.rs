//! Error types for the dashboard client
//!
//! Uses thiserror for ergonomic error definitions.
//! Errors fall into two groups: transport/HTTP failures and validation
//! failures. Nothing here retries.

use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Dashboard client errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Identity provider errors, shown to the user verbatim
    #[error("{0}")]
    Auth(String),

    /// Action requires a signed-in user
    #[error("Not signed in")]
    NotSignedIn,

    /// Non-2xx response from the dashboard API
    #[error("API Error: {status} {status_text} - {body}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input validation errors (form fields, trade parameters)
    #[error("{0}")]
    Validation(String),

    /// Sell value larger than the portfolio
    #[error(
        "Cannot sell. Trade value ({}) exceeds portfolio value ({}).",
        usd(.required),
        usd(.available)
    )]
    InsufficientFunds { required: f64, available: f64 },
}

impl DashboardError {
    /// Validation failures come from local checks, not from the network
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DashboardError::Validation(_) | DashboardError::InsufficientFunds { .. }
        )
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Http(err.to_string())
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn usd(value: &f64) -> String {
    crate::render::format::usd(*value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::InsufficientFunds {
            required: 5000.0,
            available: 1000.0,
        };
        assert_eq!(
            err.to_string(),
            "Cannot sell. Trade value ($5,000.00) exceeds portfolio value ($1,000.00)."
        );
    }

    #[test]
    fn test_api_error_carries_status_and_body() {
        let err = DashboardError::Api {
            status: 503,
            status_text: "Service Unavailable".into(),
            body: "upstream down".into(),
        };
        assert_eq!(
            err.to_string(),
            "API Error: 503 Service Unavailable - upstream down"
        );
        assert!(!err.is_validation());
    }

    #[test]
    fn test_auth_error_is_verbatim() {
        let err = DashboardError::Auth("INVALID_LOGIN_CREDENTIALS".into());
        assert_eq!(err.to_string(), "INVALID_LOGIN_CREDENTIALS");
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(matches!(err, DashboardError::Json(_)));
    }
}
