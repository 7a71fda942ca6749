//! Error types for the catalog client

use reqwest::StatusCode;
use thiserror::Error;

/// Error classification, one code per way a catalog call can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorKind {
    Network = 1,
    NotFound = 2,
    Rejected = 3,
    Server = 4,
    MalformedResponse = 5,
    Validation = 6,
    Config = 7,
}

/// Main client error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Network(_) => ErrorKind::Network,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Rejected { .. } => ErrorKind::Rejected,
            AppError::Server { .. } => ErrorKind::Server,
            AppError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Config(_) => ErrorKind::Config,
        }
    }

    /// Build the error for a non-2xx response. `detail` is the server's
    /// `{detail}` message when the body carried one.
    pub fn from_status(status: StatusCode, detail: Option<String>) -> Self {
        let detail = detail.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected status")
                .to_string()
        });

        if status == StatusCode::NOT_FOUND {
            AppError::NotFound(detail)
        } else if status.is_client_error() {
            AppError::Rejected {
                status: status.as_u16(),
                detail,
            }
        } else {
            AppError::Server {
                status: status.as_u16(),
                detail,
            }
        }
    }

    /// Message meant for the person using the client
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(msg) => format!("Network error: {}", msg),
            AppError::NotFound(_) => "Book not found".to_string(),
            AppError::Rejected { detail, .. } => detail.clone(),
            AppError::Server { detail, .. } => detail.clone(),
            AppError::MalformedResponse(_) => {
                "Unexpected response from the catalog server".to_string()
            }
            AppError::Validation(msg) => msg.clone(),
            AppError::Config(msg) => format!("Configuration error: {}", msg),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::MalformedResponse(e.to_string())
        } else {
            AppError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::MalformedResponse(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid value for {}", field),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

/// Result type alias for client operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(
            AppError::from_status(StatusCode::NOT_FOUND, Some("Book with ISBN 1 not found".into())).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            AppError::from_status(StatusCode::BAD_REQUEST, None),
            AppError::Rejected {
                status: 400,
                detail: "Bad Request".to_string()
            }
        );
        assert_eq!(
            AppError::from_status(StatusCode::INTERNAL_SERVER_ERROR, Some("Failed to retrieve books".into())).kind(),
            ErrorKind::Server
        );
    }

    #[test]
    fn test_user_message_keeps_server_detail() {
        let err = AppError::from_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some("An unexpected error occurred while retrieving the book".into()),
        );
        assert_eq!(
            err.user_message(),
            "An unexpected error occurred while retrieving the book"
        );
        assert_eq!(
            AppError::NotFound("whatever".into()).user_message(),
            "Book not found"
        );
    }
}
