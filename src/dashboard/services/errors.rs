//! # API Errors
//!
//! Failures of calls to the backend, classified the way the controllers
//! react to them.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure, no response received
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response with a non-success status
    #[error("server responded with {status}")]
    Status { status: StatusCode, body: String },

    /// Success status the caller does not accept (e.g. 204 on submit)
    #[error("unexpected response status {0}")]
    UnexpectedStatus(StatusCode),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot read attachment {}: {source}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid base url '{0}'")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Status and body of a rejected request, if a response was received
    pub fn rejection(&self) -> Option<(StatusCode, &str)> {
        match self {
            ApiError::Status { status, body } => Some((*status, body.as_str())),
            _ => None,
        }
    }

    pub fn is_bad_request(&self) -> bool {
        matches!(self.rejection(), Some((StatusCode::BAD_REQUEST, _)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_should_expose_its_body() {
        let error = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            body: r#"{"error":"x"}"#.to_string(),
        };

        assert!(error.is_bad_request());
        assert_eq!(error.rejection(), Some((StatusCode::BAD_REQUEST, r#"{"error":"x"}"#)));
    }

    #[test]
    fn other_failures_should_not_be_bad_requests() {
        let server = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        };
        let unexpected = ApiError::UnexpectedStatus(StatusCode::NO_CONTENT);

        assert!(!server.is_bad_request());
        assert!(!unexpected.is_bad_request());
        assert!(unexpected.rejection().is_none());
    }
}
