//! Error types for FastNetMon appliance operations.
//!
//! This module provides the error taxonomy for talking to a FastNetMon
//! Advanced appliance: transport-level failures, semantic failures reported
//! through the response envelope, and locally derived lookup failures.

use thiserror::Error;

/// Main error type for appliance operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// HTTP request completed with a non-success status code.
    #[error("Transport error {status}: {body}")]
    Transport {
        /// HTTP status code returned by the appliance
        status: u16,
        /// Raw response body, unparsed
        body: String,
    },

    /// The appliance reported a failure in its response envelope.
    ///
    /// The message is the appliance's `error_text` verbatim.
    #[error("Appliance error: {0}")]
    Appliance(String),

    /// A single-item query returned an empty result set.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body could not be decoded as the expected envelope shape.
    #[error("Failed to parse appliance response: {0}")]
    Parse(String),

    /// Appliance is unreachable at the transport layer.
    #[error("Appliance unreachable: {0}")]
    Unreachable(String),

    /// Operation timed out.
    #[error("Timeout talking to appliance: {0}")]
    Timeout(String),

    /// HTTP request failed before a status code was available.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid UUID format.
    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    /// Invalid endpoint URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for appliance operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "TRANSPORT_ERROR",
            Self::Appliance(_) => "APPLIANCE_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Parse(_) => "PARSE_ERROR",
            Self::Unreachable(_) => "UNREACHABLE",
            Self::Timeout(_) => "TIMEOUT",
            Self::Http(_) => "HTTP_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidUuid(_) => "INVALID_UUID",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// Returns true if the failure was reported by the appliance itself
    /// rather than produced by this client or the transport.
    #[must_use]
    pub const fn is_appliance_fault(&self) -> bool {
        matches!(self, Self::Appliance(_))
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Unreachable(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Self {
        Self::InvalidUuid(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::Transport {
                status: 500,
                body: "boom".to_string()
            }
            .error_code(),
            "TRANSPORT_ERROR"
        );
        assert_eq!(
            Error::Appliance("bad option".to_string()).error_code(),
            "APPLIANCE_ERROR"
        );
        assert_eq!(
            Error::NotFound("grp1".to_string()).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(Error::Parse("eof".to_string()).error_code(), "PARSE_ERROR");
        assert_eq!(
            Error::Unreachable("refused".to_string()).error_code(),
            "UNREACHABLE"
        );
        assert_eq!(Error::Timeout("30s".to_string()).error_code(), "TIMEOUT");
        assert_eq!(Error::Http("test".to_string()).error_code(), "HTTP_ERROR");
        assert_eq!(
            Error::Config("test".to_string()).error_code(),
            "CONFIG_ERROR"
        );
        assert_eq!(
            Error::InvalidUuid("test".to_string()).error_code(),
            "INVALID_UUID"
        );
        assert_eq!(
            Error::InvalidEndpoint("test".to_string()).error_code(),
            "INVALID_ENDPOINT"
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::Transport {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "Transport error 401: unauthorized");

        let err = Error::Appliance("no such host group".to_string());
        assert_eq!(err.to_string(), "Appliance error: no such host group");
    }

    #[test]
    fn test_is_appliance_fault() {
        assert!(Error::Appliance("bad option".to_string()).is_appliance_fault());
        assert!(!Error::NotFound("grp1".to_string()).is_appliance_fault());
        assert!(!Error::Transport {
            status: 404,
            body: String::new()
        }
        .is_appliance_fault());
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let fnm_err: Error = err.into();
        assert!(matches!(fnm_err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_from_uuid_error() {
        let err = uuid::Uuid::parse_str("not-a-uuid").unwrap_err();
        let fnm_err: Error = err.into();
        assert!(matches!(fnm_err, Error::InvalidUuid(_)));
        assert_eq!(fnm_err.error_code(), "INVALID_UUID");
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let fnm_err: Error = err.into();
        assert!(matches!(fnm_err, Error::Parse(_)));
    }

    #[test]
    fn test_error_clone_and_eq() {
        let err = Error::NotFound("grp1".to_string());
        let cloned = err.clone();
        assert_eq!(err, cloned);
        assert_ne!(err, Error::NotFound("grp2".to_string()));
    }
}
