//! Error taxonomy for BaseLinker connector calls.
//!
//! The split drives the batch policy in [`crate::editor`]: a rejected token
//! can never succeed on a later row, so it is fatal for the whole batch,
//! while everything else stays contained to the row that hit it.

use thiserror::Error;

use fieldhand_core::FailureKind;

/// Errors that can occur when interacting with the BaseLinker API.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport failed before a usable response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Non-success HTTP status without a vendor error envelope.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The vendor rejected the API token.
    #[error("Unauthorized: {0}")]
    Auth(String),

    /// Rate limited by BaseLinker.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The vendor rejected the request parameters.
    #[error("Validation error ({code}): {message}")]
    Validation { code: String, message: String },
}

impl Error {
    /// Whether this error invalidates the whole batch rather than one row.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// The per-row failure class this error maps to.
    ///
    /// Fatal errors have no row class; callers abort the batch instead of
    /// recording them.
    #[must_use]
    pub const fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Auth(_) => None,
            Self::Validation { .. } => Some(FailureKind::Validation),
            Self::RateLimited(_) => Some(FailureKind::RateLimited),
            Self::Http(_) | Self::Parse(_) | Self::Api { .. } => Some(FailureKind::Transport),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Api {
            status: 500,
            message: "internal error".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - internal error");

        let err = Error::Auth("Invalid API key".to_string());
        assert_eq!(err.to_string(), "Unauthorized: Invalid API key");

        let err = Error::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");

        let err = Error::Validation {
            code: "ERROR_FIELD".to_string(),
            message: "bad value".to_string(),
        };
        assert_eq!(err.to_string(), "Validation error (ERROR_FIELD): bad value");
    }

    #[test]
    fn test_only_auth_is_fatal() {
        assert!(Error::Auth("bad token".to_string()).is_fatal());
        assert!(!Error::RateLimited(30).is_fatal());
        assert!(
            !Error::Validation {
                code: "X".to_string(),
                message: "y".to_string()
            }
            .is_fatal()
        );
        assert!(
            !Error::Api {
                status: 502,
                message: "gateway".to_string()
            }
            .is_fatal()
        );
    }

    #[test]
    fn test_failure_kind_mapping() {
        assert_eq!(Error::Auth(String::new()).failure_kind(), None);
        assert_eq!(
            Error::RateLimited(60).failure_kind(),
            Some(FailureKind::RateLimited)
        );
        assert_eq!(
            Error::Validation {
                code: String::new(),
                message: String::new()
            }
            .failure_kind(),
            Some(FailureKind::Validation)
        );
        assert_eq!(
            Error::Api {
                status: 500,
                message: String::new()
            }
            .failure_kind(),
            Some(FailureKind::Transport)
        );
    }
}
