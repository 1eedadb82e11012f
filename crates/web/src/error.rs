//! Error handling for the web front end.
//!
//! Handlers return `AppError`, which renders as an HTTP response without
//! leaking connector internals to the browser.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Top-level error type for request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// A BaseLinker call failed while serving the request.
    #[error("BaseLinker error: {0}")]
    Baselinker(#[from] fieldhand_baselinker::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Baselinker(err) => {
                tracing::error!(error = %err, "BaseLinker call failed");
                if err.is_fatal() {
                    (StatusCode::BAD_GATEWAY, "BaseLinker rejected the API token")
                } else {
                    (StatusCode::BAD_GATEWAY, "External service error")
                }
            }
        };

        (status, message).into_response()
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    fn response_for(err: AppError) -> Response {
        err.into_response()
    }

    #[test]
    fn test_vendor_error_maps_to_bad_gateway() {
        let err = AppError::Baselinker(fieldhand_baselinker::Error::RateLimited(60));
        let response = response_for(err);
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_auth_error_maps_to_bad_gateway() {
        let err =
            AppError::Baselinker(fieldhand_baselinker::Error::Auth("bad token".to_string()));
        let response = response_for(err);
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_display_includes_source() {
        let err = AppError::Baselinker(fieldhand_baselinker::Error::Api {
            status: 500,
            message: "boom".to_string(),
        });
        assert!(err.to_string().contains("boom"));
    }
}
