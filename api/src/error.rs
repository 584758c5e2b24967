//! API error responses
//!
//! Every failure leaves the server as `{"error": "..."}` with a status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::any::Any;

use linkprobe_core::StoreError;

use crate::models::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// Detail is logged; the client only sees `message`.
    #[error("{message}: {detail}")]
    Internal { message: String, detail: String },
}

impl ApiError {
    pub fn internal(message: &str, detail: impl ToString) -> Self {
        ApiError::Internal {
            message: message.to_string(),
            detail: detail.to_string(),
        }
    }

    /// Map a store error for one request; `context` is the client-facing
    /// message for server-side failures.
    pub fn from_store(err: StoreError, context: &str) -> Self {
        match err {
            StoreError::NotFound(locale) => {
                ApiError::NotFound(format!("No report found for locale: {locale}"))
            }
            StoreError::InvalidLocale(_) => ApiError::BadRequest(err.to_string()),
            other => ApiError::internal(context, other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) => msg,
            ApiError::Internal { message, detail } => {
                tracing::error!("{}: {}", message, detail);
                message
            }
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Response for a panicking handler
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Error: handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "Internal server error".to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err = ApiError::from_store(StoreError::NotFound("en-IN".to_string()), "x");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "No report found for locale: en-IN");
    }

    #[test]
    fn test_store_io_maps_to_500_with_context() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ApiError::from_store(StoreError::Io(io), "Failed to read report");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, ApiError::Internal { ref message, .. } if message == "Failed to read report"));
    }

    #[test]
    fn test_invalid_locale_is_bad_request() {
        let err = ApiError::from_store(StoreError::InvalidLocale("../x".to_string()), "x");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
