//! API error types and response formatting.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fingerprint_core::ResolveError;
use serde::Serialize;

/// API error type that converts to appropriate HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Node, property or thumbnail not found.
    #[error("not found: {0}")]
    NotFound(#[from] ResolveError),
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
    /// Tells the caller to treat the miss as a redirectable status page.
    redirect: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::NotFound(err) => {
                tracing::debug!(node = %err.node_ref(), outcome = err.outcome(), "{err}");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "not_found",
                        message: err.to_string(),
                        redirect: true,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fingerprint_core::NodeRef;

    #[test]
    fn error_display_not_found() {
        let err = ApiError::NotFound(ResolveError::NodeNotFound {
            node_ref: NodeRef::new("workspace", "SpacesStore", "999"),
        });
        assert_eq!(
            err.to_string(),
            "not found: workspace://SpacesStore/999 does not exist"
        );
    }

    #[test]
    fn error_into_response_not_found() {
        let err = ApiError::NotFound(ResolveError::PropertyOrThumbnailNotFound {
            name: "doclib".to_string(),
            node_ref: NodeRef::new("workspace", "SpacesStore", "1"),
        });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_body_carries_redirect_flag() {
        let body = ErrorResponse {
            error: "not_found",
            message: "workspace://SpacesStore/1 does not exist".to_string(),
            redirect: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "not_found");
        assert_eq!(json["redirect"], true);
    }
}
