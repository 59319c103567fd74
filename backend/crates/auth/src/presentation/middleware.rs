//! Presentation Middleware
//!
//! Rewrites error responses into the uniform envelope, filling in the
//! request path that `IntoResponse` cannot know.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::conversions::{ErrorBody, ErrorMeta};

/// Wrap error responses in the `{timestamp, statusCode, statusText,
/// message, requestPath}` envelope.
///
/// `AppError::into_response` stashes an [`ErrorMeta`] in the response
/// extensions; this middleware rebuilds the body with the path attached.
/// Responses without the marker pass through untouched.
pub async fn error_envelope(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();

    let mut response = next.run(req).await;

    if let Some(meta) = response.extensions_mut().remove::<ErrorMeta>() {
        let status = response.status();
        let body = ErrorBody::new(meta.kind, meta.message, Some(path));
        return (status, axum::Json(body)).into_response();
    }

    response
}
