use axum::{
    extract::{Request, State},
    http::{header::ALLOW, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::{ApiError, ErrorVerbosityProvider, MethodNotAllowedError};

/// Middleware to map axum's `MethodNotAllowed` response to our [`ApiError`].
///
/// The `Allow` header of the original response is kept.
pub async fn method_not_allowed<S: ErrorVerbosityProvider>(
    State(state): State<S>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let resp = next.run(req).await;

    if resp.status() != StatusCode::METHOD_NOT_ALLOWED {
        return resp;
    }

    tracing::debug!(%method, "Method not allowed");

    let allow = resp.headers().get(ALLOW).cloned();
    let mut error_resp =
        ApiError::from(MethodNotAllowedError::new(state.error_verbosity())).into_response();

    if let Some(allow) = allow {
        error_resp.headers_mut().insert(ALLOW, allow);
    }

    error_resp
}
