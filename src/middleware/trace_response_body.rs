use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, response::Parts},
    middleware::Next,
    response::Response,
};
use http_body_util::BodyExt;

use crate::error::{ApiError, ErrorVerbosityProvider, InternalServerError};

fn is_json(parts: &Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

/// Middlware to trace JSON response bodies.
///
/// Buffers every API response before sending it, only enabled with `--trace-response-body`.
/// Frontend files and other non-JSON responses are streamed through untouched.
pub async fn trace_response_body<S: ErrorVerbosityProvider>(
    State(state): State<S>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (parts, body) = next.run(req).await.into_parts();

    if !is_json(&parts) {
        return Ok(Response::from_parts(parts, body));
    }

    let bytes = body
        .collect()
        .await
        .map_err(|err| {
            InternalServerError::from_generic_error(
                state.error_verbosity(),
                "Failed to read the response body",
                err,
            )
        })?
        .to_bytes();

    tracing::trace!(
        status = %parts.status,
        body = %String::from_utf8_lossy(&bytes),
        "Response body"
    );

    Ok(Response::from_parts(parts, Body::from(bytes)))
}
