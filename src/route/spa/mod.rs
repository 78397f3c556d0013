use axum::{
    extract::State,
    handler::Handler,
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Router,
};
use tower_http::services::ServeDir;

use crate::{
    error::{ApiError, ErrorVerbosityProvider, InternalServerError, NotFoundError},
    state::ApiState,
};

pub const PLACEHOLDER: &str =
    "Frontend build not found. Build the client and copy it into the static directory.";

/// Router serving the prebuilt single-page application for every request no other route claims.
///
/// Existing files under the static directory are served as-is. Anything else goes to [`spa_fallback`].
pub fn app(state: ApiState) -> Router<ApiState> {
    let serve_dir = ServeDir::new(state.static_dir())
        .call_fallback_on_method_not_allowed(true)
        .fallback(spa_fallback.with_state(state));

    Router::<ApiState>::new().fallback_service(serve_dir)
}

/// Unclaimed API paths and non-GET requests are reported as not found instead of returning the app.
fn is_api_request(method: &Method, path: &str) -> bool {
    let readable = method == Method::GET || method == Method::HEAD;

    !readable || path == "/books" || path.starts_with("/books/")
}

pub async fn spa_fallback(
    State(state): State<ApiState>,
    method: Method,
    uri: Uri,
) -> Result<Response, ApiError> {
    let verbosity = state.error_verbosity();

    if is_api_request(&method, uri.path()) {
        tracing::debug!(%method, %uri, "No route");

        return Err(NotFoundError::resource(verbosity).into());
    }

    let index = state.static_dir().join("index.html");

    match tokio::fs::read(&index).await {
        Ok(bytes) => Ok(Html(bytes).into_response()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %index.display(), "Frontend build not found");

            Ok((StatusCode::OK, PLACEHOLDER).into_response())
        }
        Err(err) => Err(InternalServerError::from_generic_error(
            verbosity,
            "Failed to load the frontend",
            err,
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_namespace_and_writes_never_reach_the_app() {
        assert!(is_api_request(&Method::GET, "/books/abc/extra"));
        assert!(is_api_request(&Method::GET, "/books"));
        assert!(is_api_request(&Method::POST, "/library"));

        assert!(!is_api_request(&Method::GET, "/"));
        assert!(!is_api_request(&Method::HEAD, "/library/42"));
        assert!(!is_api_request(&Method::GET, "/booksellers"));
    }
}
