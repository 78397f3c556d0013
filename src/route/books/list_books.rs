use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{error::ApiError, server_error, state::ApiState, types::book::Book};

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ListBooksResponse(pub Vec<Book>);

impl IntoResponse for ListBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Returns every book in the store's natural order.
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = [Book]),
        (status = 500, description = "Store failure", body = crate::error::ApiErrorResponse),
    )
)]
pub async fn list_books(State(state): State<ApiState>) -> Result<ListBooksResponse, ApiError> {
    let books = state
        .books()
        .list()
        .await
        .map_err(server_error!(state, "Failed to fetch books"))?;

    Ok(ListBooksResponse(books))
}
