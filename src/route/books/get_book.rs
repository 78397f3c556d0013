use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    error::ApiError, extractor::path::BookIdPath, server_error, state::ApiState, types::book::Book,
};

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct GetBookResponse(pub Book);

impl IntoResponse for GetBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 404, description = "No book with this id", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ApiErrorResponse),
    )
)]
pub async fn get_book(
    State(state): State<ApiState>,
    BookIdPath(id): BookIdPath,
) -> Result<GetBookResponse, ApiError> {
    let book = state
        .books()
        .find_by_id(id)
        .await
        .map_err(server_error!(state, "Failed to fetch book"))?
        .ok_or_else(|| super::book_not_found(&state))?;

    Ok(GetBookResponse(book))
}
