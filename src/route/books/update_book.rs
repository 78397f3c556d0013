use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    extractor::{body::ApiBody, path::BookIdPath, validated::Validated},
    server_error,
    state::ApiState,
    types::book::Book,
};

use super::UpdateBookRequest;

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateBookResponse {
    #[schema(value_type = String)]
    pub message: &'static str,
    pub book: Book,
}

impl IntoResponse for UpdateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Overwrites the supplied fields of a book. The id never changes.
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book id")),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "The updated book", body = UpdateBookResponse),
        (status = 400, description = "Malformed body or empty required fields", body = crate::error::ApiErrorResponse),
        (status = 404, description = "No book with this id", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ApiErrorResponse),
    )
)]
pub async fn update_book(
    State(state): State<ApiState>,
    BookIdPath(id): BookIdPath,
    Validated(ApiBody(request)): Validated<ApiBody<UpdateBookRequest>>,
) -> Result<UpdateBookResponse, ApiError> {
    let book = state
        .books()
        .update(id, request.into())
        .await
        .map_err(server_error!(state, "Failed to update book"))?
        .ok_or_else(|| super::book_not_found(&state))?;

    tracing::info!(%id, "Book updated");

    Ok(UpdateBookResponse {
        message: "Book updated successfully",
        book,
    })
}
