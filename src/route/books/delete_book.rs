use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::ApiError, extractor::path::BookIdPath, server_error, state::ApiState};

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteBookResponse {
    #[schema(value_type = String)]
    pub message: &'static str,
}

impl IntoResponse for DeleteBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book was removed", body = DeleteBookResponse),
        (status = 404, description = "No book with this id", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ApiErrorResponse),
    )
)]
pub async fn delete_book(
    State(state): State<ApiState>,
    BookIdPath(id): BookIdPath,
) -> Result<DeleteBookResponse, ApiError> {
    state
        .books()
        .delete(id)
        .await
        .map_err(server_error!(state, "Failed to delete book"))?
        .ok_or_else(|| super::book_not_found(&state))?;

    tracing::info!(%id, "Book deleted");

    Ok(DeleteBookResponse {
        message: "Book deleted successfully",
    })
}
