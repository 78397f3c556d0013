use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    error::ApiError,
    extractor::{body::ApiBody, validated::Validated},
    server_error,
    state::ApiState,
    types::book::Book,
};

use super::CreateBookRequest;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CreateBookResponse(pub Book);

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// Persists a new book. Identical bodies create distinct books.
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "The created book", body = Book),
        (status = 400, description = "Malformed body or missing required fields", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ApiErrorResponse),
    )
)]
pub async fn create_book(
    State(state): State<ApiState>,
    Validated(ApiBody(request)): Validated<ApiBody<CreateBookRequest>>,
) -> Result<CreateBookResponse, ApiError> {
    let book = state
        .books()
        .insert(request.into())
        .await
        .map_err(server_error!(state, "Adding new book failed"))?;

    tracing::info!(id = %book.id, "Book created");

    Ok(CreateBookResponse(book))
}
