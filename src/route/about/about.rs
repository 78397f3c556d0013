use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::ApiError, server_error, state::ApiState};

pub const ABOUT_MESSAGE: &str = "Books API on axum and MongoDB";

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AboutResponse {
    #[schema(value_type = String)]
    pub message: &'static str,
    pub total_books: u64,
}

impl IntoResponse for AboutResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/about",
    tag = "about",
    responses(
        (status = 200, description = "Service message and number of stored books", body = AboutResponse),
        (status = 500, description = "Store failure", body = crate::error::ApiErrorResponse),
    )
)]
pub async fn about(State(state): State<ApiState>) -> Result<AboutResponse, ApiError> {
    let total_books = state
        .books()
        .count()
        .await
        .map_err(server_error!(state, "Failed to count books"))?;

    Ok(AboutResponse {
        message: ABOUT_MESSAGE,
        total_books,
    })
}
