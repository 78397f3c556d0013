use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::{
    error::{ApiErrorResponse, FieldViolation},
    route::{
        about::about::AboutResponse,
        books::{
            delete_book::DeleteBookResponse, update_book::UpdateBookResponse, CreateBookRequest,
            UpdateBookRequest,
        },
    },
    state::ApiState,
    types::book::Book,
};

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::route::about::about::about,
        crate::route::books::list_books::list_books,
        crate::route::books::get_book::get_book,
        crate::route::books::create_book::create_book,
        crate::route::books::update_book::update_book,
        crate::route::books::delete_book::delete_book,
    ),
    components(schemas(
        Book,
        CreateBookRequest,
        UpdateBookRequest,
        UpdateBookResponse,
        DeleteBookResponse,
        AboutResponse,
        ApiErrorResponse,
        FieldViolation,
    )),
    tags(
        (name = "books", description = "CRUD operations on the books collection"),
        (name = "about", description = "Service information"),
    )
)]
pub struct ApiDoc;

pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new().route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
}
