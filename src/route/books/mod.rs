use schemars::JsonSchema;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{ApiError, ErrorVerbosityProvider, NotFoundError},
    state::ApiState,
    types::book::{BookPatch, NewBook},
};

pub mod app;
pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod update_book;

/// Body of `POST /books`.
///
/// Missing `title` or `author` deserialize to an empty string and are rejected by validation.
#[derive(Debug, Default, Deserialize, JsonSchema, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
    pub topic: Option<String>,
    pub format: Option<String>,
    pub publication_year: Option<i32>,
}

impl From<CreateBookRequest> for NewBook {
    fn from(request: CreateBookRequest) -> Self {
        NewBook {
            title: request.title,
            author: request.author,
            topic: request.topic,
            format: request.format,
            publication_year: request.publication_year,
        }
    }
}

/// Body of `PUT /books/{id}`. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, JsonSchema, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: Option<String>,
    pub topic: Option<String>,
    pub format: Option<String>,
    pub publication_year: Option<i32>,
}

impl From<UpdateBookRequest> for BookPatch {
    fn from(request: UpdateBookRequest) -> Self {
        BookPatch {
            title: request.title,
            author: request.author,
            topic: request.topic,
            format: request.format,
            publication_year: request.publication_year,
        }
    }
}

fn book_not_found(state: &ApiState) -> ApiError {
    NotFoundError::book(state.error_verbosity()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_requires_title_and_author() {
        let request: CreateBookRequest =
            serde_json::from_value(serde_json::json!({ "topic": "History" })).unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("author"));
    }

    #[test]
    fn update_request_allows_absent_fields_but_not_empty_ones() {
        assert!(UpdateBookRequest::default().validate().is_ok());

        let request = UpdateBookRequest {
            author: Some(String::new()),
            ..Default::default()
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn update_request_reads_camel_case_fields() {
        let request: UpdateBookRequest =
            serde_json::from_value(serde_json::json!({ "publicationYear": 1851 })).unwrap();

        let patch = BookPatch::from(request);

        assert_eq!(patch.publication_year, Some(1851));
        assert_eq!(patch.title, None);
    }
}
