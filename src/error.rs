use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use derive_more::From;
use schemars::{schema_for, JsonSchema};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ErrorVerbosity {
    /// Server returns only the appropriate status code.
    StatusCode,
    /// Server returns only the message with the appropriate status code.
    Message,
    /// Server returns the message, the error details and the appropriate status code.
    Full,
}

impl ErrorVerbosity {
    pub fn should_generate_message(&self) -> bool {
        matches!(self, ErrorVerbosity::Message | ErrorVerbosity::Full)
    }

    pub fn should_generate_error_reason(&self) -> bool {
        matches!(self, ErrorVerbosity::Full)
    }
}

pub trait ErrorVerbosityProvider {
    fn error_verbosity(&self) -> ErrorVerbosity;
}

/// Maps any error into an [`ApiError::InternalServerError`] with the given message.
///
/// ```ignore
/// state.books().list().await.map_err(server_error!(state, "Failed to fetch books"))?;
/// ```
#[macro_export]
macro_rules! server_error {
    ($state:expr, $message:expr) => {
        |err| {
            $crate::error::ApiError::from($crate::error::InternalServerError::from_generic_error(
                $crate::error::ErrorVerbosityProvider::error_verbosity(&$state),
                $message,
                err,
            ))
        }
    };
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Short description of what failed.
    #[schema(value_type = String)]
    error: &'static str,
    /// Detail reported by the store or the request parser.
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    /// Fields that failed validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    violations: Option<Vec<FieldViolation>>,
    /// JSON schema of the expected request body, rendered as YAML.
    #[serde(skip_serializing_if = "Option::is_none")]
    expected_schema: Option<String>,
}

impl ApiErrorResponse {
    fn message_only(error: &'static str) -> Self {
        ApiErrorResponse {
            error,
            details: None,
            violations: None,
            expected_schema: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

#[derive(Debug, From)]
/// API error
pub enum ApiError {
    /// Internal server error
    ///
    /// This error is returned when the store fails or an unexpected error occurs.
    InternalServerError(InternalServerError),
    /// Body error
    ///
    /// This error is returned when the body is not valid JSON or does not match the expected shape.
    Body(BodyError),
    /// Path error
    ///
    /// This error is returned when the path is not as expected.
    Path(PathError),
    /// Validation error
    ///
    /// This error is returned when the body is well-formed but violates field constraints.
    Validation(ValidationError),
    /// Method not allowed
    ///
    /// This error is returned when the method is not allowed.
    MethodNotAllowed(MethodNotAllowedError),
    /// Not found error
    ///
    /// This error is returned when the requested resource is not found.
    NotFound(NotFoundError),
}

impl ApiError {
    fn verbosity(&self) -> ErrorVerbosity {
        match self {
            ApiError::InternalServerError(err) => err.verbosity,
            ApiError::Body(err) => err.verbosity,
            ApiError::Path(err) => err.verbosity,
            ApiError::Validation(err) => err.verbosity,
            ApiError::MethodNotAllowed(err) => err.verbosity,
            ApiError::NotFound(err) => err.verbosity,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::InternalServerError(err) => err.message,
            ApiError::Body(_) => "Failed to parse request body",
            ApiError::Path(_) => "Failed to parse path parameters",
            ApiError::Validation(_) => "Book validation failed",
            ApiError::MethodNotAllowed(_) => "Method not allowed",
            ApiError::NotFound(err) => err.message,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Body(_) => StatusCode::BAD_REQUEST,
            ApiError::Path(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn into_body(self) -> ApiErrorResponse {
        let mut body = ApiErrorResponse::message_only(self.message());

        match self {
            ApiError::InternalServerError(err) => {
                body.details = err.internal_server_error;
            }
            ApiError::Body(err) => {
                body.details = err.body_error_reason;
                body.expected_schema = err.body_expected_schema;
            }
            ApiError::Path(err) => {
                body.details = err.path_error_reason;
            }
            ApiError::Validation(err) => {
                body.details = err.validation_error_reason;
                body.violations = err.violations;
            }
            ApiError::MethodNotAllowed(_) | ApiError::NotFound(_) => {}
        }

        body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        // Reasons are only captured for `Full` verbosity, so `Message` renders the message alone.
        match self.verbosity().should_generate_message() {
            false => status_code.into_response(),
            true => (status_code, Json(self.into_body())).into_response(),
        }
    }
}

#[derive(Debug)]
pub struct InternalServerError {
    verbosity: ErrorVerbosity,
    message: &'static str,
    internal_server_error: Option<String>,
}

impl InternalServerError {
    pub fn from_generic_error<E: Into<anyhow::Error>>(
        verbosity: ErrorVerbosity,
        message: &'static str,
        err: E,
    ) -> Self {
        let err: anyhow::Error = err.into();
        let err = format!("{err:#}");
        tracing::error!(%err, message, "Internal server error");

        let internal_server_error = verbosity.should_generate_error_reason().then_some(err);

        InternalServerError {
            verbosity,
            message,
            internal_server_error,
        }
    }
}

#[derive(Debug)]
pub struct BodyError {
    verbosity: ErrorVerbosity,
    body_error_reason: Option<String>,
    body_expected_schema: Option<String>,
}

impl BodyError {
    pub fn new(
        verbosity: ErrorVerbosity,
        body_error_reason: String,
        body_expected_schema: String,
    ) -> Self {
        let (body_error_reason, body_expected_schema) =
            match verbosity.should_generate_error_reason() {
                true => (Some(body_error_reason), Some(body_expected_schema)),
                false => (None, None),
            };

        BodyError {
            verbosity,
            body_error_reason,
            body_expected_schema,
        }
    }

    /// Builds the error for a rejected body, attaching the expected schema of `T` rendered as YAML.
    pub fn from_rejection<T: JsonSchema>(
        verbosity: ErrorVerbosity,
        body_error_reason: String,
    ) -> Result<Self, InternalServerError> {
        let body_expected_schema = serde_yaml::to_string(&schema_for!(T)).map_err(|err| {
            InternalServerError::from_generic_error(
                verbosity,
                "Failed to render the expected body schema",
                err,
            )
        })?;

        Ok(Self::new(verbosity, body_error_reason, body_expected_schema))
    }
}

#[derive(Debug)]
pub struct PathError {
    verbosity: ErrorVerbosity,
    path_error_reason: Option<String>,
}

impl PathError {
    pub fn new(verbosity: ErrorVerbosity, path_error_reason: String) -> Self {
        let path_error_reason = verbosity
            .should_generate_error_reason()
            .then_some(path_error_reason);

        PathError {
            verbosity,
            path_error_reason,
        }
    }

    pub fn from_path_rejection(verbosity: ErrorVerbosity, path_rejection: PathRejection) -> Self {
        Self::new(verbosity, path_rejection.body_text())
    }
}

#[derive(Debug)]
pub struct ValidationError {
    verbosity: ErrorVerbosity,
    validation_error_reason: Option<String>,
    violations: Option<Vec<FieldViolation>>,
}

impl ValidationError {
    pub fn new(verbosity: ErrorVerbosity, violations: Vec<FieldViolation>) -> Self {
        let (validation_error_reason, violations) = match verbosity.should_generate_error_reason()
        {
            true => {
                let reason = violations
                    .iter()
                    .map(|violation| format!("{}: {}", violation.field, violation.message))
                    .collect::<Vec<_>>()
                    .join(", ");

                (Some(reason), Some(violations))
            }
            false => (None, None),
        };

        ValidationError {
            verbosity,
            validation_error_reason,
            violations,
        }
    }

    /// Flattens [`validator::ValidationErrors`] into one violation per failed rule, sorted by field.
    pub fn from_validation_errors(
        verbosity: ErrorVerbosity,
        errors: validator::ValidationErrors,
    ) -> Self {
        let mut violations: Vec<FieldViolation> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let field = field.to_string();

                errors.iter().map(move |error| FieldViolation {
                    field: field.clone(),
                    message: error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| error.code.to_string()),
                })
            })
            .collect();

        violations.sort_by(|a, b| a.field.cmp(&b.field));

        Self::new(verbosity, violations)
    }
}

#[derive(Debug)]
pub struct MethodNotAllowedError {
    verbosity: ErrorVerbosity,
}

impl MethodNotAllowedError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        MethodNotAllowedError { verbosity }
    }
}

#[derive(Debug)]
pub struct NotFoundError {
    verbosity: ErrorVerbosity,
    message: &'static str,
}

impl NotFoundError {
    pub fn new(verbosity: ErrorVerbosity, message: &'static str) -> Self {
        NotFoundError { verbosity, message }
    }

    pub fn resource(verbosity: ErrorVerbosity) -> Self {
        Self::new(verbosity, "The requested resource was not found")
    }

    pub fn book(verbosity: ErrorVerbosity) -> Self {
        Self::new(verbosity, "Book not found")
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn render(error: ApiError) -> (StatusCode, Vec<u8>) {
        let response = error.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        (status, body.to_vec())
    }

    #[tokio::test]
    async fn full_verbosity_includes_details() {
        let error = InternalServerError::from_generic_error(
            ErrorVerbosity::Full,
            "Failed to fetch books",
            anyhow::anyhow!("connection refused"),
        );

        let (status, body) = render(error.into()).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Failed to fetch books");
        assert_eq!(json["details"], "connection refused");
    }

    #[tokio::test]
    async fn message_verbosity_hides_details() {
        let error = ValidationError::new(
            ErrorVerbosity::Message,
            vec![FieldViolation {
                field: "title".to_string(),
                message: "title is required".to_string(),
            }],
        );

        let (status, body) = render(error.into()).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({ "error": "Book validation failed" }));
    }

    #[tokio::test]
    async fn status_code_verbosity_has_empty_body() {
        let error = NotFoundError::resource(ErrorVerbosity::StatusCode);

        let (status, body) = render(error.into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[test]
    fn validation_reason_joins_violations() {
        let error = ValidationError::new(
            ErrorVerbosity::Full,
            vec![
                FieldViolation {
                    field: "author".to_string(),
                    message: "author is required".to_string(),
                },
                FieldViolation {
                    field: "title".to_string(),
                    message: "title is required".to_string(),
                },
            ],
        );

        assert_eq!(
            error.validation_error_reason.as_deref(),
            Some("author: author is required, title: title is required")
        );
    }
}
