use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::error::{ApiError, ErrorVerbosityProvider};

use super::{form::ApiForm, json::ApiJson, Extractor};

/// Extracts a request body by its `Content-Type`.
///
/// - no `Content-Type`: `T::default()`, the body is not read.
/// - `application/x-www-form-urlencoded`: [`ApiForm`].
/// - anything else: [`ApiJson`], which rejects non-JSON content types.
pub struct ApiBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiBody<T>
where
    T: DeserializeOwned + JsonSchema + Debug + Default + Send,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|value| value.to_str().unwrap_or_default().to_ascii_lowercase());

        match content_type {
            None => {
                tracing::trace!("No content type, using the default body");

                Ok(ApiBody(T::default()))
            }
            Some(content_type) if content_type.starts_with("application/x-www-form-urlencoded") => {
                let ApiForm(form) = ApiForm::<T>::from_request(req, state).await?;

                Ok(ApiBody(form))
            }
            Some(_) => {
                let ApiJson(json) = ApiJson::<T>::from_request(req, state).await?;

                Ok(ApiBody(json))
            }
        }
    }
}

impl<T> Extractor for ApiBody<T> {
    type Extracted = T;

    fn extracted(&self) -> &Self::Extracted {
        &self.0
    }
}
