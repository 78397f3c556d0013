use axum::{
    async_trait,
    extract::{Form as AxumForm, FromRequest, Request},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::error::{ApiError, BodyError, ErrorVerbosityProvider};

use super::Extractor;

/// A Wrapper around [`axum::extract::Form`] that rejects with an [`ApiError`].
///
/// Extracts an `application/x-www-form-urlencoded` body, as sent by plain HTML forms.
pub struct ApiForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiForm<T>
where
    T: DeserializeOwned + JsonSchema + Debug + Send,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "form_extractor", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumForm::<T>::from_request(req, state).await {
            Ok(AxumForm(form)) => {
                tracing::trace!(?form, "Extracted");

                Ok(ApiForm(form))
            }
            Err(form_rejection) => {
                tracing::warn!(rejection=?form_rejection, "Rejection");

                let verbosity = state.error_verbosity();

                Err(BodyError::from_rejection::<T>(verbosity, form_rejection.body_text())?.into())
            }
        }
    }
}

impl<T> Extractor for ApiForm<T> {
    type Extracted = T;

    fn extracted(&self) -> &Self::Extracted {
        &self.0
    }
}
