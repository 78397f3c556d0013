use axum::{
    async_trait,
    extract::{FromRequestParts, Path as AxumPath},
    http::request::Parts,
};

use crate::{
    error::{ApiError, ErrorVerbosityProvider, NotFoundError, PathError},
    types::book::BookId,
};

/// The `:id` segment of a book route.
///
/// Rejects with [`PathError`] if the segment can not be read (e.g. invalid UTF-8 after percent-decoding)
/// and with [`NotFoundError`] if it is not a valid [`BookId`], since no stored book can have such an id.
#[derive(Debug)]
pub struct BookIdPath(pub BookId);

#[async_trait]
impl<S> FromRequestParts<S> for BookIdPath
where
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "book_id_extractor", skip_all)]
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let verbosity = state.error_verbosity();

        let AxumPath(raw) = AxumPath::<String>::from_request_parts(parts, state)
            .await
            .map_err(|path_rejection| {
                tracing::warn!(rejection=?path_rejection, "Rejection");

                PathError::from_path_rejection(verbosity, path_rejection)
            })?;

        match BookId::parse(&raw) {
            Some(id) => {
                tracing::trace!(%id, "Extracted");

                Ok(BookIdPath(id))
            }
            None => {
                tracing::debug!(id = %raw, "Malformed book id");

                Err(NotFoundError::book(verbosity).into())
            }
        }
    }
}
