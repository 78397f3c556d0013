use std::{
    ops::Deref,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    error::{ErrorVerbosity, ErrorVerbosityProvider},
    store::BookStore,
};

#[derive(Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    pub fn new(
        error_verbosity: ErrorVerbosity,
        books: Arc<dyn BookStore>,
        static_dir: PathBuf,
    ) -> Self {
        Self {
            inner: Arc::new(ApiStateInner {
                error_verbosity,
                books,
                static_dir,
            }),
        }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct ApiStateInner {
    error_verbosity: ErrorVerbosity,
    books: Arc<dyn BookStore>,
    static_dir: PathBuf,
}

impl ApiStateInner {
    pub fn books(&self) -> &dyn BookStore {
        self.books.as_ref()
    }

    /// Directory holding the prebuilt single-page application.
    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }
}

impl ErrorVerbosityProvider for ApiState {
    fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }
}
