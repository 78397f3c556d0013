use async_trait::async_trait;

use crate::types::book::{Book, BookId, BookPatch, NewBook};

pub mod memory;
pub mod mongo;

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("MongoDB operation failed")]
    Mongo(#[from] mongodb::error::Error),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence operations on the books collection.
///
/// Implementations are shared between all request handlers as an `Arc<dyn BookStore>`.
#[async_trait]
pub trait BookStore: Send + Sync + 'static {
    /// Returns every book in the store's natural order.
    async fn list(&self) -> Result<Vec<Book>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError>;

    /// Persists a new book and returns it with its freshly assigned id.
    async fn insert(&self, book: NewBook) -> Result<Book, StoreError>;

    /// Overwrites the fields present in `patch` and returns the book as it is after the update.
    ///
    /// Returns [`None`] if no book has the given id.
    async fn update(&self, id: BookId, patch: BookPatch) -> Result<Option<Book>, StoreError>;

    /// Removes a book and returns it.
    ///
    /// Returns [`None`] if no book has the given id.
    async fn delete(&self, id: BookId) -> Result<Option<Book>, StoreError>;
}
