use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::types::book::{Book, BookId, BookPatch, NewBook};

use super::{BookStore, StoreError};

/// [`BookStore`] that keeps books in process memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.books.read().await.clone())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.books.read().await.len() as u64)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        let books = self.books.read().await;

        Ok(books.iter().find(|book| book.id == id).cloned())
    }

    async fn insert(&self, book: NewBook) -> Result<Book, StoreError> {
        let book = book.into_book(BookId::generate());

        self.books.write().await.push(book.clone());

        Ok(book)
    }

    async fn update(&self, id: BookId, patch: BookPatch) -> Result<Option<Book>, StoreError> {
        let mut books = self.books.write().await;

        let Some(book) = books.iter_mut().find(|book| book.id == id) else {
            return Ok(None);
        };

        patch.apply(book);

        Ok(Some(book.clone()))
    }

    async fn delete(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        let mut books = self.books.write().await;

        let removed = books
            .iter()
            .position(|book| book.id == id)
            .map(|index| books.remove(index));

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Ursula K. Le Guin".to_string(),
            topic: None,
            format: None,
            publication_year: None,
        }
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = InMemoryBookStore::new();

        let first = store.insert(new_book("A Wizard of Earthsea")).await.unwrap();
        let second = store.insert(new_book("The Tombs of Atuan")).await.unwrap();

        let ids: Vec<_> = store.list().await.unwrap().into_iter().map(|b| b.id).collect();

        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn identical_inserts_get_distinct_ids() {
        let store = InMemoryBookStore::new();

        let first = store.insert(new_book("The Dispossessed")).await.unwrap();
        let second = store.insert(new_book("The Dispossessed")).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn update_and_delete_report_unknown_ids() {
        let store = InMemoryBookStore::new();
        let unknown = BookId::generate();

        assert_eq!(
            store.update(unknown, BookPatch::default()).await.unwrap(),
            None
        );
        assert_eq!(store.delete(unknown).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_removes_the_book() {
        let store = InMemoryBookStore::new();
        let book = store.insert(new_book("Always Coming Home")).await.unwrap();

        assert_eq!(store.delete(book.id).await.unwrap(), Some(book.clone()));
        assert_eq!(store.find_by_id(book.id).await.unwrap(), None);
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
