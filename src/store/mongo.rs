use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{ClientOptions, ReturnDocument},
    Client, Collection,
};
use serde::{Deserialize, Serialize};

use crate::types::book::{Book, BookId, BookPatch, NewBook};

use super::{BookStore, StoreError};

const COLLECTION_NAME: &str = "books";

/// The shape of a book as stored in MongoDB.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    publication_year: Option<i32>,
}

impl From<BookDocument> for Book {
    fn from(document: BookDocument) -> Self {
        Book {
            id: BookId::from(document.id),
            title: document.title,
            author: document.author,
            topic: document.topic,
            format: document.format,
            publication_year: document.publication_year,
        }
    }
}

impl From<&Book> for BookDocument {
    fn from(book: &Book) -> Self {
        BookDocument {
            id: book.id.object_id(),
            title: book.title.clone(),
            author: book.author.clone(),
            topic: book.topic.clone(),
            format: book.format.clone(),
            publication_year: book.publication_year,
        }
    }
}

/// Builds the `$set` document for a patch. Only supplied fields are included.
fn set_document(patch: BookPatch) -> Document {
    let mut set = Document::new();

    if let Some(title) = patch.title {
        set.insert("title", title);
    }

    if let Some(author) = patch.author {
        set.insert("author", author);
    }

    if let Some(topic) = patch.topic {
        set.insert("topic", topic);
    }

    if let Some(format) = patch.format {
        set.insert("format", format);
    }

    if let Some(publication_year) = patch.publication_year {
        set.insert("publicationYear", publication_year);
    }

    set
}

/// [`BookStore`] backed by a MongoDB collection.
#[derive(Clone)]
pub struct MongoBookStore {
    collection: Collection<BookDocument>,
}

impl MongoBookStore {
    /// Connects to MongoDB and verifies the connection with a `ping`.
    ///
    /// The database named in the URI is used if there is one, `database` otherwise.
    #[tracing::instrument(name = "mongo_connect", skip(uri))]
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options)?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(database));

        database.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(database = %database.name(), "Connected to MongoDB");

        Ok(Self {
            collection: database.collection(COLLECTION_NAME),
        })
    }

    fn by_id(id: BookId) -> Document {
        doc! { "_id": id.object_id() }
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        let documents: Vec<BookDocument> = self.collection.find(doc! {}).await?.try_collect().await?;

        Ok(documents.into_iter().map(Book::from).collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        let document = self.collection.find_one(Self::by_id(id)).await?;

        Ok(document.map(Book::from))
    }

    async fn insert(&self, book: NewBook) -> Result<Book, StoreError> {
        let book = book.into_book(BookId::generate());

        self.collection.insert_one(BookDocument::from(&book)).await?;

        tracing::debug!(id = %book.id, "Inserted book");

        Ok(book)
    }

    async fn update(&self, id: BookId, patch: BookPatch) -> Result<Option<Book>, StoreError> {
        // `$set` with an empty document is rejected by the server.
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let document = self
            .collection
            .find_one_and_update(Self::by_id(id), doc! { "$set": set_document(patch) })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(document.map(Book::from))
    }

    async fn delete(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        let document = self.collection.find_one_and_delete(Self::by_id(id)).await?;

        Ok(document.map(Book::from))
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson;

    use super::*;

    #[test]
    fn set_document_contains_supplied_fields_only() {
        let set = set_document(BookPatch {
            topic: Some("History".to_string()),
            publication_year: Some(1999),
            ..Default::default()
        });

        assert_eq!(set, doc! { "topic": "History", "publicationYear": 1999 });
    }

    #[test]
    fn stored_documents_use_underscore_id_and_ignore_unknown_fields() {
        let oid = ObjectId::new();
        let stored = doc! {
            "_id": oid,
            "title": "Dune",
            "author": "Frank Herbert",
            "__v": 0,
        };

        let book = Book::from(
            bson::from_document::<BookDocument>(stored).expect("Stored book must deserialize"),
        );

        assert_eq!(book.id, BookId::from(oid));
        assert_eq!(book.topic, None);

        let roundtrip = bson::to_document(&BookDocument::from(&book))
            .expect("Book document must serialize");

        assert_eq!(roundtrip.get_object_id("_id").ok(), Some(oid));
        assert!(!roundtrip.contains_key("topic"));
    }

    #[tokio::test]
    async fn connect_fails_on_an_invalid_uri() {
        let result = MongoBookStore::connect("not-a-mongodb-uri", "books").await;

        assert!(matches!(result, Err(StoreError::Mongo(_))));
    }
}
