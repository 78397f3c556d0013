use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::{Serialize, Serializer};
use utoipa::ToSchema;

/// Opaque identifier of a [`Book`], assigned by the store on creation.
///
/// Rendered as the 24 character hex form of the underlying ObjectId.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(ObjectId);

impl BookId {
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parses an identifier taken from a request path.
    ///
    /// Returns [`None`] for anything that is not a valid ObjectId, callers treat that the same as an unknown id.
    pub fn parse(raw: &str) -> Option<Self> {
        ObjectId::parse_str(raw).ok().map(Self)
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for BookId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

/// A stored book.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[schema(value_type = String)]
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
}

/// A book that has passed validation but has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub topic: Option<String>,
    pub format: Option<String>,
    pub publication_year: Option<i32>,
}

impl NewBook {
    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            topic: self.topic,
            format: self.format,
            publication_year: self.publication_year,
        }
    }
}

/// Fields to overwrite on an existing book. [`None`] means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub topic: Option<String>,
    pub format: Option<String>,
    pub publication_year: Option<i32>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.topic.is_none()
            && self.format.is_none()
            && self.publication_year.is_none()
    }

    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }

        if let Some(author) = self.author {
            book.author = author;
        }

        if self.topic.is_some() {
            book.topic = self.topic;
        }

        if self.format.is_some() {
            book.format = self.format;
        }

        if self.publication_year.is_some() {
            book.publication_year = self.publication_year;
        }
    }
}
