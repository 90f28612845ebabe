//! Book persistence
//!
//! Defines the `Book` record, the repository trait the HTTP layer talks to,
//! and the two interchangeable backends (in-memory and SQLite).

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// Unique identifier for a book, assigned by the backend on insert
pub type BookId = i64;

/// A persisted book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    /// Identifier assigned on creation, never changes afterwards
    pub id: BookId,
    /// Book title
    pub title: String,
    /// Book author
    pub author: String,
    /// Publication year
    pub year: i64,
}

/// Mutable fields of a book, already validated
///
/// Used both for inserts and for full-replacement updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    /// Book title
    pub title: String,
    /// Book author
    pub author: String,
    /// Publication year
    pub year: i64,
}

impl NewBook {
    /// Attach an id, producing the stored record
    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            year: self.year,
        }
    }
}

/// Failure raised by a persistence backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error reported by the database driver
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Backend could not be reached or initialised
    #[error("{0}")]
    Unavailable(String),
}

/// Repository interface consumed by the book handlers
///
/// For `update` and `delete_by_id` an affected-row count of zero is the only
/// signal that the id does not exist.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books, in backend iteration order
    async fn list_all(&self) -> Result<Vec<Book>, StoreError>;

    /// Look up a single book
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError>;

    /// Persist a new book and return it with its assigned id
    async fn insert(&self, book: &NewBook) -> Result<Book, StoreError>;

    /// Overwrite all mutable fields, returning the number of rows changed
    async fn update(&self, id: BookId, book: &NewBook) -> Result<u64, StoreError>;

    /// Remove a book, returning the number of rows removed
    async fn delete_by_id(&self, id: BookId) -> Result<u64, StoreError>;
}
