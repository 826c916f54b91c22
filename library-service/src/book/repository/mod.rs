use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;

use crate::error::AppResult;

/// In-memory repository implementation.
pub mod memory;

/// Persisted book document.
///
/// Books reference their author by identifier; the author's display name
/// is resolved at read time, never stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    /// Unique identifier for the book
    pub id: String,
    /// Title of the book
    pub title: String,
    /// Year of publication
    pub published: i32,
    /// Identifier of the referencing author
    pub author_id: String,
    /// Genre tags; possibly empty
    pub genres: Vec<String>,
}

/// Repository trait for book data operations.
#[async_trait]
pub trait BookRepository: Debug {
    /// Inserts a new book record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insertion fails.
    async fn insert(&self, record: BookRecord) -> AppResult<()>;

    /// Returns all books, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    async fn find_all(&self) -> AppResult<Vec<BookRecord>>;

    /// Counts books in the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the count fails.
    async fn count(&self) -> AppResult<i64>;

    /// Counts books whose author reference equals the given identifier.
    ///
    /// An aggregation over current store state, not a cached value.
    ///
    /// # Errors
    ///
    /// Returns an error if the count fails.
    async fn count_by_author(&self, author_id: &str) -> AppResult<i64>;
}

/// Thread-safe shared reference to a book repository.
pub type BookRepositoryArc = Arc<dyn BookRepository + Send + Sync>;
