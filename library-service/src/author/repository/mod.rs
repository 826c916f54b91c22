use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;

use crate::error::AppResult;

/// In-memory repository implementation.
pub mod memory;

/// Persisted author document.
///
/// Authors are referenced from books by identifier, never embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    /// Unique identifier for the author
    pub id: String,
    /// Display name of the author; unique across the collection
    pub name: String,
    /// Birth year, if known
    pub born: Option<i32>,
}

/// Repository trait for author data operations.
#[async_trait]
pub trait AuthorRepository: Debug {
    /// Inserts a new author record.
    ///
    /// # Errors
    ///
    /// Fails with a duplicate store error if an author with the same name
    /// already exists (the collection's unique index).
    async fn insert(&self, record: AuthorRecord) -> AppResult<()>;

    /// Finds an author by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<AuthorRecord>>;

    /// Finds an author by exact name match.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<AuthorRecord>>;

    /// Returns all authors, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    async fn find_all(&self) -> AppResult<Vec<AuthorRecord>>;

    /// Counts authors in the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the count fails.
    async fn count(&self) -> AppResult<i64>;

    /// Atomically sets the birth year of the author with the given name.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    ///
    /// # Returns
    ///
    /// The updated record, or `None` if no author has that name.
    async fn update_born(&self, name: &str, born: i32) -> AppResult<Option<AuthorRecord>>;
}

/// Thread-safe shared reference to an author repository.
pub type AuthorRepositoryArc = Arc<dyn AuthorRepository + Send + Sync>;
