use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use async_trait::async_trait;

use crate::error::AppResult;

/// In-memory repository implementation.
pub mod memory;

/// Minimum username length enforced by the user collection's schema.
pub const MIN_USERNAME_LENGTH: usize = 6;

/// Persisted user document.
///
/// The password hash is the only persisted credential material; it never
/// crosses the wire boundary (the GraphQL `User` type has no field for
/// it).
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique identifier for the user
    pub id: String,
    /// Username; unique across the collection
    pub username: String,
    /// Salted one-way hash of the user's password
    pub password_hash: String,
    /// The user's favorite genre, if set
    pub favorite_genre: Option<String>,
}

impl Debug for UserRecord {
    // Keeps credential material out of logs and span fields.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("favorite_genre", &self.favorite_genre)
            .finish()
    }
}

/// Repository trait for user data operations.
#[async_trait]
pub trait UserRepository: Debug {
    /// Inserts a new user record.
    ///
    /// # Errors
    ///
    /// Fails with a duplicate store error if the username is taken, or a
    /// constraint error if the username is shorter than
    /// [`MIN_USERNAME_LENGTH`].
    async fn insert(&self, record: UserRecord) -> AppResult<()>;

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserRecord>>;

    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserRecord>>;
}

/// Thread-safe shared reference to a user repository.
pub type UserRepositoryArc = Arc<dyn UserRepository + Send + Sync>;
