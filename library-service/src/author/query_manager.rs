use std::time::Duration;

use crate::{
    author::repository::{AuthorRecord, AuthorRepositoryArc},
    error::AppResult,
    store,
};

/// Read paths over the author collection.
#[derive(Debug, Clone)]
pub struct AuthorQueryManager {
    author_repository: AuthorRepositoryArc,
    store_timeout: Duration,
}

impl AuthorQueryManager {
    pub fn new(author_repository: AuthorRepositoryArc, store_timeout: Duration) -> Self {
        AuthorQueryManager {
            author_repository,
            store_timeout,
        }
    }

    /// All authors, verbatim.
    pub async fn list(&self) -> AppResult<Vec<AuthorRecord>> {
        store::with_deadline(self.store_timeout, self.author_repository.find_all()).await
    }

    /// Total number of authors.
    pub async fn count(&self) -> AppResult<i64> {
        store::with_deadline(self.store_timeout, self.author_repository.count()).await
    }
}
