use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use itertools::Itertools;
use tokio::sync::RwLock;

use crate::{
    author::repository::{AuthorRecord, AuthorRepository},
    error::AppResult,
    store::StoreError,
};

/// In-memory implementation of the author repository.
///
/// The write lock held across the uniqueness check and the insert is what
/// stands in for the document store's unique index on `name`.
#[derive(Debug)]
pub struct MemoryAuthorRepository {
    authors: Arc<RwLock<HashMap<String, AuthorRecord>>>,
}

impl Default for MemoryAuthorRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAuthorRepository {
    /// Creates a new empty memory author repository.
    pub fn new() -> Self {
        Self {
            authors: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a new memory author repository with initial data.
    pub fn with_data(authors: Vec<AuthorRecord>) -> Self {
        Self {
            authors: Arc::new(RwLock::new(
                authors
                    .into_iter()
                    .map(|author| (author.id.clone(), author))
                    .collect(),
            )),
        }
    }
}

#[async_trait]
impl AuthorRepository for MemoryAuthorRepository {
    async fn insert(&self, record: AuthorRecord) -> AppResult<()> {
        let mut authors = self.authors.write().await;
        if authors.values().any(|author| author.name == record.name) {
            return Err(StoreError::Duplicate {
                field: "name",
                value: record.name,
            }
            .into());
        }
        authors.insert(record.id.clone(), record);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<AuthorRecord>> {
        let authors = self.authors.read().await;
        Ok(authors.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<AuthorRecord>> {
        let authors = self.authors.read().await;
        Ok(authors.values().find(|author| author.name == name).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<AuthorRecord>> {
        let authors = self.authors.read().await;
        Ok(authors
            .values()
            .sorted_unstable_by(|a, b| a.id.cmp(&b.id))
            .cloned()
            .collect())
    }

    async fn count(&self) -> AppResult<i64> {
        let authors = self.authors.read().await;
        Ok(authors.len() as i64)
    }

    async fn update_born(&self, name: &str, born: i32) -> AppResult<Option<AuthorRecord>> {
        let mut authors = self.authors.write().await;
        if let Some(author) = authors.values_mut().find(|author| author.name == name) {
            author.born = Some(born);
            Ok(Some(author.clone()))
        } else {
            Ok(None)
        }
    }
}
