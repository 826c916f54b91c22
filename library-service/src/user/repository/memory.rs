use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    store::StoreError,
    user::repository::{MIN_USERNAME_LENGTH, UserRecord, UserRepository},
};

/// In-memory implementation of the user repository.
#[derive(Debug)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUserRepository {
    /// Creates a new empty memory user repository.
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a new memory user repository with initial data.
    pub fn with_data(users: Vec<UserRecord>) -> Self {
        Self {
            users: Arc::new(RwLock::new(
                users
                    .into_iter()
                    .map(|user| (user.id.clone(), user))
                    .collect(),
            )),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, record: UserRecord) -> AppResult<()> {
        if record.username.chars().count() < MIN_USERNAME_LENGTH {
            return Err(StoreError::Constraint {
                field: "username",
                message: format!("shorter than {MIN_USERNAME_LENGTH} characters"),
            }
            .into());
        }
        let mut users = self.users.write().await;
        if users.values().any(|user| user.username == record.username) {
            return Err(StoreError::Duplicate {
                field: "username",
                value: record.username,
            }
            .into());
        }
        users.insert(record.id.clone(), record);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.username == username).cloned())
    }
}
