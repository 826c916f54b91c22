use std::{
    fmt::{self, Debug, Formatter},
    time::Duration,
};

use library_common::auth::password;
use ulid::Ulid;

use crate::{
    error::{AppError, AppResult},
    store,
    user::repository::{UserRecord, UserRepositoryArc},
};

#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    user_repository: UserRepositoryArc,
    store_timeout: Duration,
}

#[derive(Clone)]
pub struct CreateUserCommandInput<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub favorite_genre: Option<&'a str>,
}

impl Debug for CreateUserCommandInput<'_> {
    // Keeps the plaintext password out of logs and span fields.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserCommandInput")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("favorite_genre", &self.favorite_genre)
            .finish()
    }
}

impl CreateUserCommand {
    pub fn new(user_repository: UserRepositoryArc, store_timeout: Duration) -> Self {
        CreateUserCommand {
            user_repository,
            store_timeout,
        }
    }

    /// Registers a new user.
    ///
    /// The password is hashed before persistence; the plaintext is never
    /// stored or returned. Registration needs no authenticated identity.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, input: CreateUserCommandInput<'_>) -> AppResult<UserRecord> {
        let password_hash = password::hash(input.password)?;

        let record = UserRecord {
            id: Ulid::new().to_string(),
            username: input.username.to_string(),
            password_hash,
            favorite_genre: input.favorite_genre.map(ToString::to_string),
        };
        store::with_deadline(self.store_timeout, self.user_repository.insert(record.clone()))
            .await
            .map_err(|err| err.into_validation("username", input.username))?;

        Ok(record)
    }
}
