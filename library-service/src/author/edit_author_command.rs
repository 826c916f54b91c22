use std::time::Duration;

use crate::{
    author::repository::{AuthorRecord, AuthorRepositoryArc},
    error::{AppError, AppResult},
    store,
    user::repository::UserRecord,
};

#[derive(Debug, Clone)]
pub struct EditAuthorCommand {
    author_repository: AuthorRepositoryArc,
    store_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct EditAuthorCommandInput<'a> {
    pub name: &'a str,
    pub set_to_born: i32,
}

impl EditAuthorCommand {
    pub fn new(author_repository: AuthorRepositoryArc, store_timeout: Duration) -> Self {
        EditAuthorCommand {
            author_repository,
            store_timeout,
        }
    }

    /// Sets the birth year of the named author.
    ///
    /// Requires an authenticated identity. A missing author is a non-error
    /// outcome (`Ok(None)`), distinct from the authorization failure.
    #[tracing::instrument(skip(self, identity))]
    pub async fn execute(
        &self,
        identity: Option<&UserRecord>,
        input: EditAuthorCommandInput<'_>,
    ) -> AppResult<Option<AuthorRecord>> {
        if identity.is_none() {
            return Err(AppError::Unauthorized);
        }

        store::with_deadline(
            self.store_timeout,
            self.author_repository.update_born(input.name, input.set_to_born),
        )
        .await
    }
}
