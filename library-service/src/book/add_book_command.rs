use std::time::Duration;

use ulid::Ulid;

use crate::{
    author::repository::{AuthorRecord, AuthorRepositoryArc},
    book::repository::{BookRecord, BookRepositoryArc},
    error::{AppError, AppResult},
    store,
    user::repository::UserRecord,
};

#[derive(Debug, Clone)]
pub struct AddBookCommand {
    author_repository: AuthorRepositoryArc,
    book_repository: BookRepositoryArc,
    store_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AddBookCommandInput<'a> {
    pub title: &'a str,
    pub published: i32,
    pub author: &'a str,
    pub genres: Vec<String>,
}

impl AddBookCommand {
    pub fn new(
        author_repository: AuthorRepositoryArc,
        book_repository: BookRepositoryArc,
        store_timeout: Duration,
    ) -> Self {
        AddBookCommand {
            author_repository,
            book_repository,
            store_timeout,
        }
    }

    /// Finds or creates the author by name, then inserts the book.
    ///
    /// The two steps are not atomic and there is no compensating rollback:
    /// a failed book insert leaves a freshly created author persisted.
    /// The uniqueness index on author names means a concurrent
    /// find-or-create loser fails its insert instead of duplicating the
    /// author; that failure surfaces as a validation error carrying the
    /// author name.
    #[tracing::instrument(skip(self, identity))]
    pub async fn execute(
        &self,
        identity: Option<&UserRecord>,
        input: AddBookCommandInput<'_>,
    ) -> AppResult<BookRecord> {
        if identity.is_none() {
            return Err(AppError::Unauthorized);
        }

        let author = store::with_deadline(
            self.store_timeout,
            self.author_repository.find_by_name(input.author),
        )
        .await?;
        let author = match author {
            Some(author) => author,
            None => {
                let record = AuthorRecord {
                    id: Ulid::new().to_string(),
                    name: input.author.to_string(),
                    born: None,
                };
                store::with_deadline(
                    self.store_timeout,
                    self.author_repository.insert(record.clone()),
                )
                .await
                .map_err(|err| err.into_validation("author", input.author))?;
                record
            }
        };

        let book = BookRecord {
            id: Ulid::new().to_string(),
            title: input.title.to_string(),
            published: input.published,
            author_id: author.id,
            genres: input.genres,
        };
        store::with_deadline(self.store_timeout, self.book_repository.insert(book.clone()))
            .await
            .map_err(|err| err.into_validation("title", input.title))?;

        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::author::repository::{AuthorRepository, memory::MemoryAuthorRepository};
    use crate::book::repository::{BookRepository, memory::MemoryBookRepository};

    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn identity() -> UserRecord {
        UserRecord {
            id: "user-1".to_string(),
            username: "librarian".to_string(),
            password_hash: "irrelevant".to_string(),
            favorite_genre: None,
        }
    }

    fn input<'a>(title: &'a str, author: &'a str) -> AddBookCommandInput<'a> {
        AddBookCommandInput {
            title,
            published: 2002,
            author,
            genres: vec!["agile".to_string()],
        }
    }

    #[tokio::test]
    async fn test_add_book_without_identity_touches_nothing() {
        let author_repository = Arc::new(MemoryAuthorRepository::new());
        let book_repository = Arc::new(MemoryBookRepository::new());
        let command = AddBookCommand::new(
            author_repository.clone(),
            book_repository.clone(),
            TIMEOUT,
        );

        let err = command
            .execute(None, input("Clean Code", "Robert Martin"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
        assert_eq!(author_repository.count().await.unwrap(), 0);
        assert_eq!(book_repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_book_creates_missing_author() {
        let author_repository = Arc::new(MemoryAuthorRepository::new());
        let book_repository = Arc::new(MemoryBookRepository::new());
        let command = AddBookCommand::new(
            author_repository.clone(),
            book_repository.clone(),
            TIMEOUT,
        );

        let book = command
            .execute(Some(&identity()), input("Clean Code", "Robert Martin"))
            .await
            .unwrap();

        let author = author_repository
            .find_by_name("Robert Martin")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(book.author_id, author.id);
        assert_eq!(author.born, None);
        assert_eq!(book_repository.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_add_book_reuses_existing_author() {
        let author_repository = Arc::new(MemoryAuthorRepository::new());
        let book_repository = Arc::new(MemoryBookRepository::new());
        let command = AddBookCommand::new(
            author_repository.clone(),
            book_repository.clone(),
            TIMEOUT,
        );

        let first = command
            .execute(Some(&identity()), input("Clean Code", "Robert Martin"))
            .await
            .unwrap();
        let second = command
            .execute(
                Some(&identity()),
                input("Agile software development", "Robert Martin"),
            )
            .await
            .unwrap();

        assert_eq!(first.author_id, second.author_id);
        assert_eq!(author_repository.count().await.unwrap(), 1);
        assert_eq!(book_repository.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_add_book_same_new_author_never_duplicates() {
        let author_repository = Arc::new(MemoryAuthorRepository::new());
        let book_repository = Arc::new(MemoryBookRepository::new());
        let command = AddBookCommand::new(
            author_repository.clone(),
            book_repository.clone(),
            TIMEOUT,
        );

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let command = command.clone();
                tokio::spawn(async move {
                    let title = format!("Book {i}");
                    command
                        .execute(
                            Some(&UserRecord {
                                id: "user-1".to_string(),
                                username: "librarian".to_string(),
                                password_hash: "irrelevant".to_string(),
                                favorite_genre: None,
                            }),
                            AddBookCommandInput {
                                title: &title,
                                published: 2024,
                                author: "Shared Author",
                                genres: vec![],
                            },
                        )
                        .await
                })
            })
            .collect();
        for task in tasks {
            // Losers of the find-or-create race may fail validation; the
            // store must never end up with two authors of the same name.
            let _ = task.await.unwrap();
        }

        assert_eq!(author_repository.count().await.unwrap(), 1);
    }
}
