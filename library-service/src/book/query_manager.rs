use std::time::Duration;

use crate::{
    book::repository::{BookRecord, BookRepositoryArc},
    error::AppResult,
    store,
};

/// Read paths over the book collection.
#[derive(Debug, Clone)]
pub struct BookQueryManager {
    book_repository: BookRepositoryArc,
    store_timeout: Duration,
}

impl BookQueryManager {
    pub fn new(book_repository: BookRepositoryArc, store_timeout: Duration) -> Self {
        BookQueryManager {
            book_repository,
            store_timeout,
        }
    }

    /// Books matching the optional genre filter.
    ///
    /// The filter is a case-sensitive exact match against each book's
    /// genre set.
    pub async fn list(&self, genre: Option<&str>) -> AppResult<Vec<BookRecord>> {
        let books =
            store::with_deadline(self.store_timeout, self.book_repository.find_all()).await?;
        Ok(match genre {
            Some(genre) => books
                .into_iter()
                .filter(|book| book.genres.iter().any(|g| g == genre))
                .collect(),
            None => books,
        })
    }

    /// Total number of books.
    pub async fn count(&self) -> AppResult<i64> {
        store::with_deadline(self.store_timeout, self.book_repository.count()).await
    }
}
