use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use itertools::Itertools;
use tokio::sync::RwLock;

use crate::{
    book::repository::{BookRecord, BookRepository},
    error::AppResult,
};

/// In-memory implementation of the book repository.
#[derive(Debug)]
pub struct MemoryBookRepository {
    books: Arc<RwLock<HashMap<String, BookRecord>>>,
}

impl Default for MemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBookRepository {
    /// Creates a new empty memory book repository.
    pub fn new() -> Self {
        Self {
            books: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a new memory book repository with initial data.
    pub fn with_data(books: Vec<BookRecord>) -> Self {
        Self {
            books: Arc::new(RwLock::new(
                books
                    .into_iter()
                    .map(|book| (book.id.clone(), book))
                    .collect(),
            )),
        }
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn insert(&self, record: BookRecord) -> AppResult<()> {
        let mut books = self.books.write().await;
        books.insert(record.id.clone(), record);
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<BookRecord>> {
        let books = self.books.read().await;
        Ok(books
            .values()
            .sorted_unstable_by(|a, b| a.id.cmp(&b.id))
            .cloned()
            .collect())
    }

    async fn count(&self) -> AppResult<i64> {
        let books = self.books.read().await;
        Ok(books.len() as i64)
    }

    async fn count_by_author(&self, author_id: &str) -> AppResult<i64> {
        let books = self.books.read().await;
        Ok(books
            .values()
            .filter(|book| book.author_id == author_id)
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, title: &str, author_id: &str) -> BookRecord {
        BookRecord {
            id: id.to_string(),
            title: title.to_string(),
            published: 2008,
            author_id: author_id.to_string(),
            genres: vec!["refactoring".to_string()],
        }
    }

    #[tokio::test]
    async fn test_count_by_author() {
        let repository = MemoryBookRepository::with_data(vec![
            book("1", "Clean Code", "a1"),
            book("2", "Agile software development", "a1"),
            book("3", "Refactoring, edition 2", "a2"),
        ]);

        assert_eq!(repository.count_by_author("a1").await.unwrap(), 2);
        assert_eq!(repository.count_by_author("a2").await.unwrap(), 1);
        assert_eq!(repository.count_by_author("a3").await.unwrap(), 0);
        assert_eq!(repository.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_id() {
        let repository = MemoryBookRepository::with_data(vec![
            book("2", "Agile software development", "a1"),
            book("1", "Clean Code", "a1"),
        ]);
        let titles: Vec<_> = repository
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|book| book.title)
            .collect();
        assert_eq!(titles, vec!["Clean Code", "Agile software development"]);
    }
}
