use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::graphql::{
    ServiceDeps, current_user,
    types::{Author, Book, User},
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Total number of books in the catalog.
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let deps = ctx.data::<ServiceDeps>()?;
        let count = deps
            .book_query_manager
            .count()
            .await
            .map_err(|err| err.extend())?;
        Ok(count as i32)
    }

    /// Total number of authors in the catalog.
    async fn author_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let deps = ctx.data::<ServiceDeps>()?;
        let count = deps
            .author_query_manager
            .count()
            .await
            .map_err(|err| err.extend())?;
        Ok(count as i32)
    }

    /// All books, optionally restricted to those tagged with a genre.
    async fn all_books(&self, ctx: &Context<'_>, genre: Option<String>) -> Result<Vec<Book>> {
        let deps = ctx.data::<ServiceDeps>()?;
        let books = deps
            .book_query_manager
            .list(genre.as_deref())
            .await
            .map_err(|err| err.extend())?;
        Ok(books.into_iter().map(Book::from).collect())
    }

    /// All authors.
    async fn all_authors(&self, ctx: &Context<'_>) -> Result<Vec<Author>> {
        let deps = ctx.data::<ServiceDeps>()?;
        let authors = deps
            .author_query_manager
            .list()
            .await
            .map_err(|err| err.extend())?;
        Ok(authors.into_iter().map(Author::from).collect())
    }

    /// The identity attached to the current request; null when anonymous.
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        Ok(current_user(ctx).cloned().map(User::from))
    }
}
