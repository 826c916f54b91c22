use async_graphql::{ComplexObject, Context, ErrorExtensions, ID, Result, SimpleObject};

use crate::{
    author::repository::AuthorRecord, book::repository::BookRecord, graphql::ServiceDeps,
    store, user::repository::UserRecord,
};

/// An author in the catalog.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Author {
    pub name: String,
    pub id: ID,
    pub born: Option<i32>,
}

#[ComplexObject]
impl Author {
    /// Number of catalog books referencing this author.
    ///
    /// An aggregation over current store state, computed independently for
    /// each author in a result set.
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let deps = ctx.data::<ServiceDeps>()?;
        let count = store::with_deadline(
            deps.store_timeout,
            deps.book_repository.count_by_author(&self.id),
        )
        .await
        .map_err(|err| err.extend())?;
        Ok(count as i32)
    }
}

impl From<AuthorRecord> for Author {
    fn from(record: AuthorRecord) -> Self {
        Self {
            name: record.name,
            id: ID(record.id),
            born: record.born,
        }
    }
}

/// A book in the catalog.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Book {
    pub title: String,
    pub published: i32,
    pub genres: Vec<String>,
    pub id: ID,
    #[graphql(skip)]
    pub author_id: String,
}

#[ComplexObject]
impl Book {
    /// Display name of the referenced author, resolved at read time from
    /// the stored author reference.
    async fn author(&self, ctx: &Context<'_>) -> Result<String> {
        let deps = ctx.data::<ServiceDeps>()?;
        let author = store::with_deadline(
            deps.store_timeout,
            deps.author_repository.find_by_id(&self.author_id),
        )
        .await
        .map_err(|err| err.extend())?;
        // Normal mutation paths never create orphaned references.
        author
            .map(|author| author.name)
            .ok_or_else(|| async_graphql::Error::new("book references an unknown author"))
    }
}

impl From<BookRecord> for Book {
    fn from(record: BookRecord) -> Self {
        Self {
            title: record.title,
            published: record.published,
            genres: record.genres,
            id: ID(record.id),
            author_id: record.author_id,
        }
    }
}

/// A registered user, stripped of credential material.
#[derive(Debug, Clone, SimpleObject)]
pub struct User {
    pub username: String,
    pub favorite_genre: Option<String>,
    pub id: ID,
}

impl From<UserRecord> for User {
    // The persisted password hash has no wire counterpart; dropping it
    // here is what keeps it out of every response.
    fn from(record: UserRecord) -> Self {
        Self {
            username: record.username,
            favorite_genre: record.favorite_genre,
            id: ID(record.id),
        }
    }
}

/// A signed access token issued at login.
#[derive(Debug, Clone, SimpleObject)]
pub struct Token {
    pub value: String,
}
