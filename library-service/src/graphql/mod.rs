//! GraphQL schema: query and mutation roots, object types, and the
//! derived-field resolvers that compute what the store does not hold.

use std::time::Duration;

use async_graphql::{Context, EmptySubscription, Schema};

use crate::{
    author::{edit_author_command::EditAuthorCommand, query_manager::AuthorQueryManager,
        repository::AuthorRepositoryArc},
    book::{add_book_command::AddBookCommand, query_manager::BookQueryManager,
        repository::BookRepositoryArc},
    user::{create_user_command::CreateUserCommand, login_command::LoginCommand,
        repository::UserRecord},
};

pub mod mutation;
pub mod query;
pub mod types;


pub use mutation::MutationRoot;
pub use query::QueryRoot;

/// Shared resolver dependencies, installed as schema data at startup.
pub struct ServiceDeps {
    pub author_query_manager: AuthorQueryManager,
    pub book_query_manager: BookQueryManager,
    pub add_book_command: AddBookCommand,
    pub edit_author_command: EditAuthorCommand,
    pub create_user_command: CreateUserCommand,
    pub login_command: LoginCommand,
    /// Direct gateway access for derived-field resolvers.
    pub author_repository: AuthorRepositoryArc,
    pub book_repository: BookRepositoryArc,
    pub store_timeout: Duration,
}

/// Identity resolved for the current request, if any.
///
/// Attached as request-scoped data by the transport before execution.
/// Absent or `None` means the request is anonymous.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<UserRecord>);

/// The executable schema.
pub type LibrarySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema over the given dependencies.
pub fn build_schema(deps: ServiceDeps) -> LibrarySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(deps)
        .finish()
}

/// The identity attached to the current request, if any.
pub(crate) fn current_user<'a>(ctx: &'a Context<'_>) -> Option<&'a UserRecord> {
    ctx.data_opt::<CurrentUser>().and_then(|current| current.0.as_ref())
}
