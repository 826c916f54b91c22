//! Library Catalog GraphQL Service
//!
//! A GraphQL service for managing a catalog of books and authors.
//! Supports catalog queries with derived fields, identity-gated mutations,
//! user registration, and JWT login.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;

use library_common::auth::{
    authenticator::AuthenticatorArc, jwt_authenticator::JwtAuthenticator,
    token_issuer::TokenIssuer,
};
use library_service::{
    author::{
        edit_author_command::EditAuthorCommand, query_manager::AuthorQueryManager,
        repository::{AuthorRepositoryArc, memory::MemoryAuthorRepository},
    },
    book::{
        add_book_command::AddBookCommand, query_manager::BookQueryManager,
        repository::{BookRepositoryArc, memory::MemoryBookRepository},
    },
    config::AppConfig,
    error::AppResult,
    graphql::{ServiceDeps, build_schema},
    server::{self, ServerState},
    tracing::tracer::Tracer,
    user::{
        create_user_command::CreateUserCommand, login_command::LoginCommand,
        repository::{UserRepositoryArc, memory::MemoryUserRepository},
    },
};

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = AppConfig::get();
    info!(
        "Starting {} v{}",
        config.distribution.name,
        config.distribution.version.as_ref().unwrap(),
    );

    Tracer::install(config)?;

    start(config).await?;

    Ok(())
}

async fn start(config: &AppConfig) -> AppResult<()> {
    let authenticator: AuthenticatorArc = if config.auth.validate_expiration.unwrap_or(false) {
        Arc::new(JwtAuthenticator::new(&config.auth.secret))
    } else {
        Arc::new(JwtAuthenticator::new_no_validation(&config.auth.secret))
    };
    let token_issuer = TokenIssuer::new(&config.auth.secret);
    let store_timeout = Duration::from_millis(config.store.operation_timeout_ms);

    let author_repository: AuthorRepositoryArc = Arc::new(MemoryAuthorRepository::new());
    let book_repository: BookRepositoryArc = Arc::new(MemoryBookRepository::new());
    let user_repository: UserRepositoryArc = Arc::new(MemoryUserRepository::new());

    let deps = ServiceDeps {
        author_query_manager: AuthorQueryManager::new(
            Arc::clone(&author_repository),
            store_timeout,
        ),
        book_query_manager: BookQueryManager::new(Arc::clone(&book_repository), store_timeout),
        add_book_command: AddBookCommand::new(
            Arc::clone(&author_repository),
            Arc::clone(&book_repository),
            store_timeout,
        ),
        edit_author_command: EditAuthorCommand::new(
            Arc::clone(&author_repository),
            store_timeout,
        ),
        create_user_command: CreateUserCommand::new(Arc::clone(&user_repository), store_timeout),
        login_command: LoginCommand::new(
            Arc::clone(&user_repository),
            token_issuer,
            store_timeout,
        ),
        author_repository,
        book_repository,
        store_timeout,
    };
    let schema = build_schema(deps);

    let state = ServerState {
        schema,
        authenticator,
        user_repository,
        store_timeout,
    };

    let listener = TcpListener::bind(config.server.http_address).await?;
    info!("GraphQL server started at {}", config.server.http_address);

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("failed to listen for shutdown signal");
    }
}
