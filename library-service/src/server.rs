//! HTTP transport: axum router, GraphiQL, and per-request identity
//! resolution.

use std::time::Duration;

use async_graphql::{ErrorExtensions, Pos, Response, http::GraphiQLSource};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use http::HeaderMap;

use crate::{
    error::AppResult,
    graphql::{CurrentUser, LibrarySchema},
    store,
    user::repository::UserRepositoryArc,
};
use library_common::auth::authenticator::AuthenticatorArc;

/// Shared server state.
#[derive(Clone)]
pub struct ServerState {
    pub schema: LibrarySchema,
    pub authenticator: AuthenticatorArc,
    pub user_repository: UserRepositoryArc,
    pub store_timeout: Duration,
}

/// Builds the HTTP router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(graphiql))
        .route("/graphql", post(graphql_handler))
        .with_state(state)
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn graphql_handler(
    State(state): State<ServerState>,
    headers: HeaderMap,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let current = match resolve_identity(&state, &headers).await {
        Ok(current) => current,
        // A presented-but-invalid credential rejects the whole request,
        // unlike an absent one.
        Err(err) => {
            let pos = Pos { line: 0, column: 0 };
            return Response::from_errors(vec![err.extend().into_server_error(pos)]).into();
        }
    };
    let request = request.into_inner().data(current);
    state.schema.execute(request).await.into()
}

/// Resolves the request identity from the bearer credential.
///
/// No credential yields an anonymous context. A verified token whose user
/// no longer exists also degrades to anonymous; only a credential that
/// fails verification is an error.
pub async fn resolve_identity(
    state: &ServerState,
    headers: &HeaderMap,
) -> AppResult<CurrentUser> {
    let Some(claims) = state.authenticator.authenticate_headers(headers)? else {
        return Ok(CurrentUser(None));
    };
    let user = store::with_deadline(
        state.store_timeout,
        state.user_repository.find_by_id(&claims.sub),
    )
    .await?;
    Ok(CurrentUser(user))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::{HeaderValue, header::AUTHORIZATION};
    use library_common::auth::{
        access_token::AccessTokenClaims, jwt_authenticator::JwtAuthenticator,
        token_issuer::TokenIssuer,
    };
    use ulid::Ulid;

    use crate::{
        author::{
            edit_author_command::EditAuthorCommand, query_manager::AuthorQueryManager,
            repository::memory::MemoryAuthorRepository,
        },
        book::{
            add_book_command::AddBookCommand, query_manager::BookQueryManager,
            repository::memory::MemoryBookRepository,
        },
        error::AppError,
        graphql::{ServiceDeps, build_schema},
        user::{
            create_user_command::CreateUserCommand,
            login_command::LoginCommand,
            repository::{UserRecord, memory::MemoryUserRepository},
        },
    };

    use super::*;

    const SECRET: &str = "test_secret_key";
    const TIMEOUT: Duration = Duration::from_secs(5);

    fn state_with_user(user: UserRecord) -> (ServerState, String) {
        let author_repository = Arc::new(MemoryAuthorRepository::new());
        let book_repository = Arc::new(MemoryBookRepository::new());
        let user_repository = Arc::new(MemoryUserRepository::with_data(vec![user.clone()]));
        let token_issuer = TokenIssuer::new(SECRET);

        let deps = ServiceDeps {
            author_query_manager: AuthorQueryManager::new(author_repository.clone(), TIMEOUT),
            book_query_manager: BookQueryManager::new(book_repository.clone(), TIMEOUT),
            add_book_command: AddBookCommand::new(
                author_repository.clone(),
                book_repository.clone(),
                TIMEOUT,
            ),
            edit_author_command: EditAuthorCommand::new(author_repository.clone(), TIMEOUT),
            create_user_command: CreateUserCommand::new(user_repository.clone(), TIMEOUT),
            login_command: LoginCommand::new(
                user_repository.clone(),
                token_issuer.clone(),
                TIMEOUT,
            ),
            author_repository,
            book_repository,
            store_timeout: TIMEOUT,
        };

        let token = token_issuer
            .issue(&AccessTokenClaims {
                username: user.username.clone(),
                sub: user.id.clone(),
            })
            .unwrap();

        let state = ServerState {
            schema: build_schema(deps),
            authenticator: Arc::new(JwtAuthenticator::new_no_validation(SECRET)),
            user_repository,
            store_timeout: TIMEOUT,
        };
        (state, token)
    }

    fn test_user() -> UserRecord {
        UserRecord {
            id: Ulid::new().to_string(),
            username: "bookworm".to_string(),
            password_hash: "irrelevant".to_string(),
            favorite_genre: None,
        }
    }

    #[tokio::test]
    async fn test_no_header_resolves_anonymous() {
        let (state, _token) = state_with_user(test_user());
        let current = resolve_identity(&state, &HeaderMap::new()).await.unwrap();
        assert!(current.0.is_none());
    }

    #[tokio::test]
    async fn test_valid_bearer_resolves_user() {
        let user = test_user();
        let (state, token) = state_with_user(user.clone());

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        let current = resolve_identity(&state, &headers).await.unwrap();
        assert_eq!(current.0.unwrap().username, user.username);
    }

    #[tokio::test]
    async fn test_invalid_bearer_is_an_error_not_anonymous() {
        let (state, _token) = state_with_user(test_user());

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer garbage"));
        let err = resolve_identity(&state, &headers).await.unwrap_err();
        assert!(matches!(err, AppError::Token(_)));
    }

    #[tokio::test]
    async fn test_token_for_removed_user_degrades_to_anonymous() {
        let (state, _token) = state_with_user(test_user());

        // A verifiable token whose subject is not in the store.
        let stale = TokenIssuer::new(SECRET)
            .issue(&AccessTokenClaims {
                username: "ghost-user".to_string(),
                sub: Ulid::new().to_string(),
            })
            .unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {stale}")).unwrap(),
        );
        let current = resolve_identity(&state, &headers).await.unwrap();
        assert!(current.0.is_none());
    }
}
