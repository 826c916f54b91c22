use std::{
    fmt::{self, Debug, Formatter},
    time::Duration,
};

use library_common::auth::{access_token::AccessTokenClaims, password, token_issuer::TokenIssuer};

use crate::{
    error::AppResult,
    store,
    user::repository::UserRepositoryArc,
};

#[derive(Debug, Clone)]
pub struct LoginCommand {
    user_repository: UserRepositoryArc,
    token_issuer: TokenIssuer,
    store_timeout: Duration,
}

#[derive(Clone)]
pub struct LoginCommandInput<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl Debug for LoginCommandInput<'_> {
    // Keeps the plaintext password out of logs and span fields.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommandInput")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl LoginCommand {
    pub fn new(
        user_repository: UserRepositoryArc,
        token_issuer: TokenIssuer,
        store_timeout: Duration,
    ) -> Self {
        LoginCommand {
            user_repository,
            token_issuer,
            store_timeout,
        }
    }

    /// Verifies the credentials and issues a signed access token.
    ///
    /// Unknown username and wrong password both return `Ok(None)`, which
    /// keeps failed logins indistinguishable and avoids username
    /// enumeration.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, input: LoginCommandInput<'_>) -> AppResult<Option<String>> {
        let user = store::with_deadline(
            self.store_timeout,
            self.user_repository.find_by_username(input.username),
        )
        .await?;
        let Some(user) = user else {
            return Ok(None);
        };

        if !password::verify(input.password, &user.password_hash)? {
            return Ok(None);
        }

        let claims = AccessTokenClaims {
            username: user.username,
            sub: user.id,
        };
        let token = self.token_issuer.issue(&claims)?;
        Ok(Some(token))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use library_common::auth::{
        authenticator::Authenticator, jwt_authenticator::JwtAuthenticator,
    };
    use ulid::Ulid;

    use crate::user::repository::{UserRecord, UserRepository, memory::MemoryUserRepository};

    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);
    const SECRET: &str = "test_secret_key";

    async fn command_with_user(username: &str, password: &str) -> LoginCommand {
        let repository = Arc::new(MemoryUserRepository::new());
        repository
            .insert(UserRecord {
                id: Ulid::new().to_string(),
                username: username.to_string(),
                password_hash: password::hash(password).unwrap(),
                favorite_genre: None,
            })
            .await
            .unwrap();
        LoginCommand::new(repository, TokenIssuer::new(SECRET), TIMEOUT)
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let command = command_with_user("bookworm", "hunter2hunter2").await;

        let token = command
            .execute(LoginCommandInput {
                username: "bookworm",
                password: "hunter2hunter2",
            })
            .await
            .unwrap()
            .unwrap();

        let claims = JwtAuthenticator::new_no_validation(SECRET)
            .authenticate(&token)
            .unwrap();
        assert_eq!(claims.username, "bookworm");
    }

    #[tokio::test]
    async fn test_failed_logins_are_indistinguishable() {
        let command = command_with_user("bookworm", "hunter2hunter2").await;

        let wrong_password = command
            .execute(LoginCommandInput {
                username: "bookworm",
                password: "wrong",
            })
            .await
            .unwrap();
        let unknown_user = command
            .execute(LoginCommandInput {
                username: "nobody-here",
                password: "hunter2hunter2",
            })
            .await
            .unwrap();

        assert_eq!(wrong_password, None);
        assert_eq!(unknown_user, None);
    }
}
