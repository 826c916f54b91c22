use std::fmt::Debug;
use std::sync::Arc;

use http::HeaderMap;
use http::header::AUTHORIZATION;
use thiserror::Error;

use crate::auth::access_token::AccessTokenClaims;

/// The prefix used for bearer tokens in authorization headers.
pub const BEARER_PREFIX: &str = "Bearer";

/// Failure to authenticate a presented credential.
///
/// A request that presents no credential at all is not a failure; these
/// variants only describe credentials that were presented and rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The authorization header was not a well-formed bearer scheme.
    #[error("malformed authorization header")]
    MalformedHeader,
    /// The token's signature or claims failed verification.
    #[error("invalid access token")]
    InvalidToken,
    /// The token could not be signed.
    #[error("failed to sign access token")]
    Signing,
}

/// Trait for authenticating access tokens from various sources.
pub trait Authenticator: Debug {
    /// Verifies a raw token string and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidToken`] if the signature or claims
    /// fail verification.
    fn authenticate(&self, token: &str) -> Result<AccessTokenClaims, TokenError>;

    /// Authenticates from HTTP headers.
    ///
    /// Returns `Ok(None)` when no authorization header is present. A header
    /// that is present but malformed or unverifiable is an error, which
    /// keeps "no credential" distinguishable from "bad credential".
    ///
    /// # Errors
    ///
    /// Returns a [`TokenError`] when a presented credential is rejected.
    fn authenticate_headers(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<AccessTokenClaims>, TokenError> {
        let Some(value) = headers.get(AUTHORIZATION) else {
            return Ok(None);
        };
        let bearer = value.to_str().map_err(|_| TokenError::MalformedHeader)?;
        self.authenticate_bearer(bearer).map(Some)
    }

    /// Authenticates a bearer token string in the format "Bearer <token>".
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::MalformedHeader`] if the value does not follow
    /// the bearer scheme, or the underlying verification error.
    fn authenticate_bearer(&self, bearer: &str) -> Result<AccessTokenClaims, TokenError> {
        let parts: Vec<_> = bearer.split(' ').collect();
        if parts.len() != 2 || parts[0] != BEARER_PREFIX {
            return Err(TokenError::MalformedHeader);
        }
        self.authenticate(parts[1])
    }
}

/// Thread-safe shared reference to an authenticator.
pub type AuthenticatorArc = Arc<dyn Authenticator + Send + Sync>;
