use std::fmt::{self, Debug, Formatter};

use jsonwebtoken::{EncodingKey, Header};

use crate::auth::{access_token::AccessTokenClaims, authenticator::TokenError};

/// Signs access tokens for successful logins.
///
/// Counterpart of [`JwtAuthenticator`]: both sides must be constructed
/// from the same secret. Tokens are signed with HS256 and carry no expiry
/// claim.
///
/// [`JwtAuthenticator`]: crate::auth::jwt_authenticator::JwtAuthenticator
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
}

impl Debug for TokenIssuer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer").finish()
    }
}

impl TokenIssuer {
    /// Creates a new token issuer from the signing secret.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
        }
    }

    /// Signs the given claims into an encoded token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if encoding fails.
    pub fn issue(&self, claims: &AccessTokenClaims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|_err| TokenError::Signing)
    }
}
