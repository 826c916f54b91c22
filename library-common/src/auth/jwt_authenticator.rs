use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::auth::{
    access_token::AccessTokenClaims,
    authenticator::{Authenticator, TokenError},
};

/// JWT-based authenticator for validating access tokens.
pub struct JwtAuthenticator {
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl Clone for JwtAuthenticator {
    fn clone(&self) -> Self {
        Self {
            decoding_key: Arc::clone(&self.decoding_key),
            validation: Arc::clone(&self.validation),
        }
    }
}

impl Debug for JwtAuthenticator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtAuthenticator").finish()
    }
}

impl JwtAuthenticator {
    /// Creates a new JWT authenticator with expiration validation.
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: Arc::new(DecodingKey::from_secret(secret.as_ref())),
            validation: Arc::new({
                let mut validation = Validation::new(Algorithm::HS256);
                validation.validate_exp = true;
                validation
            }),
        }
    }

    /// Creates a new JWT authenticator without expiration validation.
    ///
    /// Login tokens carry no expiry claim, so this is the default verifier.
    pub fn new_no_validation(secret: &str) -> Self {
        Self {
            decoding_key: Arc::new(DecodingKey::from_secret(secret.as_ref())),
            validation: Arc::new({
                let mut validation = Validation::new(Algorithm::HS256);
                validation.validate_exp = false;
                validation.required_spec_claims.clear();
                validation
            }),
        }
    }
}

impl Authenticator for JwtAuthenticator {
    fn authenticate(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_err| TokenError::InvalidToken)
    }
}
