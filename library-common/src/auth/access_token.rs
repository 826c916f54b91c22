use serde::{Deserialize, Serialize};

/// Claims embedded in a signed access token.
///
/// Issued at login and verified on every authenticated request. The subject
/// is the user's identifier; the username is carried alongside it so a
/// decoded token is self-describing without a store round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Username of the token's owner.
    pub username: String,
    /// Identifier of the token's owner.
    pub sub: String,
}
