pub mod access_token;
pub mod authenticator;
pub mod jwt_authenticator;
pub mod password;
pub mod token_issuer;
