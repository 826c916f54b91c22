use async_graphql::ErrorExtensions;
use library_common::auth::authenticator::TokenError;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Application error types.
///
/// Represents all failures a resolver or command can surface. "Not found"
/// outcomes are not errors anywhere in this service; they are returned as
/// `Ok(None)`.
#[derive(Debug, Error)]
pub enum AppError {
    /// The operation requires an authenticated identity and none was
    /// attached to the request.
    #[error("not authenticated")]
    Unauthorized,

    /// A persistence constraint rejected an input value.
    ///
    /// Carries the offending input so clients can point at the bad
    /// argument.
    #[error("invalid value for {field}: {value}")]
    Validation {
        /// Name of the rejected input field.
        field: &'static str,
        /// The rejected input value.
        value: String,
    },

    /// A presented credential failed verification.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The store rejected or failed an operation.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The store did not answer within the configured deadline.
    #[error("store operation timed out")]
    StoreTimeout,

    /// Internal application error.
    #[error("internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

macro_rules! impl_internal_errors {
    ( $( $type:ty ),* $(,)? ) => {
        $(
        impl From<$type> for AppError {
            fn from(err: $type) -> Self {
                AppError::Internal(Box::new(err))
            }
        }
        )*
    };
}
impl_internal_errors!(
    config::ConfigError,
    std::io::Error,
    library_common::auth::password::BcryptError,
);

impl AppError {
    /// Machine-readable error code exposed in GraphQL error extensions.
    ///
    /// Codes follow the conventions GraphQL clients already understand:
    /// `UNAUTHENTICATED` for identity failures, `BAD_USER_INPUT` for
    /// rejected input values.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized | Self::Token(_) => "UNAUTHENTICATED",
            Self::Validation { .. } => "BAD_USER_INPUT",
            Self::Store(_) | Self::StoreTimeout | Self::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Maps a store failure to a validation error carrying the input value
    /// the store rejected. Other errors pass through unchanged.
    pub fn into_validation(self, field: &'static str, value: &str) -> Self {
        match self {
            Self::Store(_) => Self::Validation {
                field,
                value: value.to_string(),
            },
            other => other,
        }
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        if let Self::Internal(err) = self {
            error!("internal service error: {}", err);
        }
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, extensions| {
            extensions.set("code", code);
            if let Self::Validation { field, value } = self {
                extensions.set("field", *field);
                extensions.set("invalidArgs", value.as_str());
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Unauthorized.code(), "UNAUTHENTICATED");
        assert_eq!(AppError::Token(TokenError::InvalidToken).code(), "UNAUTHENTICATED");
        assert_eq!(
            AppError::Validation {
                field: "author",
                value: "N. N.".into()
            }
            .code(),
            "BAD_USER_INPUT"
        );
        assert_eq!(AppError::StoreTimeout.code(), "INTERNAL_SERVER_ERROR");
    }

    #[test]
    fn test_into_validation_wraps_store_errors_only() {
        let err = AppError::Store(StoreError::Duplicate {
            field: "name",
            value: "N. N.".into(),
        })
        .into_validation("author", "N. N.");
        assert!(matches!(err, AppError::Validation { field: "author", .. }));

        let err = AppError::Unauthorized.into_validation("author", "N. N.");
        assert!(matches!(err, AppError::Unauthorized));
    }
}
