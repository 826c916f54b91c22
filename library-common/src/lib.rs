//! Shared authentication primitives for the library catalog services.
//!
//! Contains the access-token claim model, the [`Authenticator`] trait with
//! its JWT implementation, token issuing, and password hashing. Nothing in
//! here touches the store or the transport.
//!
//! [`Authenticator`]: auth::authenticator::Authenticator

pub mod auth;
