//! Library Catalog GraphQL Service
//!
//! A GraphQL service for managing a catalog of books and authors with
//! registered users.
//!
//! ## Features
//!
//! - Book and author catalog with derived fields (author display name on
//!   books, per-author book counts)
//! - User registration and JWT login
//! - Bearer-token request identity
//! - Pluggable store gateway with an in-memory implementation
//! - Structured logging and tracing

pub mod author;
pub mod book;
pub mod config;
pub mod error;
pub mod graphql;
pub mod server;
pub mod store;
pub mod tracing;
pub mod user;
