//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the Respi-Guard domain.

mod auth;
mod errors;
mod geo;
mod ids;
mod timestamp;

pub use auth::{
    validate_email, AuthError, AuthProvider, Identity, OAuthProvider, PasswordCredentials,
    Registration,
};
pub use errors::ValidationError;
pub use geo::GeoPoint;
pub use ids::{ListenerId, UserId};
pub use timestamp::Timestamp;
