//! Identity provider adapters.
//!
//! - `anonymous` - No identity service; always signed out
//! - `mock` - In-memory implementation for tests and local development

mod anonymous;
mod mock;

pub use anonymous::AnonymousIdentityProvider;
pub use mock::MockIdentityProvider;
