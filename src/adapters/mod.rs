//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `backend` - HTTP client for the hosted backend, plus a mock
//! - `device` - Location and speech capabilities
//! - `identity` - Identity provider (mock)
//! - `profile` - Profile document store (in-memory)
//! - `storage` - Durable key-value storage (file, in-memory)

pub mod backend;
pub mod device;
pub mod identity;
pub mod profile;
pub mod storage;

pub use backend::{HttpBackendClient, HttpBackendConfig, MockBackend};
pub use device::{FixedLocationService, LoggingSpeechService};
pub use identity::{AnonymousIdentityProvider, MockIdentityProvider};
pub use profile::{InMemoryProfileStore, OfflineProfileStore};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
