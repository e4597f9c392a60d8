//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Identity and Data
//!
//! - `IdentityProvider` - Sign-in, sign-out, credentials, change stream
//! - `ProfileStore` - Profile documents keyed by user
//! - `KeyValueStore` - Durable device-local storage (SOS flag)
//!
//! ## Backend
//!
//! - `AdvisoryClient`, `ChatClient`, `SosClient`, `ProfileSync`
//!
//! ## Device Capabilities
//!
//! - `LocationService` - Current position
//! - `SpeechService` - Text-to-speech

mod backend;
mod identity_provider;
mod key_value_store;
mod location_service;
mod profile_store;
mod speech_service;

pub use backend::{AdvisoryClient, BackendError, ChatClient, ProfileSync, SosClient};
pub use identity_provider::IdentityProvider;
pub use key_value_store::{KeyValueStore, StorageError};
pub use location_service::{LocationError, LocationService};
pub use profile_store::{ProfileError, ProfileStore};
pub use speech_service::{SpeechError, SpeechService};
