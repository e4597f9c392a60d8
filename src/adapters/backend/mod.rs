//! Backend adapters.
//!
//! - `HttpBackendClient` - reqwest client for the hosted backend
//! - `MockBackend` - in-memory replies for tests

mod http;
mod mock;

pub use http::{HttpBackendClient, HttpBackendConfig};
pub use mock::{Endpoint, MockBackend, MockCall};
