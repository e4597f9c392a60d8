//! Application layer - the session/authorization core and its handlers.
//!
//! - `SessionStore` - current identity and change subscription
//! - `ProfileGate` - authorization classification
//! - `SosChannel` - durable emergency flag
//! - `NavigationGuard` / `Navigator` - per-attempt decisions and the
//!   rendered view
//! - `handlers` - commands and queries used by the views

mod error;
pub mod handlers;
mod navigation_guard;
mod navigator;
mod profile_gate;
mod session_store;
mod sos_channel;

pub use error::HandlerError;
pub use navigation_guard::NavigationGuard;
pub use navigator::{Navigator, ViewState};
pub use profile_gate::ProfileGate;
pub use session_store::{SessionStore, Subscription};
pub use sos_channel::{SosChannel, SosError};
