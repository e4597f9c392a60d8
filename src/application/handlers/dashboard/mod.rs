//! Dashboard handlers.

mod get_advisory;

pub use get_advisory::GetAdvisoryHandler;
