//! Device capability adapters.
//!
//! - `FixedLocationService` - configured position instead of GPS
//! - `LoggingSpeechService` - logs utterances instead of speaking

mod location;
mod speech;

pub use location::FixedLocationService;
pub use speech::LoggingSpeechService;
