//! Profile store adapters.

mod in_memory;
mod offline;

pub use in_memory::InMemoryProfileStore;
pub use offline::OfflineProfileStore;
