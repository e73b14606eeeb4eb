//! Cache store implementations for precache.
//!
//! Two implementations of the `CacheStore` port: an in-memory store for
//! embedding and unit tests, and a filesystem store that survives process
//! restarts the way the platform cache survives page reloads.

pub mod entry;
pub mod fs;
pub mod keys;
pub mod memory;

pub use entry::StoredEntry;
pub use fs::FilesystemStore;
pub use keys::{entry_file_stem, request_key, sanitize_name};
pub use memory::MemoryStore;
