//! Token storage backends for the gateway's OAuth token.
//!
//! Provides a process-lifetime in-memory store and a write-through JSON file
//! store. Both publish tokens through an atomic pointer swap.

pub mod file;
pub mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;
