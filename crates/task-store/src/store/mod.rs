//! Store Layer
//!
//! The `TaskStore` abstraction and its in-memory implementation.

mod memory;
mod traits;

#[cfg(test)]
mod tests;

pub use memory::MemoryStore;
pub use traits::{SnapshotCallback, Subscription, TaskStore};
