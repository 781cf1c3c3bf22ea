pub mod store;
pub mod in_memory;
pub mod file;
pub mod tracker;

pub use store::{SnapshotStore, StoreGuard};
pub use in_memory::InMemorySnapshotStore;
pub use file::{FileSnapshotStore, SnapshotDescription};
pub use tracker::TopProductsTracker;
