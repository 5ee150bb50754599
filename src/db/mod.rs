pub mod memory;
pub mod repository;
pub mod seed;

pub use memory::InMemoryStore;
pub use repository::{CatalogRepository, SignalRecorder, SignalRepository};
