//! In-memory adapters for tests and embedders without a backend.

mod store;

pub use store::InMemoryTaskStore;
