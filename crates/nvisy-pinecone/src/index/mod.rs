//! Data plane operations on a single index.

mod index_client;

pub use index_client::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_CONCURRENCY, IndexClient};
