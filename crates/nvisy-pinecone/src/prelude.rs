//! Convenience re-exports for common types.
//!
//! This prelude module re-exports the types needed for typical index management
//! and vector operations.

pub use crate::client::{PineconeClient, PineconeConfig};
pub use crate::error::{Error, Result};
pub use crate::index::IndexClient;
pub use crate::types::{
    CreateIndexRequest, DeleteRequest, Document, IndexModel, IndexSpec, Metric, PodSpec,
    QueryRequest, RerankRequest, ServerlessSpec, Vector,
};
