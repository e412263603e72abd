#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for client lifecycle events.
///
/// Use this target for logging session setup, configuration, and teardown.
pub const TRACING_TARGET_CLIENT: &str = "nvisy_pinecone::client";

/// Tracing target for control plane operations.
///
/// Use this target for logging index listing, description, and creation.
pub const TRACING_TARGET_CONTROL: &str = "nvisy_pinecone::control";

/// Tracing target for data plane operations.
///
/// Use this target for logging upserts, queries, fetches, and deletes on an index host.
pub const TRACING_TARGET_DATA: &str = "nvisy_pinecone::data";

/// Tracing target for hosted inference operations.
pub const TRACING_TARGET_INFERENCE: &str = "nvisy_pinecone::inference";

mod client;
mod control;
mod error;
mod index;
#[doc(hidden)]
pub mod prelude;
pub mod types;

pub use client::{PineconeClient, PineconeConfig, PineconeConfigBuilder, PineconeConfigBuilderError};
pub use error::{Error, Result};
pub use index::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_CONCURRENCY, IndexClient};
pub use types::{
    CreateIndexRequest, DeleteRequest, DeletionProtection, Document, FetchResponse, Filter,
    IndexModel, IndexSpec, IndexStatus, MAX_TOP_K, Metadata, Metric, PodSpec, QueryRequest,
    QueryResponse, RankedDocument, RerankRequest, RerankResponse, RerankUsage, ScoredVector,
    ServerlessSpec, SparseValues, UpsertResponse, Vector,
};
