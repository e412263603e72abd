//! Request and response models for the Pinecone API.

mod index;
mod metric;
mod rerank;
mod spec;
mod vector;

pub(crate) use index::{IndexList, check_index_name};
pub use index::{CreateIndexRequest, DeletionProtection, IndexModel, IndexStatus};
pub use metric::Metric;
pub use rerank::{
    Document, RankedDocument, RerankRequest, RerankResponse, RerankUsage,
    SUPPORTED_RERANK_MODELS,
};
pub use spec::{IndexSpec, PodSpec, ServerlessSpec};
pub(crate) use vector::{DeleteBody, UpsertRequest};
pub use vector::{
    DeleteRequest, FetchResponse, Filter, MAX_TOP_K, Metadata, QueryRequest, QueryResponse,
    ScoredVector, SparseValues, UpsertResponse, Vector,
};
