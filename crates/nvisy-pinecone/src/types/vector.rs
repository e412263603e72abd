//! Data plane types: vectors, queries, fetches and deletes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

/// Metadata attached to a vector.
pub type Metadata = Map<String, Value>;

/// Metadata filter expression, e.g. `{"genre": {"$eq": "drama"}}`.
pub type Filter = Map<String, Value>;

/// Upper bound on `top_k` accepted by the service.
pub const MAX_TOP_K: u32 = 10_000;

/// Sparse vector values.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseValues {
    /// Positions of the non-zero values.
    pub indices: Vec<u32>,
    /// Non-zero values.
    pub values: Vec<f32>,
}

/// A stored vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vector {
    /// Vector identifier.
    pub id: String,
    /// Dense values.
    #[serde(default)]
    pub values: Vec<f32>,
    /// Sparse values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparse_values: Option<SparseValues>,
    /// Attached metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Vector {
    /// Creates a dense vector.
    pub fn new(id: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            values,
            sparse_values: None,
            metadata: None,
        }
    }

    /// Attaches sparse values.
    pub fn with_sparse_values(mut self, sparse_values: SparseValues) -> Self {
        self.sparse_values = Some(sparse_values);
        self
    }

    /// Sets a metadata field.
    pub fn with_metadata(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpsertRequest<'a> {
    pub vectors: &'a [Vector],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<&'a str>,
}

/// Result of an upsert.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertResponse {
    /// Number of vectors written.
    #[serde(default)]
    pub upserted_count: u64,
}

/// Similarity query against an index.
///
/// Exactly one of `vector`, `id` or `sparse_vector` is normally set; at least
/// one is required.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "check_query_target"))]
pub struct QueryRequest {
    /// Dense query vector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f32>>,
    /// Query by the values of a stored vector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Sparse query vector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparse_vector: Option<SparseValues>,
    /// Metadata filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Namespace, filled in from the index client when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Number of matches to return.
    #[validate(range(min = 1, max = 10000, message = "top_k must be between 1 and 10000"))]
    pub top_k: u32,
    /// Whether matches include their values.
    pub include_values: bool,
    /// Whether matches include their metadata.
    pub include_metadata: bool,
}

fn check_query_target(request: &QueryRequest) -> Result<(), ValidationError> {
    if request.vector.is_none() && request.id.is_none() && request.sparse_vector.is_none() {
        return Err(ValidationError::new("query_target")
            .with_message("one of vector, id or sparse vector is required".into()));
    }
    Ok(())
}

impl QueryRequest {
    /// Creates a query by dense vector.
    pub fn by_vector(vector: Vec<f32>) -> Self {
        Self {
            vector: Some(vector),
            ..Self::empty()
        }
    }

    /// Creates a query by stored vector id.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::empty()
        }
    }

    fn empty() -> Self {
        Self {
            vector: None,
            id: None,
            sparse_vector: None,
            filter: None,
            namespace: None,
            top_k: 5,
            include_values: false,
            include_metadata: false,
        }
    }

    /// Sets the number of matches.
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    /// Sets a sparse query vector.
    pub fn with_sparse_vector(mut self, sparse_vector: SparseValues) -> Self {
        self.sparse_vector = Some(sparse_vector);
        self
    }

    /// Sets the metadata filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Includes vector values in matches.
    pub fn with_values(mut self, include_values: bool) -> Self {
        self.include_values = include_values;
        self
    }

    /// Includes metadata in matches.
    pub fn with_metadata(mut self, include_metadata: bool) -> Self {
        self.include_metadata = include_metadata;
        self
    }
}

/// A query match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredVector {
    /// Vector identifier.
    pub id: String,
    /// Similarity score.
    pub score: f32,
    /// Dense values, empty unless requested.
    #[serde(default)]
    pub values: Vec<f32>,
    /// Sparse values, if requested and present.
    #[serde(default)]
    pub sparse_values: Option<SparseValues>,
    /// Metadata, if requested and present.
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

/// Response of a query.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Matches ordered by score.
    #[serde(default)]
    pub matches: Vec<ScoredVector>,
    /// Namespace that was queried.
    #[serde(default)]
    pub namespace: String,
}

/// Response of a fetch.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    /// Found vectors keyed by id; missing ids are absent.
    #[serde(default)]
    pub vectors: HashMap<String, Vector>,
    /// Namespace that was read.
    #[serde(default)]
    pub namespace: String,
}

/// Which vectors to delete.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteRequest {
    /// Delete the given ids.
    Ids(Vec<String>),
    /// Delete every vector in the namespace.
    All,
    /// Delete the vectors matching a metadata filter.
    Filter(Filter),
}

impl DeleteRequest {
    /// Deletes the given ids.
    pub fn ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Ids(ids.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<&'a [String]>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub delete_all: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<&'a str>,
}
