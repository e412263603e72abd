//! Rerank request and response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Rerank models known to be served by Pinecone inference.
pub const SUPPORTED_RERANK_MODELS: &[&str] =
    &["cohere-rerank-3.5", "bge-reranker-v2-m3", "pinecone-rerank-v0"];

/// A document to be reranked.
///
/// Documents are free-form JSON objects; by default the service ranks on the
/// `text` field, see [`RerankRequest::with_rank_fields`].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(pub Map<String, Value>);

impl Document {
    /// Creates a document with an `id` and a `text` field.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::default()
            .with_field("id", id.into())
            .with_field("text", text.into())
    }

    /// Sets a field on the document.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Returns the `id` field, if it is a string.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Returns the `text` field, if it is a string.
    pub fn text(&self) -> Option<&str> {
        self.0.get("text").and_then(Value::as_str)
    }

    /// Returns a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

/// Request to rerank documents against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct RerankRequest {
    /// Model override; the client default is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "model cannot be empty"))]
    pub model: Option<String>,
    /// Query to rank documents against.
    #[validate(length(min = 1, message = "query cannot be empty"))]
    pub query: String,
    /// Documents to rank.
    #[validate(length(min = 1, message = "documents cannot be empty"))]
    pub documents: Vec<Document>,
    /// Number of results to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "top_n must be at least 1"))]
    pub top_n: Option<u32>,
    /// Whether ranked results include the documents.
    pub return_documents: bool,
    /// Document fields to rank on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_fields: Option<Vec<String>>,
    /// Model-specific parameters, e.g. `{"truncate": "END"}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

impl RerankRequest {
    /// Creates a rerank request with default options.
    pub fn new(query: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            model: None,
            query: query.into(),
            documents,
            top_n: None,
            return_documents: true,
            rank_fields: None,
            parameters: None,
        }
    }

    /// Overrides the model for this request.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Limits the number of results.
    pub fn with_top_n(mut self, top_n: u32) -> Self {
        self.top_n = Some(top_n);
        self
    }

    /// Sets whether ranked results include the documents.
    pub fn with_return_documents(mut self, return_documents: bool) -> Self {
        self.return_documents = return_documents;
        self
    }

    /// Sets the document fields to rank on.
    pub fn with_rank_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rank_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Sets a model-specific parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }
}

/// A single ranked document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDocument {
    /// Position of the document in the request.
    pub index: usize,
    /// Relevance score.
    pub score: f64,
    /// The document, when `return_documents` was set.
    #[serde(default)]
    pub document: Option<Document>,
}

/// Usage accounting for a rerank request.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RerankUsage {
    /// Rerank units consumed.
    #[serde(default)]
    pub rerank_units: u32,
}

/// Response of a rerank request, ordered by descending score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankResponse {
    /// Model that produced the ranking.
    #[serde(default)]
    pub model: Option<String>,
    /// Ranked documents.
    pub data: Vec<RankedDocument>,
    /// Usage accounting.
    #[serde(default)]
    pub usage: RerankUsage,
}
