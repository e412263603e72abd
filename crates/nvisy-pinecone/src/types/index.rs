//! Index descriptors and index creation requests.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

use super::{IndexSpec, Metric};
use crate::error::{Error, Result};

/// Whether an index can be deleted.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeletionProtection {
    /// The index cannot be deleted.
    Enabled,
    /// The index can be deleted.
    #[default]
    Disabled,
}

/// Readiness reported by the service for an index.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStatus {
    /// Whether the index accepts requests.
    #[serde(default)]
    pub ready: bool,
    /// Lifecycle state, e.g. `Ready` or `Initializing`.
    #[serde(default)]
    pub state: String,
}

/// Descriptor of an index as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexModel {
    /// Index name, unique per project.
    pub name: String,
    /// Vector dimensionality.
    pub dimension: u32,
    /// Distance metric.
    pub metric: Metric,
    /// Data plane host for this index.
    #[serde(default)]
    pub host: String,
    /// Deployment spec.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<IndexSpec>,
    /// Readiness status.
    #[serde(default)]
    pub status: IndexStatus,
    /// Deletion protection setting.
    #[serde(default)]
    pub deletion_protection: DeletionProtection,
}

impl IndexModel {
    /// Returns whether the service reports the index as ready.
    pub fn is_ready(&self) -> bool {
        self.status.ready
    }
}

/// Body of a list-indexes response.
///
/// The service wraps the list in an `indexes` field; a bare array is accepted
/// as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum IndexList {
    Wrapped { indexes: Vec<IndexModel> },
    Bare(Vec<IndexModel>),
}

impl IndexList {
    pub(crate) fn into_inner(self) -> Vec<IndexModel> {
        match self {
            Self::Wrapped { indexes } => indexes,
            Self::Bare(indexes) => indexes,
        }
    }
}

/// Request to create an index.
///
/// # Examples
///
/// ```rust
/// use nvisy_pinecone::{CreateIndexRequest, DeletionProtection, Metric, ServerlessSpec};
///
/// let request = CreateIndexRequest::new(
///     "documents",
///     1536,
///     Metric::Cosine,
///     ServerlessSpec::new("aws", "us-east-1"),
/// )
/// .with_deletion_protection(DeletionProtection::Enabled);
///
/// assert!(request.check().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct CreateIndexRequest {
    /// Index name.
    #[validate(length(min = 1, message = "index name cannot be empty"))]
    pub name: String,
    /// Vector dimensionality.
    #[validate(range(min = 1, message = "dimension must be a positive integer"))]
    pub dimension: u32,
    /// Distance metric.
    pub metric: Metric,
    /// Deployment spec.
    pub spec: IndexSpec,
    /// Deletion protection, left to the service default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_protection: Option<DeletionProtection>,
}

impl CreateIndexRequest {
    /// Creates a new index creation request.
    pub fn new(
        name: impl Into<String>,
        dimension: u32,
        metric: Metric,
        spec: impl Into<IndexSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            dimension,
            metric,
            spec: spec.into(),
            deletion_protection: None,
        }
    }

    /// Sets deletion protection.
    pub fn with_deletion_protection(mut self, deletion_protection: DeletionProtection) -> Self {
        self.deletion_protection = Some(deletion_protection);
        self
    }

    /// Validates the request and its deployment spec.
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        self.spec.validate()?;
        Ok(())
    }
}

/// Rejects empty index names.
pub(crate) fn check_index_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation("index name cannot be empty"));
    }
    Ok(())
}
