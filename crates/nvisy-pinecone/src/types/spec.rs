//! Index deployment specifications.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Deployment type of an index.
///
/// Serialized externally tagged, so exactly one of `{"serverless": {...}}` or
/// `{"pod": {...}}` is ever sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexSpec {
    /// Infrastructure managed by the service.
    Serverless(ServerlessSpec),
    /// Explicit replica and shard counts on a pod size class.
    Pod(PodSpec),
}

impl IndexSpec {
    /// Returns the wire name of the active variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Serverless(_) => "serverless",
            Self::Pod(_) => "pod",
        }
    }
}

impl Validate for IndexSpec {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Serverless(spec) => spec.validate(),
            Self::Pod(spec) => spec.validate(),
        }
    }
}

impl From<ServerlessSpec> for IndexSpec {
    fn from(spec: ServerlessSpec) -> Self {
        Self::Serverless(spec)
    }
}

impl From<PodSpec> for IndexSpec {
    fn from(spec: PodSpec) -> Self {
        Self::Pod(spec)
    }
}

/// Serverless deployment: cloud provider and region.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ServerlessSpec {
    /// Cloud provider, e.g. `aws`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "cloud cannot be empty"))]
    pub cloud: Option<String>,
    /// Region, e.g. `us-east-1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "region cannot be empty"))]
    pub region: Option<String>,
}

impl ServerlessSpec {
    /// Creates a serverless spec for the given cloud and region.
    pub fn new(cloud: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            cloud: Some(cloud.into()),
            region: Some(region.into()),
        }
    }

    /// Creates a serverless spec that only names a region.
    pub fn in_region(region: impl Into<String>) -> Self {
        Self {
            cloud: None,
            region: Some(region.into()),
        }
    }
}

/// Pod-based deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PodSpec {
    /// Pod environment, e.g. `us-west1-gcp`.
    #[validate(length(min = 1, message = "environment cannot be empty"))]
    pub environment: String,
    /// Number of replicas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "replicas must be at least 1"))]
    pub replicas: Option<u32>,
    /// Number of shards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "shards must be at least 1"))]
    pub shards: Option<u32>,
    /// Pod size class, e.g. `p1.x1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "pod type cannot be empty"))]
    pub pod_type: Option<String>,
}

impl PodSpec {
    /// Creates a pod spec for the given environment.
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            replicas: None,
            shards: None,
            pod_type: None,
        }
    }

    /// Sets the replica count.
    pub fn with_replicas(mut self, replicas: u32) -> Self {
        self.replicas = Some(replicas);
        self
    }

    /// Sets the shard count.
    pub fn with_shards(mut self, shards: u32) -> Self {
        self.shards = Some(shards);
        self
    }

    /// Sets the pod type.
    pub fn with_pod_type(mut self, pod_type: impl Into<String>) -> Self {
        self.pod_type = Some(pod_type.into());
        self
    }
}
