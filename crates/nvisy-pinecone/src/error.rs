//! Error types for Pinecone operations.
//!
//! Errors are split by where a call failed: before any I/O (validation or
//! configuration), on the wire (transport), or at the service (a non-success
//! response). Missing resources are surfaced as [`Error::NotFound`] so callers
//! can branch on them without inspecting status codes.

use crate::client::PineconeConfigBuilderError;

/// Result type for all Pinecone operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for Pinecone operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Caller input was rejected before any request was sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request never produced a response (connection, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Pinecone service error: {status} - {message}")]
    Service { status: u16, message: String },

    /// The service reported that the named resource does not exist.
    #[error("{resource} '{name}' not found")]
    NotFound {
        resource: &'static str,
        name: String,
    },

    /// A response body did not match the expected shape.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The client configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Some batches of a batched upsert failed.
    #[error("Batch operation failed: {failed}/{total} batches failed")]
    BatchFailed {
        failed: usize,
        total: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a service error.
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    /// Creates a not found error for an index.
    pub fn index_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            resource: "Index",
            name: name.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns whether the input was rejected before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns whether the request failed without receiving a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns whether the service reported a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns whether a non-success response was received.
    ///
    /// This includes [`Error::NotFound`], which is a 404 from the service.
    pub fn is_service_error(&self) -> bool {
        matches!(self, Self::Service { .. } | Self::NotFound { .. })
    }

    /// Returns the HTTP status code if this error came from a service response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{field}: {}", err.code),
                })
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::Validation(message)
    }
}

impl From<PineconeConfigBuilderError> for Error {
    fn from(err: PineconeConfigBuilderError) -> Self {
        Self::Config(err.to_string())
    }
}
