//! Pinecone client connection management and configuration.

mod pinecone_client;
mod pinecone_config;
pub(crate) mod response;

pub use pinecone_client::PineconeClient;
pub use pinecone_config::{PineconeConfig, PineconeConfigBuilder, PineconeConfigBuilderError};
