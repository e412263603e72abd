//! Hosted inference: document reranking.

use validator::Validate;

use crate::TRACING_TARGET_INFERENCE;
use crate::client::PineconeClient;
use crate::client::response::{ensure_success, json, send};
use crate::error::Result;
use crate::types::{RerankRequest, RerankResponse, SUPPORTED_RERANK_MODELS};

impl PineconeClient {
    /// Returns the rerank models known to be available.
    pub fn supported_rerank_models() -> &'static [&'static str] {
        SUPPORTED_RERANK_MODELS
    }

    /// Reranks documents by relevance to a query.
    ///
    /// The request's model wins over the configured default.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the query or document list is empty; no
    ///   request is sent
    /// - [`Error::Service`] for a non-success status
    /// - [`Error::Transport`] if no response was received
    ///
    /// [`Error::Validation`]: crate::Error::Validation
    /// [`Error::Service`]: crate::Error::Service
    /// [`Error::Transport`]: crate::Error::Transport
    pub async fn rerank(&self, mut request: RerankRequest) -> Result<RerankResponse> {
        request.validate()?;
        let model = request
            .model
            .get_or_insert_with(|| self.config().rerank_model().to_owned())
            .clone();
        let url = self.endpoint(&["rerank"])?;

        tracing::debug!(
            target: TRACING_TARGET_INFERENCE,
            model = %model,
            documents = request.documents.len(),
            top_n = request.top_n,
            "Reranking documents"
        );

        let response = send(self.http().post(url).json(&request)).await?;
        let response = ensure_success(response).await?;
        let reranked: RerankResponse = json(response).await?;

        tracing::debug!(
            target: TRACING_TARGET_INFERENCE,
            model = %model,
            results = reranked.data.len(),
            rerank_units = reranked.usage.rerank_units,
            "Reranked documents"
        );

        Ok(reranked)
    }
}
