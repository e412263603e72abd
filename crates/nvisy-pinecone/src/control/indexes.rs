//! Index management: list, describe and create.

use reqwest::StatusCode;

use crate::TRACING_TARGET_CONTROL;
use crate::client::PineconeClient;
use crate::client::response::{ensure_success, json, send};
use crate::error::{Error, Result};
use crate::types::{
    CreateIndexRequest, IndexList, IndexModel, IndexSpec, Metric, check_index_name,
};

impl PineconeClient {
    /// Lists the indexes in the project, in the order the service returns them.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if no response was received
    /// - [`Error::Service`] for a non-success status
    /// - [`Error::Serialization`] if the body is not a list of index descriptors
    pub async fn list_indexes(&self) -> Result<Vec<IndexModel>> {
        let url = self.endpoint(&["indexes"])?;

        tracing::debug!(
            target: TRACING_TARGET_CONTROL,
            url = %url,
            "Listing indexes"
        );

        let response = send(self.http().get(url)).await?;
        let response = ensure_success(response).await?;
        let indexes = json::<IndexList>(response).await?.into_inner();

        tracing::debug!(
            target: TRACING_TARGET_CONTROL,
            count = indexes.len(),
            "Listed indexes"
        );

        Ok(indexes)
    }

    /// Describes a single index.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `name` is empty; no request is sent
    /// - [`Error::NotFound`] if the index does not exist
    /// - [`Error::Service`] for any other non-success status
    /// - [`Error::Transport`] if no response was received
    pub async fn describe_index(&self, name: &str) -> Result<IndexModel> {
        check_index_name(name)?;
        let url = self.endpoint(&["indexes", name])?;

        tracing::debug!(
            target: TRACING_TARGET_CONTROL,
            index = name,
            "Describing index"
        );

        let response = send(self.http().get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(
                target: TRACING_TARGET_CONTROL,
                index = name,
                "Index not found"
            );
            return Err(Error::index_not_found(name));
        }

        let response = ensure_success(response).await?;
        json(response).await
    }

    /// Creates an index.
    ///
    /// The request body carries exactly the name, dimension, metric and the
    /// active deployment spec. Use [`PineconeClient::create_index_with`] to
    /// set deletion protection.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the name is empty, the dimension is zero or
    ///   the deployment spec is malformed; no request is sent
    /// - [`Error::Service`] for a non-success status
    /// - [`Error::Transport`] if no response was received
    pub async fn create_index(
        &self,
        name: impl Into<String>,
        dimension: u32,
        metric: Metric,
        spec: impl Into<IndexSpec>,
    ) -> Result<IndexModel> {
        self.create_index_with(CreateIndexRequest::new(name, dimension, metric, spec))
            .await
    }

    /// Creates an index from a full request.
    pub async fn create_index_with(&self, request: CreateIndexRequest) -> Result<IndexModel> {
        request.check()?;
        let url = self.endpoint(&["indexes"])?;

        tracing::debug!(
            target: TRACING_TARGET_CONTROL,
            index = %request.name,
            dimension = request.dimension,
            metric = %request.metric,
            spec = request.spec.kind(),
            "Creating index"
        );

        let response = send(self.http().post(url).json(&request)).await?;
        let response = match ensure_success(response).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_CONTROL,
                    index = %request.name,
                    error = %err,
                    "Failed to create index"
                );
                return Err(err);
            }
        };

        let index: IndexModel = json(response).await?;

        tracing::info!(
            target: TRACING_TARGET_CONTROL,
            index = %index.name,
            host = %index.host,
            "Index created"
        );

        Ok(index)
    }
}
