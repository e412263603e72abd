//! Data plane client bound to a single index.

use futures::StreamExt;
use futures::stream;
use url::Url;
use validator::Validate;

use crate::TRACING_TARGET_DATA;
use crate::client::PineconeClient;
use crate::client::response::{ensure_success, json, send};
use crate::error::{Error, Result};
use crate::types::{
    CreateIndexRequest, DeleteBody, DeleteRequest, FetchResponse, IndexModel, MAX_TOP_K,
    QueryRequest, QueryResponse, UpsertRequest, UpsertResponse, Vector,
};

/// Default number of vectors per upsert request in [`IndexClient::upsert_all`].
pub const DEFAULT_BATCH_SIZE: usize = 200;

/// Default number of concurrent upsert requests in [`IndexClient::upsert_all`].
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Client for vector operations on one index.
///
/// Requests go to the index's own host, reusing the HTTP session of the
/// [`PineconeClient`] it was created from.
///
/// # Examples
///
/// ```rust,no_run
/// use nvisy_pinecone::{IndexClient, PineconeClient, QueryRequest, Vector};
///
/// # async fn example() -> nvisy_pinecone::Result<()> {
/// let client = PineconeClient::from_api_key("pcsk_example")?;
/// let index = IndexClient::connect(&client, "documents")
///     .await?
///     .with_namespace("articles");
///
/// index
///     .upsert(&[Vector::new("a", vec![0.1; 8]).with_metadata("content", "hello")])
///     .await?;
///
/// let matches = index
///     .query(QueryRequest::by_vector(vec![0.1; 8]).with_top_k(3).with_metadata(true))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IndexClient {
    client: PineconeClient,
    name: String,
    host: Url,
    dimension: u32,
    namespace: Option<String>,
}

impl IndexClient {
    /// Describes the named index and binds to its host.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the index does not exist, plus any error
    /// of [`PineconeClient::describe_index`].
    pub async fn connect(client: &PineconeClient, name: &str) -> Result<Self> {
        let index = client.describe_index(name).await?;
        Self::from_model(client.clone(), index)
    }

    /// Binds to the index named by `request`, creating it first if it does not exist.
    pub async fn open_or_create(client: &PineconeClient, request: CreateIndexRequest) -> Result<Self> {
        let index = match client.describe_index(&request.name).await {
            Ok(index) => index,
            Err(Error::NotFound { .. }) => {
                tracing::info!(
                    target: TRACING_TARGET_DATA,
                    index = %request.name,
                    "Index does not exist, creating it"
                );
                client.create_index_with(request).await?
            }
            Err(err) => return Err(err),
        };

        Self::from_model(client.clone(), index)
    }

    /// Binds to an already described index.
    ///
    /// A host without a scheme is reached over HTTPS.
    pub fn from_model(client: PineconeClient, index: IndexModel) -> Result<Self> {
        if index.host.is_empty() {
            return Err(Error::config(format!(
                "index '{}' has no data plane host",
                index.name
            )));
        }

        let host = if index.host.contains("://") {
            Url::parse(&index.host)
        } else {
            Url::parse(&format!("https://{}", index.host))
        }
        .map_err(|e| Error::config(format!("invalid index host '{}': {e}", index.host)))?;

        if host.cannot_be_a_base() {
            return Err(Error::config(format!("invalid index host '{}'", index.host)));
        }

        tracing::debug!(
            target: TRACING_TARGET_DATA,
            index = %index.name,
            host = %host,
            "Bound index client"
        );

        Ok(Self {
            client,
            name: index.name,
            host,
            dimension: index.dimension,
            namespace: None,
        })
    }

    /// Scopes all operations to a namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Returns the index name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the data plane host.
    pub fn host(&self) -> &Url {
        &self.host
    }

    /// Returns the index dimension.
    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    /// Returns the namespace, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.host.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn check_dimensions(&self, vectors: &[Vector]) -> Result<()> {
        let expected = self.dimension as usize;
        match vectors
            .iter()
            .find(|v| !v.values.is_empty() && v.values.len() != expected)
        {
            Some(vector) => Err(Error::validation(format!(
                "vector '{}' has {} values, index '{}' expects {}",
                vector.id,
                vector.values.len(),
                self.name,
                expected
            ))),
            None => Ok(()),
        }
    }

    /// Writes vectors, overwriting existing ids.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty slice or a vector whose
    /// length differs from the index dimension.
    pub async fn upsert(&self, vectors: &[Vector]) -> Result<UpsertResponse> {
        if vectors.is_empty() {
            return Err(Error::validation("vectors cannot be empty"));
        }
        self.check_dimensions(vectors)?;

        tracing::debug!(
            target: TRACING_TARGET_DATA,
            index = %self.name,
            count = vectors.len(),
            "Upserting vectors"
        );

        let body = UpsertRequest {
            vectors,
            namespace: self.namespace(),
        };
        let url = self.endpoint(&["vectors", "upsert"]);

        let response = send(self.client.http().post(url).json(&body)).await?;
        let response = ensure_success(response).await?;
        json(response).await
    }

    /// Writes vectors in batches of [`DEFAULT_BATCH_SIZE`] with at most
    /// [`DEFAULT_MAX_CONCURRENCY`] requests in flight.
    pub async fn upsert_all(&self, vectors: &[Vector]) -> Result<UpsertResponse> {
        self.upsert_batch(vectors, DEFAULT_BATCH_SIZE, DEFAULT_MAX_CONCURRENCY)
            .await
    }

    /// Writes vectors in batches with bounded concurrency.
    ///
    /// All batches run to completion; the counts of successful batches are
    /// summed. If any batch fails, [`Error::BatchFailed`] carries the first
    /// failure.
    pub async fn upsert_batch(
        &self,
        vectors: &[Vector],
        batch_size: usize,
        max_concurrency: usize,
    ) -> Result<UpsertResponse> {
        if batch_size == 0 {
            return Err(Error::validation("batch size must be at least 1"));
        }
        if max_concurrency == 0 {
            return Err(Error::validation("max concurrency must be at least 1"));
        }
        if vectors.is_empty() {
            return Err(Error::validation("vectors cannot be empty"));
        }
        self.check_dimensions(vectors)?;

        let total = vectors.len().div_ceil(batch_size);

        tracing::debug!(
            target: TRACING_TARGET_DATA,
            index = %self.name,
            count = vectors.len(),
            batches = total,
            max_concurrency,
            "Upserting vectors in batches"
        );

        let results: Vec<Result<UpsertResponse>> = stream::iter(vectors.chunks(batch_size))
            .map(|batch| self.upsert(batch))
            .buffer_unordered(max_concurrency)
            .collect()
            .await;

        let mut upserted_count = 0;
        let mut failed = 0;
        let mut first_error = None;
        for result in results {
            match result {
                Ok(response) => upserted_count += response.upserted_count,
                Err(err) => {
                    failed += 1;
                    first_error.get_or_insert(err);
                }
            }
        }

        if let Some(source) = first_error {
            tracing::warn!(
                target: TRACING_TARGET_DATA,
                index = %self.name,
                failed,
                total,
                error = %source,
                "Batch upsert failed"
            );
            return Err(Error::BatchFailed {
                failed,
                total,
                source: Box::new(source),
            });
        }

        Ok(UpsertResponse { upserted_count })
    }

    /// Finds the vectors most similar to the query.
    ///
    /// The client namespace is used unless the request names one.
    pub async fn query(&self, mut request: QueryRequest) -> Result<QueryResponse> {
        request.validate()?;
        if request.namespace.is_none() {
            request.namespace = self.namespace.clone();
        }

        tracing::debug!(
            target: TRACING_TARGET_DATA,
            index = %self.name,
            top_k = request.top_k,
            filtered = request.filter.is_some(),
            "Querying index"
        );

        let url = self.endpoint(&["query"]);
        let response = send(self.client.http().post(url).json(&request)).await?;
        let response = ensure_success(response).await?;
        json(response).await
    }

    /// Fetches vectors by id. Ids that do not exist are absent from the result.
    pub async fn fetch<S: AsRef<str>>(&self, ids: &[S]) -> Result<FetchResponse> {
        if ids.is_empty() {
            return Err(Error::validation("ids cannot be empty"));
        }

        let mut url = self.endpoint(&["vectors", "fetch"]);
        {
            let mut query = url.query_pairs_mut();
            for id in ids {
                query.append_pair("ids", id.as_ref());
            }
            if let Some(namespace) = self.namespace() {
                query.append_pair("namespace", namespace);
            }
        }

        tracing::debug!(
            target: TRACING_TARGET_DATA,
            index = %self.name,
            count = ids.len(),
            "Fetching vectors"
        );

        let response = send(self.client.http().get(url)).await?;
        let response = ensure_success(response).await?;
        json(response).await
    }

    /// Deletes vectors by id, all vectors in the namespace, or by metadata filter.
    ///
    /// Deleting by filter first queries for up to [`MAX_TOP_K`] matching ids
    /// with a zero vector, then deletes those ids; nothing is sent when no
    /// vector matches.
    pub async fn delete(&self, request: DeleteRequest) -> Result<()> {
        let ids = match request {
            DeleteRequest::Ids(ids) => {
                if ids.is_empty() {
                    return Err(Error::validation("ids cannot be empty"));
                }
                ids
            }
            DeleteRequest::All => return self.send_delete(None, true).await,
            DeleteRequest::Filter(filter) => {
                let query = QueryRequest::by_vector(vec![0.0; self.dimension as usize])
                    .with_top_k(MAX_TOP_K)
                    .with_filter(filter);
                let ids: Vec<String> = self
                    .query(query)
                    .await?
                    .matches
                    .into_iter()
                    .map(|m| m.id)
                    .collect();

                if ids.is_empty() {
                    tracing::debug!(
                        target: TRACING_TARGET_DATA,
                        index = %self.name,
                        "No vectors matched the delete filter"
                    );
                    return Ok(());
                }
                ids
            }
        };

        self.send_delete(Some(&ids), false).await
    }

    async fn send_delete(&self, ids: Option<&[String]>, delete_all: bool) -> Result<()> {
        tracing::debug!(
            target: TRACING_TARGET_DATA,
            index = %self.name,
            count = ids.map(<[String]>::len),
            delete_all,
            "Deleting vectors"
        );

        let body = DeleteBody {
            ids,
            delete_all,
            namespace: self.namespace(),
        };
        let url = self.endpoint(&["vectors", "delete"]);

        let response = send(self.client.http().post(url).json(&body)).await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metric;

    fn index(host: &str) -> Result<IndexClient> {
        let model: IndexModel = serde_json::from_value(serde_json::json!({
            "name": "test-index",
            "dimension": 3,
            "metric": Metric::Cosine,
            "host": host,
        }))
        .unwrap();
        IndexClient::from_model(PineconeClient::from_api_key("test-key").unwrap(), model)
    }

    #[test]
    fn test_bare_host_uses_https() {
        let index = index("test-index-b0ed6df.svc.pinecone.io").unwrap();
        assert_eq!(
            index.endpoint(&["vectors", "upsert"]).as_str(),
            "https://test-index-b0ed6df.svc.pinecone.io/vectors/upsert"
        );
    }

    #[test]
    fn test_host_with_scheme_is_kept() {
        let index = index("http://127.0.0.1:5081").unwrap();
        assert_eq!(index.endpoint(&["query"]).as_str(), "http://127.0.0.1:5081/query");
    }

    #[test]
    fn test_empty_host_rejected() {
        assert!(matches!(index(""), Err(Error::Config(_))));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let index = index("localhost").unwrap();
        let err = index
            .check_dimensions(&[Vector::new("a", vec![0.1, 0.2])])
            .unwrap_err();
        assert!(err.is_validation());
        assert!(index.check_dimensions(&[Vector::new("a", vec![0.1; 3])]).is_ok());
    }
}
