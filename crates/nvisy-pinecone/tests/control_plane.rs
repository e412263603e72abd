//! Control plane operations against a mock Pinecone server.

use mockito::{Matcher, Server};
use nvisy_pinecone::{
    CreateIndexRequest, DeletionProtection, Error, Metric, PineconeClient, PineconeConfig, PodSpec,
    ServerlessSpec,
};
use serde_json::json;

fn client(base_url: &str) -> PineconeClient {
    let config = PineconeConfig::builder()
        .with_api_key("test-key")
        .with_base_url(base_url)
        .build()
        .unwrap();
    PineconeClient::new(config).unwrap()
}

fn index_json(name: &str, dimension: u32, metric: &str) -> serde_json::Value {
    json!({
        "name": name,
        "dimension": dimension,
        "metric": metric,
        "host": format!("{name}-abc123.svc.pinecone.io"),
        "spec": { "serverless": { "cloud": "aws", "region": "us-east-1" } },
        "status": { "ready": true, "state": "Ready" },
        "deletion_protection": "disabled"
    })
}

#[tokio::test]
async fn test_list_indexes_preserves_order() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/indexes")
        .match_header("api-key", "test-key")
        .match_header("x-pinecone-api-version", "2024-07")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "indexes": [
                    index_json("alpha", 1536, "cosine"),
                    index_json("beta", 768, "dotproduct"),
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let indexes = client(&server.url()).list_indexes().await.unwrap();

    mock.assert_async().await;
    assert_eq!(indexes.len(), 2);
    assert_eq!(indexes[0].name, "alpha");
    assert_eq!(indexes[0].dimension, 1536);
    assert_eq!(indexes[1].name, "beta");
    assert_eq!(indexes[1].metric, Metric::DotProduct);
    assert!(indexes[0].is_ready());
}

#[tokio::test]
async fn test_list_indexes_empty() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/indexes")
        .with_status(200)
        .with_body(r#"{"indexes":[]}"#)
        .create_async()
        .await;

    let indexes = client(&server.url()).list_indexes().await.unwrap();
    assert!(indexes.is_empty());
}

#[tokio::test]
async fn test_list_indexes_accepts_bare_array() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/indexes")
        .with_status(200)
        .with_body(json!([index_json("alpha", 8, "euclidean")]).to_string())
        .create_async()
        .await;

    let indexes = client(&server.url()).list_indexes().await.unwrap();
    assert_eq!(indexes.len(), 1);
    assert_eq!(indexes[0].metric, Metric::Euclidean);
}

#[tokio::test]
async fn test_list_indexes_service_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/indexes")
        .with_status(401)
        .with_body(r#"{"error":{"code":"UNAUTHENTICATED","message":"Invalid API Key"}}"#)
        .create_async()
        .await;

    let err = client(&server.url()).list_indexes().await.unwrap_err();
    assert!(err.is_service_error());
    assert_eq!(err.status_code(), Some(401));
    assert!(err.to_string().contains("Invalid API Key"));
}

#[tokio::test]
async fn test_create_index_sends_exact_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/indexes")
        .match_header("api-key", "test-key")
        .match_body(Matcher::Json(json!({
            "name": "my-index",
            "dimension": 1536,
            "metric": "cosine",
            "spec": { "serverless": { "cloud": "aws", "region": "us-east-1" } }
        })))
        .with_status(201)
        .with_body(index_json("my-index", 1536, "cosine").to_string())
        .create_async()
        .await;

    let index = client(&server.url())
        .create_index(
            "my-index",
            1536,
            Metric::Cosine,
            ServerlessSpec::new("aws", "us-east-1"),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(index.name, "my-index");
    assert_eq!(index.host, "my-index-abc123.svc.pinecone.io");
}

#[tokio::test]
async fn test_create_index_with_pod_spec() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/indexes")
        .match_body(Matcher::Json(json!({
            "name": "pods",
            "dimension": 128,
            "metric": "euclidean",
            "spec": { "pod": { "environment": "us-west1-gcp", "replicas": 2, "pod_type": "p1.x1" } }
        })))
        .with_status(201)
        .with_body(index_json("pods", 128, "euclidean").to_string())
        .create_async()
        .await;

    let spec = PodSpec::new("us-west1-gcp")
        .with_replicas(2)
        .with_pod_type("p1.x1");
    client(&server.url())
        .create_index("pods", 128, Metric::Euclidean, spec)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_index_with_deletion_protection() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/indexes")
        .match_body(Matcher::PartialJson(json!({
            "name": "guarded",
            "deletion_protection": "enabled"
        })))
        .with_status(201)
        .with_body(index_json("guarded", 4, "cosine").to_string())
        .create_async()
        .await;

    let request = CreateIndexRequest::new("guarded", 4, Metric::Cosine, ServerlessSpec::new("aws", "us-east-1"))
        .with_deletion_protection(DeletionProtection::Enabled);
    client(&server.url()).create_index_with(request).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_index_rejects_invalid_input_without_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/indexes")
        .expect(0)
        .create_async()
        .await;
    let client = client(&server.url());
    let spec = ServerlessSpec::new("aws", "us-east-1");

    let err = client
        .create_index("bad", 0, Metric::Cosine, spec.clone())
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = client
        .create_index("", 8, Metric::Cosine, spec)
        .await
        .unwrap_err();
    assert!(err.is_validation());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_index_conflict() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/indexes")
        .with_status(409)
        .with_body(r#"{"error":{"code":"ALREADY_EXISTS","message":"Resource already exists"}}"#)
        .create_async()
        .await;

    let err = client(&server.url())
        .create_index("dup", 8, Metric::Cosine, ServerlessSpec::new("aws", "us-east-1"))
        .await
        .unwrap_err();

    match err {
        Error::Service { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "Resource already exists");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_describe_index() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/indexes/alpha")
        .match_header("api-key", "test-key")
        .with_status(200)
        .with_body(index_json("alpha", 1536, "cosine").to_string())
        .create_async()
        .await;

    let index = client(&server.url()).describe_index("alpha").await.unwrap();

    mock.assert_async().await;
    assert_eq!(index.name, "alpha");
    assert_eq!(index.deletion_protection, DeletionProtection::Disabled);
}

#[tokio::test]
async fn test_describe_index_not_found() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/indexes/missing")
        .with_status(404)
        .with_body(r#"{"error":{"code":"NOT_FOUND","message":"Resource missing not found"}}"#)
        .create_async()
        .await;

    let err = client(&server.url())
        .describe_index("missing")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_describe_index_empty_name() {
    let mut server = Server::new_async().await;
    let mock = server.mock("GET", Matcher::Any).expect(0).create_async().await;

    let err = client(&server.url()).describe_index("").await.unwrap_err();

    assert!(err.is_validation());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_describe_index_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/indexes/alpha")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let err = client(&server.url())
        .describe_index("alpha")
        .await
        .unwrap_err();

    assert!(!err.is_not_found());
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn test_transport_failure() {
    let client = client("http://127.0.0.1:1");

    assert!(client.list_indexes().await.unwrap_err().is_transport());
    assert!(client.describe_index("alpha").await.unwrap_err().is_transport());
    assert!(
        client
            .create_index("alpha", 8, Metric::Cosine, ServerlessSpec::new("aws", "us-east-1"))
            .await
            .unwrap_err()
            .is_transport()
    );
}

#[tokio::test]
async fn test_clones_share_session() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/indexes")
        .with_status(200)
        .with_body(r#"{"indexes":[]}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client(&server.url());
    let clone = client.clone();
    client.list_indexes().await.unwrap();
    client.close();
    clone.list_indexes().await.unwrap();

    mock.assert_async().await;
}
