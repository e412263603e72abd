//! Hosted reranking against a mock Pinecone server.

use mockito::{Matcher, Server};
use nvisy_pinecone::{Document, PineconeClient, PineconeConfig, RerankRequest};
use serde_json::json;

fn client(base_url: &str, rerank_model: Option<&str>) -> PineconeClient {
    let mut builder = PineconeConfig::builder()
        .with_api_key("test-key")
        .with_base_url(base_url);
    if let Some(model) = rerank_model {
        builder = builder.with_rerank_model(model);
    }
    PineconeClient::new(builder.build().unwrap()).unwrap()
}

fn documents() -> Vec<Document> {
    vec![
        Document::new("vec1", "Apple is a popular fruit known for its sweetness."),
        Document::new("vec2", "Many people enjoy eating apples as a healthy snack."),
        Document::new("vec3", "Apple Inc. has revolutionized the tech industry."),
    ]
}

fn ranked_body(model: &str) -> String {
    json!({
        "model": model,
        "data": [
            { "index": 2, "score": 0.91, "document": { "id": "vec3", "text": "Apple Inc. has revolutionized the tech industry." } },
            { "index": 0, "score": 0.12, "document": { "id": "vec1", "text": "Apple is a popular fruit known for its sweetness." } }
        ],
        "usage": { "rerank_units": 1 }
    })
    .to_string()
}

#[tokio::test]
async fn test_rerank_uses_default_model() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/rerank")
        .match_header("api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "cohere-rerank-3.5",
            "query": "tech company",
            "return_documents": true
        })))
        .with_status(200)
        .with_body(ranked_body("cohere-rerank-3.5"))
        .create_async()
        .await;

    let response = client(&server.url(), None)
        .rerank(RerankRequest::new("tech company", documents()))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.model.as_deref(), Some("cohere-rerank-3.5"));
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[0].index, 2);
    assert_eq!(
        response.data[0].document.as_ref().and_then(Document::id),
        Some("vec3")
    );
    assert_eq!(response.usage.rerank_units, 1);
}

#[tokio::test]
async fn test_rerank_configured_model() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/rerank")
        .match_body(Matcher::PartialJson(json!({ "model": "pinecone-rerank-v0" })))
        .with_status(200)
        .with_body(ranked_body("pinecone-rerank-v0"))
        .create_async()
        .await;

    client(&server.url(), Some("pinecone-rerank-v0"))
        .rerank(RerankRequest::new("tech company", documents()))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_rerank_request_model_overrides_default() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/rerank")
        .match_body(Matcher::PartialJson(json!({
            "model": "bge-reranker-v2-m3",
            "top_n": 2,
            "parameters": { "truncate": "END" }
        })))
        .with_status(200)
        .with_body(ranked_body("bge-reranker-v2-m3"))
        .create_async()
        .await;

    let request = RerankRequest::new("tech company", documents())
        .with_model("bge-reranker-v2-m3")
        .with_top_n(2)
        .with_parameter("truncate", "END");
    client(&server.url(), Some("pinecone-rerank-v0"))
        .rerank(request)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_rerank_custom_fields_without_documents() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/rerank")
        .match_body(Matcher::PartialJson(json!({
            "rank_fields": ["body"],
            "return_documents": false,
            "documents": [{ "id": "a", "body": "first" }, { "id": "b", "body": "second" }]
        })))
        .with_status(200)
        .with_body(r#"{"data":[{"index":1,"score":0.5},{"index":0,"score":0.25}],"usage":{"rerank_units":1}}"#)
        .create_async()
        .await;

    let documents = vec![
        Document::default().with_field("id", "a").with_field("body", "first"),
        Document::default().with_field("id", "b").with_field("body", "second"),
    ];
    let request = RerankRequest::new("second", documents)
        .with_rank_fields(["body"])
        .with_return_documents(false);
    let response = client(&server.url(), None).rerank(request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.data[0].index, 1);
    assert!(response.data.iter().all(|d| d.document.is_none()));
    assert!(response.model.is_none());
}

#[tokio::test]
async fn test_rerank_rejects_empty_input() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/rerank")
        .expect(0)
        .create_async()
        .await;
    let client = client(&server.url(), None);

    let err = client
        .rerank(RerankRequest::new("query", Vec::new()))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = client
        .rerank(RerankRequest::new("", documents()))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = client
        .rerank(RerankRequest::new("query", documents()).with_model(""))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_rerank_service_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/rerank")
        .with_status(400)
        .with_body(r#"{"error":{"code":"INVALID_ARGUMENT","message":"Model 'nope' not found"}}"#)
        .create_async()
        .await;

    let err = client(&server.url(), None)
        .rerank(RerankRequest::new("query", documents()).with_model("nope"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert!(err.to_string().contains("Model 'nope' not found"));
}

#[test]
fn test_supported_models_include_default() {
    assert!(PineconeClient::supported_rerank_models().contains(&"cohere-rerank-3.5"));
}
