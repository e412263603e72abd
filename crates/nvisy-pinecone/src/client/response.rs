//! Response handling shared by control and data plane calls.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Error envelope returned by the service, e.g.
/// `{"error": {"code": "NOT_FOUND", "message": "..."}, "status": 404}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Nested { error: ErrorDetail },
    Flat { message: String },
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Sends a request, mapping failures to [`Error::Transport`].
pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
    request.send().await.map_err(Error::Transport)
}

/// Passes successful responses through and turns the rest into [`Error::Service`].
pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::service(status.as_u16(), service_message(status, &body)))
}

/// Decodes a JSON response body.
pub(crate) async fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Extracts the most useful message from an error body.
fn service_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody::Nested { error }) => error.message,
        Ok(ErrorBody::Flat { message }) => message,
        Err(_) if !body.trim().is_empty() => body.trim().chars().take(1024).collect(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}
