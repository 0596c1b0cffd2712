use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::DomainError;

/// Generation can take a while on local models.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Longest slice of an error body kept in logs and error messages.
const MAX_ERROR_BODY: usize = 512;

pub fn http_client() -> reqwest::Client {
    http_client_with_timeout(REQUEST_TIMEOUT)
}

fn http_client_with_timeout(timeout: Duration) -> reqwest::Client {
    match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            warn!("Failed to build HTTP client with a {timeout:?} timeout, using defaults: {e}");
            reqwest::Client::new()
        }
    }
}

/// Join a base URL and an API path without doubling the slash.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Turn a provider response into its decoded JSON body, mapping transport,
/// status and decoding failures to [`DomainError::Llm`].
pub async fn read_json<T: DeserializeOwned>(
    provider: &str,
    sent: Result<reqwest::Response, reqwest::Error>,
) -> Result<T, DomainError> {
    let response =
        sent.map_err(|e| DomainError::llm(format!("{provider}: request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let body = truncate(&body);
        warn!("{provider}: API returned {status}: {body}");
        return Err(DomainError::llm(format!(
            "{provider}: API returned {status}: {body}"
        )));
    }

    response
        .json()
        .await
        .map_err(|e| DomainError::llm(format!("{provider}: failed to parse response: {e}")))
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_server;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    #[test]
    fn endpoint_trims_trailing_slash() {
        assert_eq!(
            endpoint("http://localhost:11434/", "/api/chat"),
            "http://localhost:11434/api/chat"
        );
        assert_eq!(
            endpoint("https://api.openai.com", "/v1/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn slow_provider_hits_the_timeout() {
        let router = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({}))
            }),
        );
        let base = spawn_server(router).await;

        let client = http_client_with_timeout(Duration::from_millis(100));
        let sent = client.get(endpoint(&base, "/slow")).send().await;
        let err = read_json::<Value>("SlowProvider", sent).await.unwrap_err();

        assert!(err.is_llm_error());
        assert!(err.to_string().contains("request failed"));
    }

    #[tokio::test]
    async fn error_status_is_an_llm_error() {
        let router = Router::new().route(
            "/down",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
        );
        let base = spawn_server(router).await;

        let sent = http_client().get(endpoint(&base, "/down")).send().await;
        let err = read_json::<Value>("DownProvider", sent).await.unwrap_err();

        assert!(err.is_llm_error());
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("overloaded"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let long = "é".repeat(MAX_ERROR_BODY + 10);
        assert_eq!(truncate(&long).chars().count(), MAX_ERROR_BODY);
        assert_eq!(truncate("short"), "short");
    }
}
