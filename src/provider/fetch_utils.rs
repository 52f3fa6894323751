//! Generic HTTP fetching with retry logic and typed error mapping

use reqwest::Client;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::constants::retry;
use crate::error::AppError;

/// How long to wait before the next attempt: the provider's `Retry-After`
/// seconds when present, otherwise `backoff`. Never more than `retry::MAX_DELAY_MS`.
fn retry_wait(headers: &HeaderMap, backoff: Duration) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(backoff)
        .min(Duration::from_millis(retry::MAX_DELAY_MS))
}

/// Fetches `url` and parses the body as JSON.
///
/// Transient failures (429, 5xx, timeouts, refused connections) are retried
/// with exponential backoff, honouring `Retry-After` when the provider sends
/// one. Everything else is mapped to a specific [`AppError`].
#[instrument(skip(client))]
pub async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    info!("Fetching data from URL: {url}");

    let mut attempt = 0u32;
    let mut backoff = Duration::from_millis(retry::BASE_DELAY_MS);
    let response = loop {
        match client.get(url).send().await {
            Ok(resp) => {
                let status = resp.status();
                if (status.as_u16() == 429 || status.is_server_error())
                    && attempt < retry::MAX_RETRIES
                {
                    let wait = retry_wait(resp.headers(), backoff);
                    warn!(
                        "Transient {} from {}. Retrying in {:?} (attempt {}/{})",
                        status,
                        url,
                        wait,
                        attempt + 1,
                        retry::MAX_RETRIES
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                    backoff = backoff.saturating_mul(2);
                    continue;
                }
                break resp;
            }
            Err(e) => {
                if (e.is_timeout() || e.is_connect()) && attempt < retry::MAX_RETRIES {
                    warn!(
                        "Request error {} for {}. Retrying in {:?} (attempt {}/{})",
                        e,
                        url,
                        backoff,
                        attempt + 1,
                        retry::MAX_RETRIES
                    );
                    tokio::time::sleep(backoff.min(Duration::from_millis(retry::MAX_DELAY_MS)))
                        .await;
                    attempt += 1;
                    backoff = backoff.saturating_mul(2);
                    continue;
                }
                error!("Request failed for URL {}: {}", url, e);
                return if e.is_timeout() {
                    Err(AppError::network_timeout(url))
                } else if e.is_connect() {
                    Err(AppError::network_connection(url, e.to_string()))
                } else {
                    Err(AppError::ApiFetch(e))
                };
            }
        }
    };

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");

        error!("HTTP {} - {} (URL: {})", status_code, reason, url);

        return Err(match status_code {
            404 => AppError::api_not_found(url),
            429 => AppError::api_rate_limit(reason, url),
            400..=499 => AppError::api_client_error(status_code, reason, url),
            502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
            _ => AppError::api_server_error(status_code, reason, url),
        });
    }

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::ApiFetch(e));
        }
    };

    debug!("Response length: {} bytes", response_text.len());

    match serde_json::from_str::<T>(&response_text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse provider response: {} (URL: {})", e, url);
            error!(
                "Response text (first 200 chars): {}",
                &response_text.chars().take(200).collect::<String>()
            );

            let trimmed = response_text.trim_start();
            if trimmed.is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                Err(AppError::api_malformed_json(
                    "Response is not valid JSON",
                    url,
                ))
            } else if e.is_syntax() || e.is_eof() {
                Err(AppError::api_malformed_json(e.to_string(), url))
            } else {
                // Valid JSON but unexpected structure
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::http_client::create_test_http_client;
    use serde::Deserialize;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ping {
        ok: bool,
    }

    async fn server_with(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[test]
    fn test_retry_wait_caps_retry_after() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, "86400".parse().unwrap());
        assert_eq!(
            retry_wait(&headers, Duration::from_millis(250)),
            Duration::from_millis(retry::MAX_DELAY_MS)
        );
    }

    #[test]
    fn test_retry_wait_uses_small_retry_after_or_backoff() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, "2".parse().unwrap());
        assert_eq!(
            retry_wait(&headers, Duration::from_millis(250)),
            Duration::from_secs(2)
        );

        let empty = HeaderMap::new();
        assert_eq!(
            retry_wait(&empty, Duration::from_millis(500)),
            Duration::from_millis(500)
        );
        assert_eq!(
            retry_wait(&empty, Duration::from_secs(3600)),
            Duration::from_millis(retry::MAX_DELAY_MS)
        );
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = server_with(200, r#"{"ok":true}"#).await;
        let client = create_test_http_client();
        let url = format!("{}/ping", mock_server.uri());

        let result: Ping = fetch(&client, &url).await.unwrap();
        assert_eq!(result, Ping { ok: true });
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let mock_server = server_with(404, "").await;
        let client = create_test_http_client();
        let url = format!("{}/ping", mock_server.uri());

        let result = fetch::<Ping>(&client, &url).await;
        assert!(matches!(result, Err(AppError::ApiNotFound { .. })));
    }

    #[tokio::test]
    async fn test_fetch_client_error_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = create_test_http_client();
        let url = format!("{}/ping", mock_server.uri());

        let result = fetch::<Ping>(&client, &url).await;
        assert!(matches!(
            result,
            Err(AppError::ApiClientError { status: 400, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_retries_server_error_then_succeeds() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .mount(&mock_server)
            .await;
        let client = create_test_http_client();
        let url = format!("{}/ping", mock_server.uri());

        let result: Ping = fetch(&client, &url).await.unwrap();
        assert!(result.ok);
    }

    #[tokio::test]
    async fn test_fetch_rate_limit_honours_retry_after() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
            .expect(4)
            .mount(&mock_server)
            .await;
        let client = create_test_http_client();
        let url = format!("{}/ping", mock_server.uri());

        let result = fetch::<Ping>(&client, &url).await;
        assert!(matches!(result, Err(AppError::ApiRateLimit { .. })));
    }

    #[tokio::test]
    async fn test_fetch_service_unavailable_after_retries() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(503).insert_header("Retry-After", "0"))
            .mount(&mock_server)
            .await;
        let client = create_test_http_client();
        let url = format!("{}/ping", mock_server.uri());

        let result = fetch::<Ping>(&client, &url).await;
        let error = result.unwrap_err();
        assert!(matches!(
            error,
            AppError::ApiServiceUnavailable { status: 503, .. }
        ));
        assert!(error.is_retryable());
    }

    #[tokio::test]
    async fn test_fetch_empty_body() {
        let mock_server = server_with(200, "").await;
        let client = create_test_http_client();
        let url = format!("{}/ping", mock_server.uri());

        let result = fetch::<Ping>(&client, &url).await;
        assert!(matches!(result, Err(AppError::ApiNoData { .. })));
    }

    #[tokio::test]
    async fn test_fetch_not_json() {
        let mock_server = server_with(200, "<html>maintenance</html>").await;
        let client = create_test_http_client();
        let url = format!("{}/ping", mock_server.uri());

        let result = fetch::<Ping>(&client, &url).await;
        assert!(matches!(result, Err(AppError::ApiMalformedJson { .. })));
    }

    #[tokio::test]
    async fn test_fetch_unexpected_structure() {
        let mock_server = server_with(200, r#"{"status":"fine"}"#).await;
        let client = create_test_http_client();
        let url = format!("{}/ping", mock_server.uri());

        let result = fetch::<Ping>(&client, &url).await;
        assert!(matches!(
            result,
            Err(AppError::ApiUnexpectedStructure { .. })
        ));
    }
}
