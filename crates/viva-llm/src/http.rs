//! Shared HTTP response helpers for provider clients.
//!
//! Centralizes status-code checks (429 with `Retry-After` parsing,
//! non-success to [`ProviderError::Api`]) so each provider module only builds
//! requests and maps responses.

use std::time::Duration;

use crate::error::ProviderError;

const USER_AGENT: &str = concat!("viva/", env!("CARGO_PKG_VERSION"));

/// Build the shared `reqwest` client used by every provider.
///
/// # Errors
///
/// Returns [`ProviderError::Http`] if the TLS backend cannot be initialized.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`ProviderError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`ProviderError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    if resp.status() == 429 {
        return Err(ProviderError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(ProviderError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, retry_after: Option<&str>, body: &'static str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body(body).unwrap())
    }

    #[test]
    fn retry_after_header_is_used() {
        assert_eq!(parse_retry_after(&response(429, Some("12"), "")), 12);
    }

    #[test]
    fn retry_after_defaults_to_sixty() {
        assert_eq!(parse_retry_after(&response(429, None, "")), 60);
        assert_eq!(parse_retry_after(&response(429, Some("soon"), "")), 60);
    }

    #[tokio::test]
    async fn rate_limit_is_reported() {
        let err = check_response(response(429, Some("5"), "")).await.unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited { retry_after_secs: 5 }));
    }

    #[tokio::test]
    async fn api_error_keeps_body() {
        let err = check_response(response(401, None, "invalid api key"))
            .await
            .unwrap_err();
        match err {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid api key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(response(200, None, "{}")).await.is_ok());
    }
}
