use crate::scrapers::traits::{FetchError, HttpResponse, PageClient};
use crate::scrapers::types::ScrapeConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// `reqwest`-backed client sending the configured browser headers
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client that sends `config.headers` with every request
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .with_context(|| format!("Invalid header name: {name}"))?;
            let value = HeaderValue::from_str(value)
                .with_context(|| format!("Invalid value for header {name}"))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    fn classify(url: &str, timeout: Duration, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source: Box::new(err),
            }
        }
    }
}

#[async_trait]
impl PageClient for HttpClient {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, FetchError> {
        debug!(url = %url, ?timeout, "GET");

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Self::classify(url, timeout, e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::classify(url, timeout, e))?;

        debug!(url = %url, status, bytes = body.len(), "Response received");

        Ok(HttpResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_default_headers() {
        assert!(HttpClient::new(&ScrapeConfig::default()).is_ok());
    }

    #[test]
    fn test_new_rejects_invalid_header() {
        let config = ScrapeConfig {
            headers: vec![("Bad Header".to_string(), "x".to_string())],
            ..Default::default()
        };
        assert!(HttpClient::new(&config).is_err());
    }
}
