use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use mime::Mime;
use std::time::Duration;
use thiserror::Error;

/// Raw HTTP response as seen by the scrapers
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded with the charset named in `Content-Type`, UTF-8 otherwise
    pub fn text(&self) -> String {
        let encoding = self
            .content_type
            .as_deref()
            .and_then(|ct| ct.parse::<Mime>().ok())
            .and_then(|parsed| parsed.get_param(mime::CHARSET).map(|c| c.as_str().to_string()))
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(UTF_8);
        let (text, _, _) = encoding.decode(&self.body);
        text.into_owned()
    }
}

/// Why a single request produced no usable response
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Transport used for the listing page and its images.
/// Keeps the network behind a seam so runs can be replayed in tests.
#[async_trait]
pub trait PageClient: Send + Sync {
    /// Issue one GET request, following redirects
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, FetchError>;
}

/// GET that treats any non-2xx status as a failure
pub async fn get_ok<C>(client: &C, url: &str, timeout: Duration) -> Result<HttpResponse, FetchError>
where
    C: PageClient + ?Sized,
{
    let response = client.get(url, timeout).await?;
    if !response.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }
    Ok(response)
}
