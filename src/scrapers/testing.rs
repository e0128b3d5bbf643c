use crate::scrapers::traits::{FetchError, HttpResponse, PageClient};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

enum Scripted {
    Respond(HttpResponse),
    Timeout,
}

/// Replays canned responses and records every requested URL.
/// Unknown URLs fail as a refused connection.
#[derive(Default)]
pub struct MockClient {
    routes: HashMap<String, Scripted>,
    requests: Mutex<Vec<(String, Duration)>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, status: u16, content_type: Option<&str>, body: &[u8]) -> Self {
        self.routes.insert(
            url.to_string(),
            Scripted::Respond(HttpResponse {
                status,
                content_type: content_type.map(str::to_string),
                body: body.to_vec(),
            }),
        );
        self
    }

    pub fn html(self, url: &str, html: &str) -> Self {
        self.respond(url, 200, Some("text/html; charset=utf-8"), html.as_bytes())
    }

    pub fn timeout(mut self, url: &str) -> Self {
        self.routes.insert(url.to_string(), Scripted::Timeout);
        self
    }

    pub fn requests(&self) -> Vec<(String, Duration)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageClient for MockClient {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, FetchError> {
        self.requests.lock().unwrap().push((url.to_string(), timeout));
        match self.routes.get(url) {
            Some(Scripted::Respond(response)) => Ok(response.clone()),
            Some(Scripted::Timeout) => Err(FetchError::Timeout {
                url: url.to_string(),
                timeout,
            }),
            None => Err(FetchError::Transport {
                url: url.to_string(),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )),
            }),
        }
    }
}
