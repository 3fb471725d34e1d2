use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::USER_AGENT, Client, RequestBuilder};
use serde::Serialize;
use url::Url;

use crate::configuration::ScrapingSettings;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub body: String,
    /// Raw HTTP responses carry no title; the scraper reads it from markup.
    pub title: Option<String>,
}

/// The only failure that aborts a pipeline run. Its message is shown to callers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchFailure {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("unsupported URL scheme `{0}`, expected http or https")]
    UnsupportedScheme(String),
    #[error("fetching {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },
    #[error("fetching {url} failed: {reason}")]
    Request { url: String, reason: String },
    #[error("no content found at {0}")]
    Empty(String),
}

/// Content retrieval backend. Handles are shared across concurrent requests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<FetchedPage, FetchFailure>;
}

/// ScrapingAnt's `general` endpoint, which can render JavaScript behind a proxy.
pub struct ScrapingAntClient {
    client: Client,
    api_key: String,
    url: String,
    render_js: bool,
    proxy_type: String,
    proxy_country: String,
}

#[derive(Serialize)]
struct GeneralQuery<'a> {
    url: &'a str,
    browser: bool,
    proxy_type: &'a str,
    proxy_country: &'a str,
}

impl ScrapingAntClient {
    pub fn new(api_key: String, settings: &ScrapingSettings) -> Self {
        ScrapingAntClient {
            client: Client::new(),
            api_key,
            url: settings.endpoint.clone(),
            render_js: settings.render_js,
            proxy_type: settings.proxy_type.clone(),
            proxy_country: settings.proxy_country.clone(),
        }
    }
}

#[async_trait]
impl PageFetcher for ScrapingAntClient {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<FetchedPage, FetchFailure> {
        let request = self
            .client
            .get(self.url.as_str())
            .header("x-api-key", self.api_key.as_str())
            .query(&GeneralQuery {
                url: url.as_str(),
                browser: self.render_js,
                proxy_type: &self.proxy_type,
                proxy_country: &self.proxy_country,
            });

        let body = send_for_text(request, url, timeout).await?;
        Ok(FetchedPage { body, title: None })
    }
}

/// Plain GET against the target site, used when no ScrapingAnt key is set.
#[derive(Default)]
pub struct DirectFetcher {
    client: Client,
}

impl DirectFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PageFetcher for DirectFetcher {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<FetchedPage, FetchFailure> {
        let request = self
            .client
            .get(url.as_str())
            .header(USER_AGENT, BROWSER_USER_AGENT);

        let body = send_for_text(request, url, timeout).await?;
        Ok(FetchedPage { body, title: None })
    }
}

async fn send_for_text(
    request: RequestBuilder,
    url: &Url,
    timeout: Duration,
) -> Result<String, FetchFailure> {
    let to_failure = |e: reqwest::Error| match e.is_timeout() {
        true => FetchFailure::Timeout {
            url: url.to_string(),
            secs: timeout.as_secs(),
        },
        false => FetchFailure::Request {
            url: url.to_string(),
            reason: e.to_string(),
        },
    };

    let response = request.timeout(timeout).send().await.map_err(to_failure)?;

    let status = response.status();
    if !status.is_success() {
        log::error!("Fetching {} returned status {}", url, status);
        return Err(FetchFailure::Request {
            url: url.to_string(),
            reason: format!("status {}", status),
        });
    }

    response.text().await.map_err(to_failure)
}
