use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

// Accept-Encoding is left to reqwest so responses get decompressed.
const REQUEST_HEADERS: &[(&str, &str)] = &[
    ("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    ("accept-language", "es-ES,es;q=0.9"),
    ("cache-control", "no-cache"),
    ("sec-ch-ua", r#""Not(A:Brand";v="99", "Google Chrome";v="133", "Chromium";v="133""#),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", r#""Windows""#),
    ("upgrade-insecure-requests", "1"),
    (
        "user-agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36",
    ),
];

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("connection error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Source of listing page markup, one call per (category, page).
pub trait PageFetcher {
    fn fetch_page(&self, category: &str, page: u32) -> Result<String, FetchError>;
}

pub fn page_url(base_url: &str, category: &str, page: u32) -> String {
    format!("{}/{}.html?p={}", base_url.trim_end_matches('/'), category, page)
}

pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .default_headers(default_headers(base_url)?)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpFetcher {
            client,
            base_url: base_url.to_string(),
        })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch_page(&self, category: &str, page: u32) -> Result<String, FetchError> {
        let url = page_url(&self.base_url, category, page);
        debug!("GET {}", url);

        let network = |e: reqwest::Error| FetchError::Network {
            url: url.clone(),
            source: Box::new(e),
        };

        let response = self.client.get(&url).send().map_err(network)?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }
        response.text().map_err(network)
    }
}

fn default_headers(base_url: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in REQUEST_HEADERS {
        headers.insert(
            HeaderName::from_static(*name),
            HeaderValue::from_static(*value),
        );
    }
    let referer = format!("{}/", base_url.trim_end_matches('/'));
    headers.insert(
        header::REFERER,
        HeaderValue::from_str(&referer).with_context(|| format!("Invalid referer: {}", referer))?,
    );
    Ok(headers)
}
