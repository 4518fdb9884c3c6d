//! The scrape module downloads pages over HTTP and converts them to plain text.

use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use crate::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::error::{FetchError, PageError};
use crate::parse::convert_to_text;

/// Settings for the HTTP client used to download pages.
#[derive(Clone, Debug)]
pub struct FetcherConfig {
    /// Upper bound for a single request, body included.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// A downloaded response that passed the status check.
#[derive(Debug)]
pub struct Download {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Downloads pages one at a time and turns them into text.
pub struct PageScraper {
    client: Client,
}

impl PageScraper {
    /// Creates a scraper with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Unable to build HTTP client")?;

        Ok(Self { client })
    }

    /// Downloads the given URL and returns its visible text.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Fetch`] if the request fails or the status is not a
    /// success, and [`PageError::Conversion`] if the body cannot be converted.
    pub async fn scrape(&self, url: &str) -> Result<String, PageError> {
        let download = self.download_page(url).await?;
        let text = convert_to_text(download.content_type.as_deref(), &download.body)?;
        Ok(text)
    }

    /// Downloads the given URL, rejecting redirect, client and server statuses.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or times out, the status is 3xx,
    /// 4xx or 5xx, or the body cannot be read.
    pub async fn download_page(&self, url: &str) -> Result<Download, FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status().as_u16();
        debug!("Fetched {url} with {status}");

        match status {
            300..=399 => {
                return Err(FetchError::Moved {
                    url: url.to_string(),
                    status,
                });
            }
            400..=499 => {
                return Err(FetchError::ClientRequest {
                    url: url.to_string(),
                    status,
                });
            }
            500.. => {
                return Err(FetchError::Server {
                    url: url.to_string(),
                    status,
                });
            }
            _ => {}
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(transport)?.to_vec();

        Ok(Download { content_type, body })
    }
}
