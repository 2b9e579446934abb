//! HTTP client for the bestseller data API.

use crate::api::models::{ApiPage, Listing};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::RngExt;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;

/// Trait for bestseller API access - enables mocking for tests.
#[async_trait]
pub trait BestsellerApi: Send + Sync {
    /// Fetches the unfiltered listing used for country discovery.
    async fn discover(&self) -> Result<Vec<Listing>>;

    /// Fetches one page of a country's bestseller listing.
    async fn page(&self, country: &str, page: u32) -> Result<Vec<Listing>>;
}

/// API client with per-request timeout and inter-request throttling.
pub struct ApiClient {
    client: Client,
    base_url: String,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl ApiClient {
    /// Creates a new API client from the given configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.api_base.clone(),
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        })
    }

    /// Performs a GET request and parses the listing payload.
    async fn get_listings(&self, url: &str) -> Result<Vec<Listing>> {
        // Throttle before touching the remote service
        self.delay().await;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        let body = response.text().await.context("Failed to read response body")?;
        let page: ApiPage =
            serde_json::from_str(&body).context("Response is not a valid listing payload")?;

        Ok(page.data)
    }

    /// Waits out the inter-request delay, plus jitter when configured.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[async_trait]
impl BestsellerApi for ApiClient {
    async fn discover(&self) -> Result<Vec<Listing>> {
        let url = format!("{}/data", self.base_url);

        info!("Discovering country segments");
        self.get_listings(&url).await
    }

    async fn page(&self, country: &str, page: u32) -> Result<Vec<Listing>> {
        let url = format!(
            "{}/data?country={}&page={}",
            self.base_url,
            urlencoding::encode(country),
            page
        );

        debug!("Fetching {} page {}", country, page);
        self.get_listings(&url).await
    }
}
