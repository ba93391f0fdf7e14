//! Marketplace HTTP client.

use std::time::Duration;

use roster_core::catalog::parse_market;
use roster_core::{Catalog, CatalogError, CatalogSource, RosterConfig};

/// Blocking marketplace client. One `fetch` is one GET, no retries.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    url: String,
    timeout: Duration,
    probable_status: u32,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        let defaults = RosterConfig::default();
        Self {
            url: url.into(),
            timeout: Duration::from_secs(defaults.request_timeout_secs),
            probable_status: defaults.probable_status_id,
        }
    }

    pub fn from_config(config: &RosterConfig) -> Self {
        Self {
            url: config.catalog_url.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
            probable_status: config.probable_status_id,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn net_err(e: reqwest::Error) -> CatalogError {
    CatalogError::Network(e.to_string())
}

impl CatalogSource for HttpCatalog {
    fn fetch(&self) -> Result<Catalog, CatalogError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .gzip(true)
            .build()
            .map_err(net_err)?;

        log::info!("Fetching marketplace from {}", self.url);
        let response = client.get(&self.url).send().map_err(net_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status { status: status.as_u16() });
        }

        let body = response.text().map_err(net_err)?;
        log::debug!("Marketplace response: {} bytes", body.len());

        parse_market(&body, self.probable_status)
    }
}
