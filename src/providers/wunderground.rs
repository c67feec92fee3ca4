//! Weather Underground live provider
//!
//! Scrapes the station history page for the embedded current-observation
//! JSON. The page carries no stability guarantee, so any markup drift
//! degrades to an empty result instead of an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::Location;
use crate::models::Observation;
use crate::providers::{
    check_status, Capability, FetchWindow, Provider, ProviderError, ProviderResult,
    HTTP_TIMEOUT_SECS,
};

const DEFAULT_BASE_URL: &str = "https://www.wunderground.com";

#[derive(Debug)]
pub struct WundergroundProvider {
    client: Client,
    base_url: String,
}

impl WundergroundProvider {
    pub fn new() -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Pull the latest observation out of the page's embedded JSON.
///
/// `obsTimeUtc` is the anchor: without it there is no usable observation
/// and the caller falls back to an empty result.
fn parse_observation(html: &str, source: &str) -> Option<Observation> {
    let time = extract_string(html, "obsTimeUtc")?;

    Some(Observation {
        wind_speed: extract_number(html, "windspd"),
        wind_dir: extract_number(html, "winddir"),
        temp: extract_number(html, "temp"),
        pressure: extract_number(html, "pressure"),
        humidity: extract_number(html, "humidity"),
        ..Observation::new(time, source)
    })
}

/// First occurrence of `"key":"<value>"` in the document.
fn extract_string(html: &str, key: &str) -> Option<String> {
    let marker = format!("\"{}\":\"", key);
    let start = html.find(&marker)? + marker.len();
    let rest = &html[start..];
    let end = rest.find('"')?;
    let value = &rest[..end];
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

/// First occurrence of `"key":<number>` in the document.
fn extract_number(html: &str, key: &str) -> Option<f64> {
    let marker = format!("\"{}\":", key);
    let start = html.find(&marker)? + marker.len();
    let rest = &html[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '-' && c != '.')
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

#[async_trait]
impl Provider for WundergroundProvider {
    fn source(&self) -> &'static str {
        "wunderground"
    }

    fn capability(&self) -> Capability {
        Capability::Live
    }

    #[instrument(skip(self, location, window))]
    async fn fetch(
        &self,
        location: &Location,
        window: &FetchWindow,
    ) -> ProviderResult<Vec<Observation>> {
        if *window != FetchWindow::Now {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/history/daily/gr/santorini/{}",
            self.base_url, location.station
        );
        debug!(url = %url, "fetching Weather Underground page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        check_status(response.status())?;

        let html = response
            .text()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        match parse_observation(&html, self.source()) {
            Some(row) => Ok(vec![row]),
            None => {
                warn!("no observation found in Weather Underground page, markup may have changed");
                Ok(Vec::new())
            }
        }
    }
}
