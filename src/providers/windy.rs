//! Windy point-forecast provider
//!
//! Historical surface data from the Windy point-forecast API. Gated on
//! `WINDY_API_KEY`; without a key the provider is a no-op.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::Location;
use crate::models::Observation;
use crate::providers::{
    check_status, value_at, Capability, FetchWindow, Provider, ProviderError, ProviderResult,
    HTTP_TIMEOUT_SECS,
};

const DEFAULT_BASE_URL: &str = "https://api.windy.com";

#[derive(Debug)]
pub struct WindyProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl WindyProvider {
    pub fn new(api_key: Option<String>) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct PointForecastRequest<'a> {
    lat: f64,
    lon: f64,
    model: &'a str,
    parameters: [&'a str; 4],
    levels: [&'a str; 1],
    start: String,
    end: String,
}

/// Parallel series keyed by unix-second timestamps.
#[derive(Debug, Default, Deserialize)]
struct PointForecastResponse {
    #[serde(default)]
    ts: Vec<i64>,
    #[serde(default)]
    wind: Vec<Option<f64>>,
    #[serde(default)]
    temp: Vec<Option<f64>>,
    #[serde(default)]
    pressure: Vec<Option<f64>>,
    #[serde(default)]
    rh: Vec<Option<f64>>,
}

impl PointForecastResponse {
    fn into_observations(self, source: &str) -> Vec<Observation> {
        self.ts
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let time = DateTime::from_timestamp(ts, 0)?
                    .format("%Y-%m-%dT%H:%M:%SZ")
                    .to_string();
                Some(Observation {
                    wind_speed: value_at(&self.wind, i),
                    temp: value_at(&self.temp, i),
                    pressure: value_at(&self.pressure, i),
                    humidity: value_at(&self.rh, i),
                    ..Observation::new(time, source)
                })
            })
            .collect()
    }
}

#[async_trait]
impl Provider for WindyProvider {
    fn source(&self) -> &'static str {
        "windy"
    }

    fn capability(&self) -> Capability {
        Capability::Historical
    }

    #[instrument(skip(self, location, window))]
    async fn fetch(
        &self,
        location: &Location,
        window: &FetchWindow,
    ) -> ProviderResult<Vec<Observation>> {
        let Some(api_key) = &self.api_key else {
            info!("WINDY_API_KEY not set, skipping Windy fetch");
            return Ok(Vec::new());
        };
        let FetchWindow::Range { start, end } = *window else {
            return Ok(Vec::new());
        };

        let body = PointForecastRequest {
            lat: location.latitude,
            lon: location.longitude,
            model: "gfs",
            parameters: ["wind", "temp", "pressure", "rh"],
            levels: ["surface"],
            start: start.to_string(),
            end: end.to_string(),
        };

        let url = format!("{}/api/point-forecast/v2", self.base_url);
        debug!(url = %url, model = body.model, "fetching Windy point forecast");

        let response = self
            .client
            .post(&url)
            .header("x-windy-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        check_status(response.status())?;

        let payload: PointForecastResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(payload.into_observations(self.source()))
    }
}
