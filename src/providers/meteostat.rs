//! Meteostat provider
//!
//! Historical hourly station data from the Meteostat API. Gated on
//! `METEOSTAT_API_KEY`; without a key the provider is a no-op.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::config::Location;
use crate::models::Observation;
use crate::providers::{
    check_status, Capability, FetchWindow, Provider, ProviderError, ProviderResult,
    HTTP_TIMEOUT_SECS,
};

const DEFAULT_BASE_URL: &str = "https://api.meteostat.net/v2";

#[derive(Debug)]
pub struct MeteostatProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl MeteostatProvider {
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

#[derive(Debug, Deserialize)]
struct HourlyResponse {
    #[serde(default)]
    data: Vec<HourlyRecord>,
}

#[derive(Debug, Deserialize)]
struct HourlyRecord {
    time: Option<String>,
    wspd: Option<f64>,
    wdir: Option<f64>,
    temp: Option<f64>,
    pres: Option<f64>,
    rhum: Option<f64>,
    prcp: Option<f64>,
}

impl HourlyRecord {
    /// Records without a timestamp cannot become rows; everything else is
    /// optional. Meteostat reports no cloud layers and no cape.
    fn into_observation(self, source: &str) -> Option<Observation> {
        let time = self.time?;
        Some(Observation {
            wind_speed: self.wspd,
            wind_dir: self.wdir,
            temp: self.temp,
            pressure: self.pres,
            humidity: self.rhum,
            precip: self.prcp,
            ..Observation::new(time, source)
        })
    }
}

#[async_trait]
impl Provider for MeteostatProvider {
    fn source(&self) -> &'static str {
        "meteostat"
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
            info!("METEOSTAT_API_KEY not set, skipping Meteostat fetch");
            return Ok(Vec::new());
        };
        let FetchWindow::Range { start, end } = *window else {
            return Ok(Vec::new());
        };

        let url = format!(
            "{}/stations/hourly?station={}&start={}&end={}&tz=UTC",
            self.base_url, location.station, start, end
        );
        debug!(url = %url, "fetching Meteostat hourly data");

        let response = self
            .client
            .get(&url)
            .header("x-api-key", api_key)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        check_status(response.status())?;

        let payload: HourlyResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(payload
            .data
            .into_iter()
            .filter_map(|record| record.into_observation(self.source()))
            .collect())
    }
}
