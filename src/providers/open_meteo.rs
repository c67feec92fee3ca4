//! Open-Meteo archive provider
//!
//! Historical hourly data from the Open-Meteo archive API. Always
//! available, no credential required.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::Location;
use crate::models::Observation;
use crate::providers::{
    check_status, value_at, Capability, FetchWindow, Provider, ProviderError, ProviderResult,
    HTTP_TIMEOUT_SECS,
};

const DEFAULT_BASE_URL: &str = "https://archive-api.open-meteo.com/v1";

/// Hourly variables requested from the archive, matching the dataset's
/// numeric columns one to one.
const HOURLY_VARIABLES: &str = "windspeed_10m,winddirection_10m,temperature_2m,pressure_msl,\
                                relativehumidity_2m,cloudcover_low,cloudcover_mid,\
                                cloudcover_high,precipitation,cape";

#[derive(Debug)]
pub struct OpenMeteoProvider {
    client: Client,
    base_url: String,
}

impl OpenMeteoProvider {
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

    /// Point the provider at a different host (used by the mock-server
    /// tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_archive_url(&self, location: &Location, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/archive?latitude={}&longitude={}&hourly={}&timezone=UTC&start_date={}&end_date={}",
            self.base_url, location.latitude, location.longitude, HOURLY_VARIABLES, start, end
        )
    }
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    hourly: Option<HourlySeries>,
}

/// Parallel hourly arrays as returned by the archive API. Arrays may be
/// shorter than `time` or hold nulls; both read as missing values.
#[derive(Debug, Default, Deserialize)]
struct HourlySeries {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    windspeed_10m: Vec<Option<f64>>,
    #[serde(default)]
    winddirection_10m: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pressure_msl: Vec<Option<f64>>,
    #[serde(default)]
    relativehumidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    cloudcover_low: Vec<Option<f64>>,
    #[serde(default)]
    cloudcover_mid: Vec<Option<f64>>,
    #[serde(default)]
    cloudcover_high: Vec<Option<f64>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
    #[serde(default)]
    cape: Vec<Option<f64>>,
}

impl HourlySeries {
    fn into_observations(self, source: &str) -> Vec<Observation> {
        self.time
            .iter()
            .enumerate()
            .map(|(i, time)| Observation {
                wind_speed: value_at(&self.windspeed_10m, i),
                wind_dir: value_at(&self.winddirection_10m, i),
                temp: value_at(&self.temperature_2m, i),
                pressure: value_at(&self.pressure_msl, i),
                humidity: value_at(&self.relativehumidity_2m, i),
                lclouds: value_at(&self.cloudcover_low, i),
                mclouds: value_at(&self.cloudcover_mid, i),
                hclouds: value_at(&self.cloudcover_high, i),
                precip: value_at(&self.precipitation, i),
                cape: value_at(&self.cape, i),
                ..Observation::new(time.clone(), source)
            })
            .collect()
    }
}

#[async_trait]
impl Provider for OpenMeteoProvider {
    fn source(&self) -> &'static str {
        "openmeteo"
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
        let FetchWindow::Range { start, end } = *window else {
            return Ok(Vec::new());
        };

        let url = self.build_archive_url(location, start, end);
        debug!(url = %url, "fetching Open-Meteo archive");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        check_status(response.status())?;

        let payload: ArchiveResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(payload
            .hourly
            .map(|hourly| hourly.into_observations(self.source()))
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_archive_url() {
        let provider = OpenMeteoProvider::new().unwrap();
        let location = Location::default();
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 1, 31).unwrap();

        let url = provider.build_archive_url(&location, start, end);

        assert!(url.starts_with("https://archive-api.open-meteo.com/v1/archive?"));
        assert!(url.contains("latitude=36.401"));
        assert!(url.contains("longitude=25.479"));
        assert!(url.contains("start_date=2020-01-01"));
        assert!(url.contains("end_date=2020-01-31"));
        assert!(url.contains("hourly=windspeed_10m,"));
        assert!(url.contains("timezone=UTC"));
    }

    #[test]
    fn test_hourly_series_zips_index_wise() {
        let series = HourlySeries {
            time: vec!["2020-01-01T00:00".to_string(), "2020-01-01T01:00".to_string()],
            windspeed_10m: vec![Some(10.0), Some(12.0)],
            temperature_2m: vec![Some(18.5), None],
            // Shorter than `time`: second row reads as missing.
            cape: vec![Some(120.0)],
            ..HourlySeries::default()
        };

        let rows = series.into_observations("openmeteo");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time, "2020-01-01T00:00");
        assert_eq!(rows[0].wind_speed, Some(10.0));
        assert_eq!(rows[0].temp, Some(18.5));
        assert_eq!(rows[0].cape, Some(120.0));
        assert_eq!(rows[0].source, "openmeteo");

        assert_eq!(rows[1].wind_speed, Some(12.0));
        assert_eq!(rows[1].temp, None);
        assert_eq!(rows[1].cape, None);
        assert_eq!(rows[1].precip, None);
    }
}
