pub mod meteostat;
pub mod open_meteo;
pub mod windy;
pub mod wunderground;

pub use meteostat::MeteostatProvider;
pub use open_meteo::OpenMeteoProvider;
pub use windy::WindyProvider;
pub use wunderground::WundergroundProvider;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{Credentials, Location};
use crate::models::Observation;
use crate::utils::ProgressReporter;

/// Timeout applied to every provider HTTP call.
pub(crate) const HTTP_TIMEOUT_SECS: u64 = 30;

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Provider failures. All of these are recovered inside the collection
/// loop; none of them aborts a run.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// What a provider can fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Historical,
    Live,
}

/// The span requested from a provider: a closed historical date range, or
/// the latest observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchWindow {
    Range { start: NaiveDate, end: NaiveDate },
    Now,
}

/// One external weather data source, normalized to observation rows.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Source tag stamped on every row this provider produces.
    fn source(&self) -> &'static str;

    fn capability(&self) -> Capability;

    /// Fetch observations for the location. Providers gated on an absent
    /// credential return an empty sequence rather than an error, and no
    /// provider writes anything beyond its returned rows.
    async fn fetch(
        &self,
        location: &Location,
        window: &FetchWindow,
    ) -> ProviderResult<Vec<Observation>>;
}

/// The default provider set, in invocation order.
pub fn default_providers(credentials: &Credentials) -> ProviderResult<Vec<Box<dyn Provider>>> {
    Ok(vec![
        Box::new(OpenMeteoProvider::new()?),
        Box::new(MeteostatProvider::new(credentials.meteostat_api_key.clone())?),
        Box::new(WindyProvider::new(credentials.windy_api_key.clone())?),
        Box::new(WundergroundProvider::new()?),
    ])
}

/// Invoke every provider sequentially with the window matching its
/// capability and concatenate the results in invocation order.
///
/// A provider failure is logged and contributes an empty sequence; it
/// never aborts the run or its sibling providers.
pub async fn collect_observations(
    providers: &[Box<dyn Provider>],
    location: &Location,
    start: NaiveDate,
    end: NaiveDate,
    progress: Option<&ProgressReporter>,
) -> Vec<Observation> {
    let mut rows = Vec::new();

    for provider in providers {
        if let Some(progress) = progress {
            progress.set_message(&format!("Fetching {}...", provider.source()));
        }

        let window = match provider.capability() {
            Capability::Historical => FetchWindow::Range { start, end },
            Capability::Live => FetchWindow::Now,
        };

        match provider.fetch(location, &window).await {
            Ok(batch) => {
                info!(source = provider.source(), rows = batch.len(), "fetch complete");
                rows.extend(batch);
            }
            Err(err) => {
                warn!(source = provider.source(), error = %err, "fetch failed, continuing");
            }
        }
    }

    rows
}

/// Map HTTP status classes onto the provider error taxonomy.
pub(crate) fn check_status(status: reqwest::StatusCode) -> ProviderResult<()> {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimitExceeded);
    }
    if status.is_server_error() {
        return Err(ProviderError::ServiceUnavailable(format!("HTTP {status}")));
    }
    if !status.is_success() {
        return Err(ProviderError::RequestFailed(format!("HTTP {status}")));
    }
    Ok(())
}

/// Index into a parallel value array, treating short arrays and JSON
/// nulls alike as missing.
pub(crate) fn value_at(series: &[Option<f64>], index: usize) -> Option<f64> {
    series.get(index).copied().flatten()
}
