use std::env;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;

/// Environment variable holding the Meteostat API key.
pub const METEOSTAT_KEY_ENV: &str = "METEOSTAT_API_KEY";

/// Environment variable holding the Windy API key.
pub const WINDY_KEY_ENV: &str = "WINDY_API_KEY";

/// Environment variable overriding the default weather station.
pub const METEOSTAT_STATION_ENV: &str = "METEOSTAT_STATION";

/// The fixed collection point. Defaults to Monolithos, Santorini.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Location {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    /// Station identifier used by station-based providers.
    #[validate(length(min = 1))]
    pub station: String,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            latitude: 36.401,
            longitude: 25.479,
            station: "LGSR".to_string(),
        }
    }
}

/// Optional API keys for the credential-gated providers.
///
/// A missing key disables the corresponding provider; it is not an error.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub meteostat_api_key: Option<String>,
    pub windy_api_key: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            meteostat_api_key: non_empty_var(METEOSTAT_KEY_ENV),
            windy_api_key: non_empty_var(WINDY_KEY_ENV),
        }
    }
}

/// Collector configuration, constructed once at startup so that no
/// provider performs ad-hoc environment lookups.
#[derive(Debug, Clone)]
pub struct Settings {
    pub location: Location,
    pub credentials: Credentials,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let mut location = Location::default();
        if let Some(station) = non_empty_var(METEOSTAT_STATION_ENV) {
            location.station = station;
        }
        location.validate()?;

        Ok(Self {
            location,
            credentials: Credentials::from_env(),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_location_is_valid() {
        let location = Location::default();
        assert!(location.validate().is_ok());
        assert_eq!(location.station, "LGSR");
    }

    #[test]
    fn test_invalid_coordinates_rejected() {
        let location = Location {
            latitude: 91.0,
            ..Location::default()
        };
        assert!(location.validate().is_err());
    }

    #[test]
    fn test_blank_credential_treated_as_absent() {
        env::set_var("MONOLITHOS_TEST_BLANK_KEY", "   ");
        assert_eq!(non_empty_var("MONOLITHOS_TEST_BLANK_KEY"), None);
        env::remove_var("MONOLITHOS_TEST_BLANK_KEY");

        assert_eq!(non_empty_var("MONOLITHOS_TEST_UNSET_KEY"), None);
    }
}
