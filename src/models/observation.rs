use std::fmt;

use serde::{Deserialize, Serialize};

/// Dataset column names, in the exact order rows are written to disk.
///
/// The first line of the dataset file is always this header; consumers
/// reject a file whose header differs.
pub const HEADER: [&str; 12] = [
    "time",
    "wind_speed",
    "wind_dir",
    "temp",
    "pressure",
    "humidity",
    "lclouds",
    "mclouds",
    "hclouds",
    "precip",
    "cape",
    "source",
];

/// One timestamped weather measurement tuple tagged by source.
///
/// Measurements a provider does not report stay `None` and render as an
/// empty CSV field, never as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub time: String,
    pub wind_speed: Option<f64>,
    pub wind_dir: Option<f64>,
    pub temp: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
    pub lclouds: Option<f64>,
    pub mclouds: Option<f64>,
    pub hclouds: Option<f64>,
    pub precip: Option<f64>,
    pub cape: Option<f64>,
    pub source: String,
}

impl Observation {
    /// Create a row with the given timestamp and source tag and no
    /// measurements.
    pub fn new(time: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            wind_speed: None,
            wind_dir: None,
            temp: None,
            pressure: None,
            humidity: None,
            lclouds: None,
            mclouds: None,
            hclouds: None,
            precip: None,
            cape: None,
            source: source.into(),
        }
    }

    /// Identity of a row for de-duplication across collection runs.
    pub fn key(&self) -> (&str, &str) {
        (&self.time, &self.source)
    }

    pub fn value(&self, column: NumericColumn) -> Option<f64> {
        match column {
            NumericColumn::WindSpeed => self.wind_speed,
            NumericColumn::WindDir => self.wind_dir,
            NumericColumn::Temp => self.temp,
            NumericColumn::Pressure => self.pressure,
            NumericColumn::Humidity => self.humidity,
            NumericColumn::LClouds => self.lclouds,
            NumericColumn::MClouds => self.mclouds,
            NumericColumn::HClouds => self.hclouds,
            NumericColumn::Precip => self.precip,
            NumericColumn::Cape => self.cape,
        }
    }

    pub fn set_value(&mut self, column: NumericColumn, value: Option<f64>) {
        match column {
            NumericColumn::WindSpeed => self.wind_speed = value,
            NumericColumn::WindDir => self.wind_dir = value,
            NumericColumn::Temp => self.temp = value,
            NumericColumn::Pressure => self.pressure = value,
            NumericColumn::Humidity => self.humidity = value,
            NumericColumn::LClouds => self.lclouds = value,
            NumericColumn::MClouds => self.mclouds = value,
            NumericColumn::HClouds => self.hclouds = value,
            NumericColumn::Precip => self.precip = value,
            NumericColumn::Cape => self.cape = value,
        }
    }

    pub fn has_measurements(&self) -> bool {
        NumericColumn::ALL
            .iter()
            .any(|&column| self.value(column).is_some())
    }
}

/// The ten numeric dataset columns, in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    WindSpeed,
    WindDir,
    Temp,
    Pressure,
    Humidity,
    LClouds,
    MClouds,
    HClouds,
    Precip,
    Cape,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 10] = [
        NumericColumn::WindSpeed,
        NumericColumn::WindDir,
        NumericColumn::Temp,
        NumericColumn::Pressure,
        NumericColumn::Humidity,
        NumericColumn::LClouds,
        NumericColumn::MClouds,
        NumericColumn::HClouds,
        NumericColumn::Precip,
        NumericColumn::Cape,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NumericColumn::WindSpeed => "wind_speed",
            NumericColumn::WindDir => "wind_dir",
            NumericColumn::Temp => "temp",
            NumericColumn::Pressure => "pressure",
            NumericColumn::Humidity => "humidity",
            NumericColumn::LClouds => "lclouds",
            NumericColumn::MClouds => "mclouds",
            NumericColumn::HClouds => "hclouds",
            NumericColumn::Precip => "precip",
            NumericColumn::Cape => "cape",
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
