use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Показание датчика холодильного оборудования
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub unit: String,
    pub celsius: f64,
    #[serde(rename = "minCelsius")]
    pub min_celsius: f64,
    #[serde(rename = "maxCelsius")]
    pub max_celsius: f64,
    #[serde(rename = "measuredAt")]
    pub measured_at: DateTime<Utc>,
}

impl TemperatureReading {
    pub fn in_range(&self) -> bool {
        self.celsius >= self.min_celsius && self.celsius <= self.max_celsius
    }
}
