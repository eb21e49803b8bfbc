use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::generator::DEFAULT_MEASUREMENT;
use crate::simulation::{vineyard_sensors, CivilOffset, SensorSpec};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub generator: GeneratorConfig,
    pub influxdb: InfluxDbConfig,
    #[serde(default = "vineyard_sensors")]
    pub sensors: Vec<SensorSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Canonical civil offset in whole hours east of UTC
    pub utc_offset_hours: CivilOffset,
}

/// Batch step and streaming cadence are independent knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub measurement: String,
    pub step_minutes: i64,
    pub cadence_seconds: u64,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfluxDbConfig {
    pub url: String,
    pub org: String,
    pub bucket: String,
    pub token: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig {
                utc_offset_hours: CivilOffset::default(),
            },
            generator: GeneratorConfig {
                measurement: DEFAULT_MEASUREMENT.to_string(),
                step_minutes: 60,
                cadence_seconds: 5,
                seed: None,
            },
            influxdb: InfluxDbConfig {
                url: "http://localhost:8086".to_string(),
                org: "vineyard".to_string(),
                bucket: "vineyard".to_string(),
                token: String::new(),
                timeout_seconds: 10,
            },
            sensors: vineyard_sensors(),
        }
    }
}

impl Config {
    pub fn offset(&self) -> CivilOffset {
        self.site.utc_offset_hours
    }

    /// Built-in defaults, then `config/default.toml`, then `VSIM__*` environment variables
    pub fn load() -> Result<Self> {
        Self::figment("config/default.toml")
            .extract()
            .context("invalid configuration")
    }

    pub fn figment(path: &str) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("VSIM__").split("__"))
    }
}
