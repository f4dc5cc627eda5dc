use crate::application::normalizer::ExtentBand;
use crate::application::summary::DEFAULT_PRECISION;
use crate::application::windowing::DEFAULT_WINDOW_SIZE;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

const MAX_PRECISION: u32 = 6;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub api: ApiSettings,
    #[serde(default)]
    pub refresh: RefreshSettings,
    #[serde(default)]
    pub band: ExtentBand,
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RefreshSettings {
    pub headline_secs: u64,
    pub history_secs: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            headline_secs: 30,
            history_secs: 5,
        }
    }
}

impl RefreshSettings {
    pub fn headline_period(&self) -> Duration {
        Duration::from_secs(self.headline_secs)
    }

    pub fn history_period(&self) -> Duration {
        Duration::from_secs(self.history_secs)
    }
}

/// Per-chart options: which metric, how many samples, how to draw flat zeros.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChartConfig {
    pub metric: String,
    pub title: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default)]
    pub flat_zero_bar: bool,
    #[serde(default = "default_precision")]
    pub precision: u32,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api.base_url.trim().is_empty() {
            anyhow::bail!("api.base_url must be set");
        }
        if self.refresh.headline_secs == 0 || self.refresh.history_secs == 0 {
            anyhow::bail!("refresh periods must be at least one second");
        }
        self.band.validate()?;

        let mut seen = HashSet::new();
        for chart in &self.charts {
            if chart.window_size == 0 {
                anyhow::bail!("chart {}: window_size must be at least 1", chart.metric);
            }
            if chart.precision > MAX_PRECISION {
                anyhow::bail!(
                    "chart {}: precision must be at most {}",
                    chart.metric,
                    MAX_PRECISION
                );
            }
            if !seen.insert(chart.metric.as_str()) {
                anyhow::bail!("chart {} is configured twice", chart.metric);
            }
        }
        Ok(())
    }
}

/// Loads `config/weather.*`, with `WEATHER__SECTION__KEY` environment overrides.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/weather"))
        .add_source(config::Environment::with_prefix("WEATHER").separator("__"))
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
