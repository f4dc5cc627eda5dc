// Server-side analysis payloads, displayed verbatim
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const STEADY_THRESHOLD: f64 = 0.001;

/// Descriptive statistics for one metric, as computed upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub count: f64,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub p25: f64,
    #[serde(rename = "50%")]
    pub p50: f64,
    #[serde(rename = "75%")]
    pub p75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub summary: BTreeMap<String, MetricSummary>,
    /// Least-squares slope per second, keyed by metric.
    #[serde(default)]
    pub trends: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Steady,
}

impl TrendDirection {
    pub fn classify(slope: f64) -> Self {
        if slope > STEADY_THRESHOLD {
            TrendDirection::Rising
        } else if slope < -STEADY_THRESHOLD {
            TrendDirection::Falling
        } else {
            TrendDirection::Steady
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Rising => "↗",
            TrendDirection::Falling => "↘",
            TrendDirection::Steady => "→",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendView {
    pub metric: String,
    pub slope: f64,
    pub direction: TrendDirection,
    pub text: String,
}

impl TrendView {
    pub fn new(metric: impl Into<String>, slope: f64) -> Self {
        let direction = TrendDirection::classify(slope);
        Self {
            metric: metric.into(),
            slope,
            direction,
            text: format!("{} {:.4}", direction.arrow(), slope),
        }
    }
}

impl AnalysisReport {
    pub fn trend_views(&self) -> Vec<TrendView> {
        self.trends
            .iter()
            .map(|(metric, slope)| TrendView::new(metric.clone(), *slope))
            .collect()
    }
}

/// Ordinal rain level reported by the rain sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainLevel {
    None,
    Light,
    Moderate,
    Heavy,
    Unknown,
}

impl RainLevel {
    pub fn from_value(value: f64) -> Self {
        if value.fract() != 0.0 {
            return RainLevel::Unknown;
        }
        match value as i64 {
            0 => RainLevel::None,
            1 => RainLevel::Light,
            2 => RainLevel::Moderate,
            3 => RainLevel::Heavy,
            _ => RainLevel::Unknown,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RainLevel::None => "No Rain",
            RainLevel::Light => "Light Rain",
            RainLevel::Moderate => "Moderate Rain",
            RainLevel::Heavy => "Heavy Rain",
            RainLevel::Unknown => "Unknown",
        }
    }
}
