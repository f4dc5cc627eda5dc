// Chart render model domain types
use serde::{Serialize, Serializer};

/// Marker shown in place of a statistic that cannot be computed.
pub const UNAVAILABLE: &str = "N/A";

/// Min/max of a window's values, at full precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Single pass over the values. `None` for an empty input.
    pub fn of<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self::new(v, v)),
            Some(r) => Some(Self::new(r.min.min(v), r.max.max(v))),
        })
    }

    pub fn is_flat(&self) -> bool {
        self.max == self.min
    }

    /// Where `value` sits between min (0.0) and max (1.0). Halves the
    /// operands when the span itself overflows.
    pub fn position(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        let ratio = if span.is_finite() {
            (value - self.min) / span
        } else {
            (value / 2.0 - self.min / 2.0) / (self.max / 2.0 - self.min / 2.0)
        };
        ratio.clamp(0.0, 1.0)
    }
}

/// A display value that may be missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Value(f64),
    Unavailable,
}

impl From<Option<f64>> for Reading {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Reading::Unavailable, Reading::Value)
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reading::Value(v) => serializer.serialize_f64(*v),
            Reading::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBar {
    pub label: String,
    pub display_value: f64,
    pub visual_extent_px: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryBlock {
    pub latest: Reading,
    pub average: Reading,
    pub maximum: Reading,
    pub minimum: Reading,
}

impl SummaryBlock {
    pub fn unavailable() -> Self {
        Self {
            latest: Reading::Unavailable,
            average: Reading::Unavailable,
            maximum: Reading::Unavailable,
            minimum: Reading::Unavailable,
        }
    }
}

/// Everything the presentation layer needs to draw one metric's chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRenderModel {
    pub metric: String,
    pub title: String,
    pub unit: String,
    pub bars: Vec<RenderBar>,
    pub summary: SummaryBlock,
    /// Unrounded bounds the extents were computed from.
    #[serde(skip)]
    pub range: ValueRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ChartView {
    NoData { metric: String, title: String },
    Ready(ChartRenderModel),
}
