// Sample domain models
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One timestamped reading of a single metric.
///
/// `time` is kept in its wire representation; ordering is lexical, which is
/// chronological for the ISO-like timestamps the sensor API emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: String,
    pub value: f64,
}

impl Sample {
    pub fn new(time: impl Into<String>, value: f64) -> Self {
        Self {
            time: time.into(),
            value,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SampleError {
    #[error("sample has no timestamp")]
    MissingTime,
    #[error("sample at {time} has non-numeric value {value}")]
    NotNumeric { time: String, value: String },
    #[error("sample at {time} has non-finite value")]
    NotFinite { time: String },
}

/// A sample as it arrives over the wire, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSample {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub value: Value,
}

impl RawSample {
    pub fn new(time: impl Into<String>, value: Value) -> Self {
        Self {
            time: Some(time.into()),
            value,
        }
    }

    pub fn validate(&self) -> Result<Sample, SampleError> {
        let time = match self.time.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => return Err(SampleError::MissingTime),
        };

        // Gateways sometimes stringify readings
        let value = match &self.value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .ok_or_else(|| SampleError::NotNumeric {
            time: time.clone(),
            value: self.value.to_string(),
        })?;

        if !value.is_finite() {
            return Err(SampleError::NotFinite { time });
        }

        Ok(Sample { time, value })
    }
}

/// The samples of one named metric for a single refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    pub metric: String,
    pub samples: Vec<Sample>,
}

impl MetricSeries {
    pub fn new(metric: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            metric: metric.into(),
            samples,
        }
    }

    /// Validates raw samples, dropping the malformed ones with a warning.
    pub fn from_raw(metric: impl Into<String>, raw: &[RawSample]) -> Self {
        let metric = metric.into();
        let samples = raw
            .iter()
            .filter_map(|r| match r.validate() {
                Ok(sample) => Some(sample),
                Err(e) => {
                    tracing::warn!("Excluding sample from {}: {}", metric, e);
                    None
                }
            })
            .collect();

        Self { metric, samples }
    }
}
