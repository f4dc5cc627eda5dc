// Reading payloads from the sensor API
use super::sample::{RawSample, Sample};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// `/latest` answer: timestamp -> metric -> value.
pub type ReadingsPayload = BTreeMap<String, BTreeMap<String, Value>>;

/// Per-metric raw series, keyed by metric name.
pub type SeriesSnapshot = BTreeMap<String, Vec<RawSample>>;

/// Turns timestamp-major rows into one raw series per metric.
pub fn pivot_readings(payload: &ReadingsPayload) -> SeriesSnapshot {
    let mut snapshot = SeriesSnapshot::new();
    for (time, row) in payload {
        for (metric, value) in row {
            snapshot
                .entry(metric.clone())
                .or_default()
                .push(RawSample::new(time.clone(), value.clone()));
        }
    }
    snapshot
}

/// Headline values: every valid metric reading at the newest timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentReadings {
    pub time: String,
    pub values: BTreeMap<String, f64>,
}

pub fn current_readings(snapshot: &SeriesSnapshot) -> Option<CurrentReadings> {
    let samples: Vec<(&String, Sample)> = snapshot
        .iter()
        .flat_map(|(metric, raw)| {
            raw.iter()
                .filter_map(move |r| r.validate().ok().map(|s| (metric, s)))
        })
        .collect();

    let newest = samples.iter().map(|(_, s)| s.time.as_str()).max()?.to_string();
    let values = samples
        .into_iter()
        .filter(|(_, s)| s.time == newest)
        .map(|(metric, s)| (metric.clone(), s.value))
        .collect();

    Some(CurrentReadings {
        time: newest,
        values,
    })
}
