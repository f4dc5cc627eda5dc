// Window selection over a metric's sample series
use crate::domain::sample::Sample;
use std::collections::HashMap;

pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Collapses samples sharing a timestamp. The sample supplied last wins.
pub fn deduplicate(samples: &[Sample]) -> HashMap<String, f64> {
    let mut by_time = HashMap::with_capacity(samples.len());
    for sample in samples {
        by_time.insert(sample.time.clone(), sample.value);
    }
    by_time
}

/// Sorts deduplicated samples by timestamp, oldest first.
pub fn order_by_time(by_time: HashMap<String, f64>) -> Vec<Sample> {
    let mut ordered: Vec<Sample> = by_time
        .into_iter()
        .map(|(time, value)| Sample { time, value })
        .collect();
    ordered.sort_by(|a, b| a.time.cmp(&b.time));
    ordered
}

/// Keeps the newest `size` samples of a time-ordered series.
pub fn select_window(mut ordered: Vec<Sample>, size: usize) -> Vec<Sample> {
    if ordered.len() > size {
        ordered.drain(..ordered.len() - size);
    }
    ordered
}

/// Dedup, order and window in one go.
pub fn build_window(samples: &[Sample], size: usize) -> Vec<Sample> {
    let window = select_window(order_by_time(deduplicate(samples)), size);
    tracing::debug!(
        "Windowed {} samples down to {} (size {})",
        samples.len(),
        window.len(),
        size
    );
    window
}
