// Summary statistics over a chart window
use crate::domain::chart::{Reading, SummaryBlock, ValueRange};
use crate::domain::sample::Sample;

pub const DEFAULT_PRECISION: u32 = 2;

/// Full-precision statistics; rounding only happens in [`SummaryStats::to_block`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub latest: Option<f64>,
    pub average: Option<f64>,
    pub range: Option<ValueRange>,
}

/// Expects a time-ordered window, so the last sample is the latest.
pub fn summarize(window: &[Sample]) -> SummaryStats {
    let latest = window.last().map(|s| s.value);
    // Running mean, so large finite values cannot overflow a plain sum
    let average = (!window.is_empty()).then(|| {
        window.iter().enumerate().fold(0.0, |mean, (i, s)| {
            let n = (i + 1) as f64;
            mean + (s.value / n - mean / n)
        })
    });

    SummaryStats {
        latest,
        average,
        range: ValueRange::of(window.iter().map(|s| s.value)),
    }
}

impl SummaryStats {
    pub fn to_block(&self, precision: u32) -> SummaryBlock {
        let display = |v: Option<f64>| Reading::from(v.map(|v| round_to(v, precision)));
        SummaryBlock {
            latest: display(self.latest),
            average: display(self.average),
            maximum: display(self.range.map(|r| r.max)),
            minimum: display(self.range.map(|r| r.min)),
        }
    }
}

/// Rounds half away from zero to `precision` decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() { rounded } else { value }
}
