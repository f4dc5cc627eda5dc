// Visual extent normalization for chart bars
use crate::domain::chart::ValueRange;
use crate::domain::sample::Sample;
use serde::Deserialize;

/// Extent constants, as fractions of the chart height.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtentBand {
    pub chart_height_px: f64,
    /// Smallest bar of a varying window.
    pub min_visible: f64,
    /// Tallest bar of a varying window.
    pub max_visible: f64,
    /// Every bar of a flat, non-degenerate window.
    pub mid_scale: f64,
    /// Every bar of an all-zero window with flat-zero handling.
    pub flat_zero: f64,
}

impl Default for ExtentBand {
    fn default() -> Self {
        Self {
            chart_height_px: 200.0,
            min_visible: 0.2,
            max_visible: 0.9,
            mid_scale: 0.5,
            flat_zero: 0.05,
        }
    }
}

impl ExtentBand {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.chart_height_px.is_nan() || self.chart_height_px <= 0.0 {
            anyhow::bail!("chart_height_px must be positive");
        }
        let ordered = 0.0 <= self.flat_zero
            && self.flat_zero <= self.min_visible
            && self.min_visible <= self.max_visible
            && self.max_visible <= 1.0;
        if !ordered {
            anyhow::bail!(
                "extent band must satisfy 0 <= flat_zero <= min_visible <= max_visible <= 1"
            );
        }
        if !self.mid_scale.is_finite()
            || self.mid_scale < self.min_visible
            || self.mid_scale > self.max_visible
        {
            anyhow::bail!("mid_scale must lie within [min_visible, max_visible]");
        }
        Ok(())
    }

    /// Band fraction for one value of a window spanning `range`.
    pub fn fraction(&self, value: f64, range: ValueRange, flat_zero_bar: bool) -> f64 {
        if range.is_flat() {
            if flat_zero_bar && range.max == 0.0 {
                self.flat_zero
            } else {
                self.mid_scale
            }
        } else {
            self.min_visible + range.position(value) * (self.max_visible - self.min_visible)
        }
    }

    pub fn extent_px(&self, value: f64, range: ValueRange, flat_zero_bar: bool) -> f64 {
        self.fraction(value, range, flat_zero_bar) * self.chart_height_px
    }
}

/// One pixel extent per window sample, computed against `range`.
pub fn normalize(
    window: &[Sample],
    range: ValueRange,
    band: &ExtentBand,
    flat_zero_bar: bool,
) -> Vec<f64> {
    window
        .iter()
        .map(|s| band.extent_px(s.value, range, flat_zero_bar))
        .collect()
}

/// Computes the window's own range, then its extents. `None` when empty.
pub fn normalize_window(
    window: &[Sample],
    band: &ExtentBand,
    flat_zero_bar: bool,
) -> Option<(ValueRange, Vec<f64>)> {
    let range = ValueRange::of(window.iter().map(|s| s.value))?;
    Some((range, normalize(window, range, band, flat_zero_bar)))
}
