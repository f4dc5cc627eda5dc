// Chart service - Turns raw metric series into chart render models
use crate::application::normalizer::{normalize, ExtentBand};
use crate::application::summary::{round_to, summarize};
use crate::application::windowing::build_window;
use crate::domain::analysis::RainLevel;
use crate::domain::chart::{ChartRenderModel, ChartView, RenderBar};
use crate::domain::readings::SeriesSnapshot;
use crate::domain::sample::MetricSeries;
use crate::infrastructure::config::ChartConfig;
use std::collections::BTreeMap;

const RAIN_LEVEL_METRIC: &str = "rain_level";

/// Runs one metric's series through window, normalization and summary.
pub fn build_chart(config: &ChartConfig, series: &MetricSeries, band: &ExtentBand) -> ChartView {
    let window = build_window(&series.samples, config.window_size);
    let stats = summarize(&window);

    let Some(range) = stats.range else {
        return ChartView::NoData {
            metric: config.metric.clone(),
            title: config.title.clone(),
        };
    };

    let extents = normalize(&window, range, band, config.flat_zero_bar);
    let bars = window
        .iter()
        .zip(extents)
        .map(|(sample, extent)| RenderBar {
            label: sample.time.clone(),
            display_value: round_to(sample.value, config.precision),
            visual_extent_px: extent,
            condition: (config.metric == RAIN_LEVEL_METRIC)
                .then(|| RainLevel::from_value(sample.value).description().to_string()),
        })
        .collect();

    ChartView::Ready(ChartRenderModel {
        metric: config.metric.clone(),
        title: config.title.clone(),
        unit: config.unit.clone(),
        bars,
        summary: stats.to_block(config.precision),
        range,
    })
}

#[derive(Debug, Clone)]
pub struct ChartService {
    charts: Vec<ChartConfig>,
    band: ExtentBand,
}

impl ChartService {
    pub fn new(charts: Vec<ChartConfig>, band: ExtentBand) -> Self {
        Self { charts, band }
    }

    /// One view per configured chart; metrics missing from the snapshot render as no data.
    pub fn render_all(&self, snapshot: &SeriesSnapshot) -> BTreeMap<String, ChartView> {
        self.charts
            .iter()
            .map(|config| {
                let raw = snapshot
                    .get(&config.metric)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let series = MetricSeries::from_raw(config.metric.as_str(), raw);
                (config.metric.clone(), build_chart(config, &series, &self.band))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::normalizer::normalize_window;
    use crate::domain::chart::{Reading, ValueRange};
    use crate::domain::sample::{RawSample, Sample};
    use serde_json::json;

    fn chart(metric: &str, flat_zero_bar: bool) -> ChartConfig {
        ChartConfig {
            metric: metric.to_string(),
            title: metric.to_string(),
            unit: String::new(),
            window_size: 10,
            flat_zero_bar,
            precision: 2,
        }
    }

    fn series(metric: &str, values: &[f64]) -> MetricSeries {
        MetricSeries::new(
            metric,
            values
                .iter()
                .enumerate()
                .map(|(i, v)| Sample::new(format!("2025-05-20T10:00:{:02}", i), *v))
                .collect(),
        )
    }

    fn ready(view: ChartView) -> ChartRenderModel {
        match view {
            ChartView::Ready(model) => model,
            other => panic!("expected a chart, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_series_is_no_data() {
        let view = build_chart(
            &chart("humidity", false),
            &series("humidity", &[]),
            &ExtentBand::default(),
        );
        assert_eq!(
            view,
            ChartView::NoData {
                metric: "humidity".to_string(),
                title: "humidity".to_string()
            }
        );
    }

    #[test]
    fn test_build_chart_bars_and_summary() {
        let values: Vec<f64> = (0..15).map(|i| 20.0 + i as f64 * 0.125).collect();
        let model = ready(build_chart(
            &chart("temperature", false),
            &series("temperature", &values),
            &ExtentBand::default(),
        ));

        assert_eq!(model.bars.len(), 10);
        assert_eq!(model.bars[0].label, "2025-05-20T10:00:05");
        assert_eq!(model.bars[0].display_value, 20.63);
        assert_eq!(model.bars[9].label, "2025-05-20T10:00:14");
        assert!(model.bars.iter().all(|b| b.condition.is_none()));
        assert_eq!(model.summary.latest, Reading::Value(21.75));
        assert_eq!(model.summary.maximum, Reading::Value(21.75));
        assert_eq!(model.summary.minimum, Reading::Value(20.63));
        assert_eq!(model.range, ValueRange::new(values[5], values[14]));
    }

    #[test]
    fn test_summary_bounds_reproduce_extents() {
        let config = chart("pressure", false);
        let band = ExtentBand::default();
        let input = series("pressure", &[1025.808, 1025.84, 1025.867, 1025.81]);
        let model = ready(build_chart(&config, &input, &band));

        let window = build_window(&input.samples, config.window_size);
        let again = normalize(&window, model.range, &band, config.flat_zero_bar);
        let extents: Vec<f64> = model.bars.iter().map(|b| b.visual_extent_px).collect();
        assert_eq!(extents, again);

        let (_, fresh) = normalize_window(&window, &band, config.flat_zero_bar).unwrap();
        assert_eq!(extents, fresh);
    }

    #[test]
    fn test_rain_level_bars_carry_condition() {
        let model = ready(build_chart(
            &chart("rain_level", true),
            &series("rain_level", &[0.0, 0.0, 0.0]),
            &ExtentBand::default(),
        ));
        assert!(model.bars.iter().all(|b| b.visual_extent_px == 10.0));
        assert_eq!(model.bars[0].condition.as_deref(), Some("No Rain"));
    }

    #[test]
    fn test_extreme_values_serialize_as_numbers() {
        let model = ready(build_chart(
            &chart("pressure", false),
            &series("pressure", &[-1e308, 1e308, 1e308]),
            &ExtentBand::default(),
        ));
        assert!(model.bars.iter().all(|b| b.visual_extent_px.is_finite()));

        let body = serde_json::to_value(&model).unwrap();
        for bar in body["bars"].as_array().unwrap() {
            assert!(bar["visualExtentPx"].is_number());
        }
        assert!(body["summary"]["average"].is_number());
    }

    #[test]
    fn test_render_all() {
        let service = ChartService::new(
            vec![chart("temperature", false), chart("light", false)],
            ExtentBand::default(),
        );
        let mut snapshot = SeriesSnapshot::new();
        snapshot.insert(
            "temperature".to_string(),
            vec![
                RawSample::new("10:00", json!(22.81)),
                RawSample::new("10:01", json!("broken")),
                RawSample::new("10:00", json!(22.82)),
            ],
        );
        snapshot.insert("pressure".to_string(), vec![RawSample::new("10:00", json!(1.0))]);

        let views = service.render_all(&snapshot);
        assert_eq!(views.len(), 2);
        assert!(matches!(views["light"], ChartView::NoData { .. }));

        let temperature = ready(views["temperature"].clone());
        assert_eq!(temperature.bars.len(), 1);
        assert_eq!(temperature.bars[0].display_value, 22.82);
        assert_eq!(temperature.summary.average, Reading::Value(22.82));
    }
}
