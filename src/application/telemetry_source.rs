// Source trait for remote telemetry data
use crate::domain::analysis::AnalysisReport;
use crate::domain::date_range::DateRange;
use crate::domain::readings::SeriesSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Fetch the recent readings of every metric, one raw series per metric
    async fn fetch_series(&self) -> anyhow::Result<SeriesSnapshot>;

    /// Fetch the server-side statistics for a calendar range
    async fn fetch_analysis(&self, range: &DateRange) -> anyhow::Result<AnalysisReport>;
}
