// Periodic feeds - Fetch, transform and publish telemetry
use crate::application::chart_service::ChartService;
use crate::application::scheduler::Feed;
use crate::application::sequenced::Sequenced;
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::chart::ChartView;
use crate::domain::readings::{current_readings, CurrentReadings};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

pub type ChartBoard = Sequenced<BTreeMap<String, ChartView>>;
pub type HeadlineBoard = Sequenced<CurrentReadings>;

/// Historical window charts, refreshed on the fast cadence.
pub struct HistoryFeed {
    source: Arc<dyn TelemetrySource>,
    charts: ChartService,
    board: Arc<ChartBoard>,
}

impl HistoryFeed {
    pub fn new(
        source: Arc<dyn TelemetrySource>,
        charts: ChartService,
        board: Arc<ChartBoard>,
    ) -> Self {
        Self {
            source,
            charts,
            board,
        }
    }
}

#[async_trait]
impl Feed for HistoryFeed {
    fn name(&self) -> &str {
        "history"
    }

    async fn refresh(&self) -> anyhow::Result<()> {
        let generation = self.board.issue();
        let snapshot = self.source.fetch_series().await?;
        let views = self.charts.render_all(&snapshot);

        tracing::debug!(
            "History refresh {:?}: {} metrics fetched, {} charts built",
            generation,
            snapshot.len(),
            views.len()
        );

        self.board.publish(generation, views).await;
        Ok(())
    }
}

/// Headline current readings, refreshed on the slow cadence.
pub struct HeadlineFeed {
    source: Arc<dyn TelemetrySource>,
    board: Arc<HeadlineBoard>,
}

impl HeadlineFeed {
    pub fn new(source: Arc<dyn TelemetrySource>, board: Arc<HeadlineBoard>) -> Self {
        Self { source, board }
    }
}

#[async_trait]
impl Feed for HeadlineFeed {
    fn name(&self) -> &str {
        "headline"
    }

    async fn refresh(&self) -> anyhow::Result<()> {
        let generation = self.board.issue();
        let snapshot = self.source.fetch_series().await?;

        match current_readings(&snapshot) {
            Some(readings) => {
                tracing::debug!("Headline readings at {}", readings.time);
                self.board.publish(generation, readings).await;
            }
            None => tracing::debug!("Headline refresh {:?} returned no readings", generation),
        }
        Ok(())
    }
}
