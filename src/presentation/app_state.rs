// Application state for HTTP handlers
use crate::application::feeds::{ChartBoard, HeadlineBoard};
use crate::application::range_resolver::Clock;
use crate::application::session::SessionContext;
use crate::application::telemetry_source::TelemetrySource;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub charts: Arc<ChartBoard>,
    pub headline: Arc<HeadlineBoard>,
    pub session: Arc<SessionContext>,
    pub source: Arc<dyn TelemetrySource>,
    pub clock: Arc<dyn Clock>,
}
