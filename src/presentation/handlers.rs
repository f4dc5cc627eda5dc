// HTTP request handlers
use crate::application::range_resolver::{default_range, resolve};
use crate::application::session::{Session, SessionError};
use crate::domain::analysis::{MetricSummary, TrendView};
use crate::domain::chart::ChartView;
use crate::domain::date_range::{DateRange, RangeShortcut};
use crate::domain::readings::CurrentReadings;
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    pub shortcut: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    pub generation: u64,
    pub charts: Vec<ChartView>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub range: DateRange,
    pub summary: BTreeMap<String, MetricSummary>,
    pub trends: Vec<TrendView>,
}

/// Checks the bearer token against the active session.
async fn authorize(headers: &HeaderMap, state: &AppState) -> Result<Session, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or(SessionError::NotAuthenticated)?;

    Ok(state.session.authorize(token).await?)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Start a session with a token issued by the authentication service
pub async fn create_session(
    State(state): State<AppState>,
    Json(session): Json<Session>,
) -> Result<StatusCode, ApiError> {
    state.session.establish(session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Log out
pub async fn end_session(
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    authorize(&headers, &state).await?;
    state.session.end().await;
    Ok(StatusCode::NO_CONTENT)
}

/// All chart views from the latest history refresh
pub async fn list_charts(
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Json<ChartsResponse>, ApiError> {
    authorize(&headers, &state).await?;

    let (generation, views) = state.charts.snapshot().await.ok_or(ApiError::NotReady)?;
    Ok(Json(ChartsResponse {
        generation: generation.0,
        charts: views.into_values().collect(),
    }))
}

pub async fn get_chart(
    Path(metric): Path<String>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Json<ChartView>, ApiError> {
    authorize(&headers, &state).await?;

    let (_, mut views) = state.charts.snapshot().await.ok_or(ApiError::NotReady)?;
    views
        .remove(&metric)
        .map(Json)
        .ok_or(ApiError::UnknownMetric(metric))
}

pub async fn current_readings(
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Json<CurrentReadings>, ApiError> {
    authorize(&headers, &state).await?;

    let (_, readings) = state.headline.snapshot().await.ok_or(ApiError::NotReady)?;
    Ok(Json(readings))
}

/// Resolve a named shortcut against today's date
pub async fn resolve_range(
    Path(shortcut): Path<String>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Json<DateRange>, ApiError> {
    authorize(&headers, &state).await?;

    let shortcut: RangeShortcut = shortcut.parse()?;
    Ok(Json(resolve(shortcut, state.clock.today())))
}

/// Server-side statistics for a shortcut or an explicit range
pub async fn analysis(
    Query(query): Query<AnalysisQuery>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    authorize(&headers, &state).await?;

    let range = analysis_range(&query, &state)?;
    tracing::debug!("Fetching analysis for {}", range);

    let report = state
        .source
        .fetch_analysis(&range)
        .await
        .map_err(ApiError::Upstream)?;

    Ok(Json(AnalysisResponse {
        range,
        trends: report.trend_views(),
        summary: report.summary,
    }))
}

fn analysis_range(query: &AnalysisQuery, state: &AppState) -> Result<DateRange, ApiError> {
    if let Some(shortcut) = &query.shortcut {
        let shortcut: RangeShortcut = shortcut.parse()?;
        return Ok(resolve(shortcut, state.clock.today()));
    }

    match (&query.start, &query.end) {
        (Some(start), Some(end)) => Ok(DateRange::parse(start, end)?),
        (None, None) => Ok(default_range(state.clock.as_ref())),
        (Some(date), None) | (None, Some(date)) => {
            let date = DateRange::parse(date, date)?.start_date();
            Ok(DateRange::single_day(date))
        }
    }
}
