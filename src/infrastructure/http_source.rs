// HTTP telemetry source for the weather sensor API
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::analysis::AnalysisReport;
use crate::domain::date_range::DateRange;
use crate::domain::readings::{pivot_readings, ReadingsPayload, SeriesSnapshot};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpTelemetrySource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTelemetrySource {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn latest_url(&self) -> String {
        format!("{}/latest", self.base_url)
    }

    fn analysis_url(&self, range: &DateRange) -> String {
        let (start, end) = range.query_bounds();
        format!(
            "{}/api/analyze?start={}&end={}",
            self.base_url,
            urlencoding::encode(&start),
            urlencoding::encode(&end)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Request to {} failed with status {}: {}", url, status, body);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }
}

#[async_trait]
impl TelemetrySource for HttpTelemetrySource {
    async fn fetch_series(&self) -> Result<SeriesSnapshot> {
        let payload: ReadingsPayload = self.get_json(&self.latest_url()).await?;
        Ok(pivot_readings(&payload))
    }

    async fn fetch_analysis(&self, range: &DateRange) -> Result<AnalysisReport> {
        self.get_json(&self.analysis_url(range)).await
    }
}
