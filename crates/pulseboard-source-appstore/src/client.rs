//! HTTP client for the App Store reporting API

use std::time::Duration;

use async_trait::async_trait;
use pulseboard_source_api::{
    AppStoreMetrics,
    AppStoreSource,
    SourceApiResult,
    SourceError,
    TimeWindow,
};
use reqwest::Client;

use crate::{
    mapper,
    types,
};

pub struct AppStoreReportingSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AppStoreReportingSource {
    pub fn new(
        base_url: impl Into<String>, api_key: impl Into<String>,
    ) -> SourceApiResult<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| SourceError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, base_url, api_key))
    }

    pub fn with_client(
        client: Client, base_url: impl Into<String>, api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

fn analytics_url(base_url: &str, app_store_id: &str, window: TimeWindow) -> String {
    format!(
        "{base_url}/apps/{}/analytics?start={}&end={}",
        urlencoding::encode(app_store_id),
        urlencoding::encode(&window.start().to_rfc3339()),
        urlencoding::encode(&window.end().to_rfc3339()),
    )
}

#[async_trait]
impl AppStoreSource for AppStoreReportingSource {
    async fn fetch_app_metrics(
        &self, app_store_id: &str, window: TimeWindow,
    ) -> SourceApiResult<AppStoreMetrics> {
        let url = analytics_url(&self.base_url, app_store_id, window);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                SourceError::NetworkError(format!("Failed to reach App Store API: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(mapper::map_status(status, app_store_id, &body));
        }

        let report: types::AnalyticsReport = response.json().await.map_err(|e| {
            SourceError::InvalidResponse(format!("Failed to parse App Store report: {e}"))
        })?;

        tracing::debug!(app_store_id, "Fetched App Store analytics");

        Ok(mapper::map_report(app_store_id, report))
    }
}
