//! App Store reporting API source.
//!
//! The reporting API answers `GET {base_url}/apps/{id}/analytics` with one
//! JSON report per app and period, authenticated by a bearer API key.

mod client;
mod mapper;
mod types;

use async_trait::async_trait;
use pulseboard_source_api::{
    AppStoreMetrics,
    AppStoreSource,
    SourceApiResult,
    SourceError,
    TimeWindow,
};

pub use client::AppStoreReportingSource;

/// Stand-in used when no reporting API is configured
pub struct UnconfiguredAppStoreSource;

#[async_trait]
impl AppStoreSource for UnconfiguredAppStoreSource {
    async fn fetch_app_metrics(
        &self, _app_store_id: &str, _window: TimeWindow,
    ) -> SourceApiResult<AppStoreMetrics> {
        Err(SourceError::InvalidConfig(
            "App Store reporting API is not configured".to_string(),
        ))
    }
}
