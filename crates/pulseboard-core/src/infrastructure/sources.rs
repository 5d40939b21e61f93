use std::sync::Arc;

use pulseboard_source_api::{
    AppStoreSource,
    MetricSources,
};
use pulseboard_source_appstore::{
    AppStoreReportingSource,
    UnconfiguredAppStoreSource,
};
use pulseboard_source_aws::{
    AwsClients,
    CloudWatchApiGatewaySource,
    CloudWatchDynamoDbSource,
    CloudWatchLambdaSource,
    CostExplorerSource,
};

use super::config::PulseboardConfig;
use crate::domain::{
    DomainError,
    DomainResult,
};

/// Builds the production adapters from the `[aws]` and `[app_store]` tables
pub async fn build_metric_sources(config: &PulseboardConfig) -> DomainResult<MetricSources> {
    let clients = AwsClients::load(&config.aws.region, config.aws.profile.as_deref()).await;

    let app_store: Arc<dyn AppStoreSource> = if config.app_store.is_configured() {
        let source =
            AppStoreReportingSource::new(&config.app_store.base_url, &config.app_store.api_key)
                .map_err(|e| DomainError::InvalidConfig(e.to_string()))?;
        Arc::new(source)
    } else {
        tracing::info!("App Store reporting API not configured, App Store metrics disabled");
        Arc::new(UnconfiguredAppStoreSource)
    };

    tracing::info!(region = %config.aws.region, "Metric sources ready");

    Ok(MetricSources {
        lambda: Arc::new(CloudWatchLambdaSource::new(clients.cloudwatch.clone())),
        api_gateway: Arc::new(CloudWatchApiGatewaySource::new(clients.cloudwatch.clone())),
        dynamodb: Arc::new(CloudWatchDynamoDbSource::new(
            clients.cloudwatch.clone(),
            clients.dynamodb.clone(),
        )),
        cost: Arc::new(CostExplorerSource::new(
            clients.cost_explorer.clone(),
            config.aws.cost_tag_key.clone(),
        )),
        app_store,
    })
}
