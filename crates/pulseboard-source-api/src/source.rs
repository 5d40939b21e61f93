use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SourceApiResult;
use crate::types::*;
use crate::window::TimeWindow;

/// Lambda metrics for a single function
#[async_trait]
pub trait LambdaSource: Send + Sync {
    async fn fetch_function_metrics(
        &self, function_name: &str, window: TimeWindow,
    ) -> SourceApiResult<LambdaMetrics>;
}

/// API Gateway metrics for a single REST API
#[async_trait]
pub trait ApiGatewaySource: Send + Sync {
    async fn fetch_api_metrics(
        &self, api_name: &str, window: TimeWindow,
    ) -> SourceApiResult<ApiGatewayMetrics>;
}

/// DynamoDB metrics for a single table
#[async_trait]
pub trait DynamoDbSource: Send + Sync {
    async fn fetch_table_metrics(
        &self, table_name: &str, window: TimeWindow,
    ) -> SourceApiResult<DynamoDbMetrics>;
}

/// Cost data scoped by a cost allocation tag value
#[async_trait]
pub trait CostSource: Send + Sync {
    async fn fetch_costs(&self, cost_tag: &str, window: TimeWindow)
        -> SourceApiResult<CostMetrics>;
}

/// App Store analytics for a single app
#[async_trait]
pub trait AppStoreSource: Send + Sync {
    async fn fetch_app_metrics(
        &self, app_store_id: &str, window: TimeWindow,
    ) -> SourceApiResult<AppStoreMetrics>;
}

/// The full set of adapters an aggregation runs against
#[derive(Clone)]
pub struct MetricSources {
    pub lambda: Arc<dyn LambdaSource>,
    pub api_gateway: Arc<dyn ApiGatewaySource>,
    pub dynamodb: Arc<dyn DynamoDbSource>,
    pub cost: Arc<dyn CostSource>,
    pub app_store: Arc<dyn AppStoreSource>,
}
