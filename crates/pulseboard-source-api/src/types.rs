use chrono::NaiveDate;
use serde::{
    Deserialize,
    Serialize,
};

/// CloudWatch statistics for one Lambda function over a window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaMetrics {
    pub function_name: String,
    pub invocations: u64,
    pub errors: u64,
    pub throttles: u64,
    /// Mean `Duration`; absent when the function had no datapoints
    pub avg_duration_ms: Option<f64>,
    pub max_concurrent_executions: Option<f64>,
}

/// CloudWatch statistics for one REST API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayMetrics {
    pub api_name: String,
    pub count: u64,
    pub errors_4xx: u64,
    pub errors_5xx: u64,
    pub avg_latency_ms: Option<f64>,
    pub avg_integration_latency_ms: Option<f64>,
}

/// CloudWatch statistics plus DescribeTable details for one table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamoDbMetrics {
    pub table_name: String,
    pub consumed_read_capacity: f64,
    pub consumed_write_capacity: f64,
    pub throttled_requests: u64,
    pub system_errors: u64,
    pub avg_successful_request_latency_ms: Option<f64>,
    pub item_count: Option<i64>,
    pub table_size_bytes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCost {
    pub service: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCost {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Cost Explorer totals for the window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostMetrics {
    pub total: f64,
    pub currency: String,
    /// Whole days the totals cover; `0` when the source works on the exact window.
    #[serde(default)]
    pub days: u32,
    pub by_service: Vec<ServiceCost>,
    pub daily: Vec<DailyCost>,
}

/// App Store reporting figures for one app
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStoreMetrics {
    pub app_store_id: String,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub redownloads: u64,
    #[serde(default)]
    pub updates: u64,
    #[serde(default)]
    pub proceeds: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub crashes: u64,
    #[serde(default)]
    pub sessions: u64,
    #[serde(default)]
    pub active_devices: u64,
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub rating_count: u64,
}
