//! Category summaries and the metric math shared by them.
//!
//! Counters are summed; latency style values are averaged over the resources
//! that actually reported one. Every summary has a zero-valued `Default`,
//! which is what the response carries for a category with no usable data.

use pulseboard_source_api::{
    ApiGatewayMetrics,
    AppStoreMetrics,
    CostMetrics,
    DailyCost,
    DynamoDbMetrics,
    LambdaMetrics,
    ServiceCost,
    TimeWindow,
};
use serde::{
    Deserialize,
    Serialize,
};

const PROJECTION_DAYS: f64 = 30.0;

/// `numerator / denominator * 100`, or `0` when there is nothing to divide by.
pub fn rate(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64 * 100.0
}

/// Arithmetic mean of the values that are present and finite.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaSummary {
    pub functions: Vec<LambdaMetrics>,
    pub total_invocations: u64,
    pub total_errors: u64,
    pub total_throttles: u64,
    pub error_rate: f64,
    pub avg_duration_ms: f64,
    pub max_concurrent_executions: f64,
}

impl LambdaSummary {
    pub fn from_metrics(functions: Vec<LambdaMetrics>) -> Self {
        let total_invocations = functions.iter().map(|f| f.invocations).sum();
        let total_errors = functions.iter().map(|f| f.errors).sum();
        let total_throttles = functions.iter().map(|f| f.throttles).sum();
        let avg_duration_ms = mean(functions.iter().map(|f| f.avg_duration_ms)).unwrap_or(0.0);
        let max_concurrent_executions = functions
            .iter()
            .filter_map(|f| f.max_concurrent_executions)
            .fold(0.0, f64::max);

        Self {
            total_invocations,
            total_errors,
            total_throttles,
            error_rate: rate(total_errors, total_invocations),
            avg_duration_ms,
            max_concurrent_executions,
            functions,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewaySummary {
    pub api_name: Option<String>,
    pub total_requests: u64,
    pub errors_4xx: u64,
    pub errors_5xx: u64,
    pub error_rate_4xx: f64,
    pub error_rate_5xx: f64,
    pub error_rate: f64,
    pub avg_latency_ms: f64,
    pub avg_integration_latency_ms: f64,
}

impl ApiGatewaySummary {
    pub fn from_metrics(metrics: ApiGatewayMetrics) -> Self {
        Self {
            error_rate_4xx: rate(metrics.errors_4xx, metrics.count),
            error_rate_5xx: rate(metrics.errors_5xx, metrics.count),
            error_rate: rate(metrics.errors_4xx + metrics.errors_5xx, metrics.count),
            total_requests: metrics.count,
            errors_4xx: metrics.errors_4xx,
            errors_5xx: metrics.errors_5xx,
            avg_latency_ms: metrics.avg_latency_ms.unwrap_or(0.0),
            avg_integration_latency_ms: metrics.avg_integration_latency_ms.unwrap_or(0.0),
            api_name: Some(metrics.api_name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamoDbSummary {
    pub tables: Vec<DynamoDbMetrics>,
    pub total_consumed_read_capacity: f64,
    pub total_consumed_write_capacity: f64,
    pub total_throttled_requests: u64,
    pub total_system_errors: u64,
    pub avg_successful_request_latency_ms: f64,
    pub total_item_count: i64,
    pub total_size_bytes: i64,
}

impl DynamoDbSummary {
    pub fn from_metrics(tables: Vec<DynamoDbMetrics>) -> Self {
        Self {
            total_consumed_read_capacity: tables.iter().map(|t| t.consumed_read_capacity).sum(),
            total_consumed_write_capacity: tables.iter().map(|t| t.consumed_write_capacity).sum(),
            total_throttled_requests: tables.iter().map(|t| t.throttled_requests).sum(),
            total_system_errors: tables.iter().map(|t| t.system_errors).sum(),
            avg_successful_request_latency_ms: mean(
                tables.iter().map(|t| t.avg_successful_request_latency_ms),
            )
            .unwrap_or(0.0),
            total_item_count: tables.iter().filter_map(|t| t.item_count).sum(),
            total_size_bytes: tables.iter().filter_map(|t| t.table_size_bytes).sum(),
            tables,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    pub total_cost: f64,
    pub currency: String,
    pub by_service: Vec<ServiceCost>,
    pub daily: Vec<DailyCost>,
    pub days: f64,
    pub projected_monthly_cost: f64,
}

impl CostSummary {
    pub fn from_metrics(metrics: CostMetrics, window: TimeWindow) -> Self {
        let mut by_service = metrics.by_service;
        by_service.sort_by(|a, b| b.amount.total_cmp(&a.amount));

        let mut daily = metrics.daily;
        daily.sort_by_key(|d| d.date);

        let days = if metrics.days > 0 {
            f64::from(metrics.days)
        } else {
            window.days()
        };

        Self {
            projected_monthly_cost: project_monthly(metrics.total, days),
            days,
            total_cost: metrics.total,
            currency: metrics.currency,
            by_service,
            daily,
        }
    }
}

/// Scales a window total to a 30 day month.
pub fn project_monthly(total: f64, days: f64) -> f64 {
    if days <= 0.0 || !total.is_finite() {
        return 0.0;
    }
    total / days * PROJECTION_DAYS
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStoreSummary {
    pub app_store_id: Option<String>,
    pub downloads: u64,
    pub redownloads: u64,
    pub updates: u64,
    pub proceeds: f64,
    pub currency: String,
    pub crashes: u64,
    pub sessions: u64,
    pub active_devices: u64,
    pub crash_rate: f64,
    pub average_rating: f64,
    pub rating_count: u64,
}

impl AppStoreSummary {
    pub fn from_metrics(metrics: AppStoreMetrics) -> Self {
        Self {
            crash_rate: rate(metrics.crashes, metrics.sessions),
            downloads: metrics.downloads,
            redownloads: metrics.redownloads,
            updates: metrics.updates,
            proceeds: metrics.proceeds,
            currency: metrics.currency,
            crashes: metrics.crashes,
            sessions: metrics.sessions,
            active_devices: metrics.active_devices,
            average_rating: metrics.average_rating.unwrap_or(0.0),
            rating_count: metrics.rating_count,
            app_store_id: Some(metrics.app_store_id),
        }
    }
}
