use chrono::{
    DateTime,
    Utc,
};
use pulseboard_source_api::{
    ApiGatewayMetrics,
    AppStoreMetrics,
    CostMetrics,
    DynamoDbMetrics,
    LambdaMetrics,
    TimeWindow,
};
use serde::{
    Deserialize,
    Serialize,
};

use super::health::HealthStatus;
use super::summary::{
    ApiGatewaySummary,
    AppStoreSummary,
    CostSummary,
    DynamoDbSummary,
    LambdaSummary,
};

/// Outcome of one adapter call
#[derive(Debug, Clone, PartialEq)]
pub enum SourceResult<T> {
    Fetched(T),
    Failed(String),
}

impl<T> SourceResult<T> {
    pub fn fetched(&self) -> Option<&T> {
        match self {
            SourceResult::Fetched(value) => Some(value),
            SourceResult::Failed(_) => None,
        }
    }

    pub fn into_fetched(self) -> Option<T> {
        match self {
            SourceResult::Fetched(value) => Some(value),
            SourceResult::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            SourceResult::Fetched(_) => None,
            SourceResult::Failed(reason) => Some(reason),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SourceResult::Failed(_))
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for SourceResult<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => SourceResult::Fetched(value),
            Err(e) => SourceResult::Failed(e.to_string()),
        }
    }
}

/// Adapter outcome for a named resource
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceResult<T> {
    pub name: String,
    pub result: SourceResult<T>,
}

impl<T> ResourceResult<T> {
    pub fn new(name: impl Into<String>, result: SourceResult<T>) -> Self {
        Self {
            name: name.into(),
            result,
        }
    }
}

/// Every per-resource outcome gathered for one request, in declaration order
#[derive(Debug, Clone, Default)]
pub struct CategoryResults {
    pub lambda: Vec<ResourceResult<LambdaMetrics>>,
    pub api_gateway: Option<ResourceResult<ApiGatewayMetrics>>,
    pub dynamodb: Vec<ResourceResult<DynamoDbMetrics>>,
    pub cost: Option<ResourceResult<CostMetrics>>,
    pub app_store: Option<ResourceResult<AppStoreMetrics>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryState {
    Ok,
    Partial,
    Failed,
    #[default]
    Unconfigured,
    Skipped,
}

/// Whether a category's summary reflects real data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStatus {
    pub state: CategoryState,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_resources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CategoryStatus {
    pub fn skipped() -> Self {
        Self {
            state: CategoryState::Skipped,
            ..Default::default()
        }
    }

    pub fn from_resources<T>(results: &[ResourceResult<T>]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let failed: Vec<&ResourceResult<T>> =
            results.iter().filter(|r| r.result.is_failed()).collect();

        let state = if failed.is_empty() {
            CategoryState::Ok
        } else if failed.len() == results.len() {
            CategoryState::Failed
        } else {
            CategoryState::Partial
        };

        Self {
            state,
            error: failed
                .first()
                .and_then(|r| r.result.failure())
                .map(str::to_string),
            failed_resources: failed.into_iter().map(|r| r.name.clone()).collect(),
        }
    }

    pub fn from_optional<T>(result: Option<&ResourceResult<T>>) -> Self {
        Self::from_resources(result.map(std::slice::from_ref).unwrap_or_default())
    }

    pub fn is_failed(&self) -> bool {
        self.state == CategoryState::Failed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatuses {
    pub lambda: CategoryStatus,
    pub api_gateway: CategoryStatus,
    #[serde(rename = "dynamoDB")]
    pub dynamodb: CategoryStatus,
    pub cost: CategoryStatus,
    pub app_store: CategoryStatus,
}

impl SourceStatuses {
    /// True when every configured category failed outright
    pub fn all_failed(&self) -> bool {
        let statuses = [
            &self.lambda,
            &self.api_gateway,
            &self.dynamodb,
            &self.cost,
            &self.app_store,
        ];
        let attempted: Vec<_> = statuses
            .iter()
            .filter(|s| !matches!(s.state, CategoryState::Unconfigured | CategoryState::Skipped))
            .collect();
        !attempted.is_empty() && attempted.iter().all(|s| s.is_failed())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsMetrics {
    pub lambda: LambdaSummary,
    pub api_gateway: ApiGatewaySummary,
    #[serde(rename = "dynamoDB")]
    pub dynamodb: DynamoDbSummary,
    pub cost: CostSummary,
}

/// Response document for one aggregation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateMetrics {
    pub app_id: String,
    pub period: TimeWindow,
    pub timestamp: DateTime<Utc>,
    pub aws: AwsMetrics,
    pub app_store: AppStoreSummary,
    pub health: HealthStatus,
    pub sources: SourceStatuses,
}

/// One category summary with its status, served by the per-category endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport<S> {
    pub app_id: String,
    pub period: TimeWindow,
    pub timestamp: DateTime<Utc>,
    pub summary: S,
    pub status: CategoryStatus,
}
