pub mod aggregate;
pub mod error;
pub mod health;
pub mod resources;
pub mod summary;

pub use aggregate::{
    AggregateMetrics,
    AwsMetrics,
    CategoryReport,
    CategoryResults,
    CategoryState,
    CategoryStatus,
    ResourceResult,
    SourceResult,
    SourceStatuses,
};
pub use error::{
    DomainError,
    DomainResult,
};
pub use health::{
    HealthStatus,
    HealthThresholds,
    HealthVerdict,
};
pub use resources::ResourceSet;
pub use summary::{
    ApiGatewaySummary,
    AppStoreSummary,
    CostSummary,
    DynamoDbSummary,
    LambdaSummary,
};
