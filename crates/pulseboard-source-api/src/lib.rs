pub mod error;
pub mod source;
pub mod types;
pub mod utils;
pub mod window;

pub use error::{
    SourceApiResult,
    SourceError,
};
pub use source::{
    ApiGatewaySource,
    AppStoreSource,
    CostSource,
    DynamoDbSource,
    LambdaSource,
    MetricSources,
};
pub use types::{
    ApiGatewayMetrics,
    AppStoreMetrics,
    CostMetrics,
    DailyCost,
    DynamoDbMetrics,
    LambdaMetrics,
    ServiceCost,
};
pub use utils::RetryPolicy;
pub use window::{
    TimeWindow,
    WindowError,
};
