//! AWS-backed metric sources.
//!
//! Lambda, API Gateway and DynamoDB figures come from CloudWatch
//! `GetMetricStatistics`; DynamoDB table size comes from `DescribeTable`; cost
//! comes from Cost Explorer `GetCostAndUsage`, filtered by a cost allocation
//! tag.

mod api_gateway;
mod client;
mod cloudwatch;
mod cost;
mod dynamodb;
mod lambda;
mod mapper;

pub use api_gateway::CloudWatchApiGatewaySource;
pub use client::AwsClients;
pub use cost::CostExplorerSource;
pub use dynamodb::CloudWatchDynamoDbSource;
pub use lambda::CloudWatchLambdaSource;
