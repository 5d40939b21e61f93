use async_trait::async_trait;
use futures::future::try_join_all;
use pulseboard_source_api::{
    DynamoDbMetrics,
    DynamoDbSource,
    SourceApiResult,
    TimeWindow,
};

use crate::cloudwatch::{
    CloudWatchReader,
    MetricQuery,
    Stat,
};
use crate::mapper::{
    map_sdk_error,
    to_count,
};

const NAMESPACE: &str = "AWS/DynamoDB";

/// `SystemErrors` is only published per operation
const ERROR_OPERATIONS: &[&str] = &[
    "GetItem",
    "PutItem",
    "UpdateItem",
    "DeleteItem",
    "Query",
    "Scan",
    "BatchGetItem",
    "BatchWriteItem",
];

const LATENCY_OPERATIONS: &[&str] = &["GetItem", "PutItem", "Query"];

pub struct CloudWatchDynamoDbSource {
    reader: CloudWatchReader,
    dynamodb: aws_sdk_dynamodb::Client,
}

impl CloudWatchDynamoDbSource {
    pub fn new(cloudwatch: aws_sdk_cloudwatch::Client, dynamodb: aws_sdk_dynamodb::Client) -> Self {
        Self {
            reader: CloudWatchReader::new(cloudwatch),
            dynamodb,
        }
    }

    async fn table_sum(
        &self, table_name: &str, metric_name: &str, window: TimeWindow,
    ) -> SourceApiResult<Option<f64>> {
        self.reader
            .statistic(
                MetricQuery {
                    namespace: NAMESPACE,
                    metric_name,
                    dimensions: &[("TableName", table_name)],
                    stat: Stat::Sum,
                },
                window,
            )
            .await
    }

    async fn per_operation(
        &self, table_name: &str, metric_name: &str, operations: &[&str], stat: Stat,
        window: TimeWindow,
    ) -> SourceApiResult<Vec<f64>> {
        let lookups = operations.iter().map(|operation| async move {
            self.reader
                .statistic(
                    MetricQuery {
                        namespace: NAMESPACE,
                        metric_name,
                        dimensions: &[("TableName", table_name), ("Operation", *operation)],
                        stat,
                    },
                    window,
                )
                .await
        });

        Ok(try_join_all(lookups).await?.into_iter().flatten().collect())
    }

    async fn describe(&self, table_name: &str) -> SourceApiResult<(Option<i64>, Option<i64>)> {
        let output = self
            .dynamodb
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| map_sdk_error(&format!("DescribeTable {table_name}"), e))?;

        Ok(output
            .table()
            .map(|t| (t.item_count(), t.table_size_bytes()))
            .unwrap_or((None, None)))
    }
}

#[async_trait]
impl DynamoDbSource for CloudWatchDynamoDbSource {
    async fn fetch_table_metrics(
        &self, table_name: &str, window: TimeWindow,
    ) -> SourceApiResult<DynamoDbMetrics> {
        let (
            read_capacity,
            write_capacity,
            read_throttles,
            write_throttles,
            system_errors,
            latencies,
            (item_count, table_size_bytes),
        ) = tokio::try_join!(
            self.table_sum(table_name, "ConsumedReadCapacityUnits", window),
            self.table_sum(table_name, "ConsumedWriteCapacityUnits", window),
            self.table_sum(table_name, "ReadThrottleEvents", window),
            self.table_sum(table_name, "WriteThrottleEvents", window),
            self.per_operation(table_name, "SystemErrors", ERROR_OPERATIONS, Stat::Sum, window),
            self.per_operation(
                table_name,
                "SuccessfulRequestLatency",
                LATENCY_OPERATIONS,
                Stat::Average,
                window,
            ),
            self.describe(table_name),
        )?;

        tracing::debug!(table = table_name, "Fetched DynamoDB metrics");

        Ok(DynamoDbMetrics {
            table_name: table_name.to_string(),
            consumed_read_capacity: read_capacity.unwrap_or(0.0),
            consumed_write_capacity: write_capacity.unwrap_or(0.0),
            throttled_requests: to_count(read_throttles) + to_count(write_throttles),
            system_errors: to_count(Stat::Sum.fold(&system_errors)),
            avg_successful_request_latency_ms: Stat::Average.fold(&latencies),
            item_count,
            table_size_bytes,
        })
    }
}
