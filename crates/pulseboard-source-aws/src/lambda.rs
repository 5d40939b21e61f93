use async_trait::async_trait;
use pulseboard_source_api::{
    LambdaMetrics,
    LambdaSource,
    SourceApiResult,
    TimeWindow,
};

use crate::cloudwatch::{
    CloudWatchReader,
    MetricQuery,
    Stat,
};
use crate::mapper::to_count;

const NAMESPACE: &str = "AWS/Lambda";

pub struct CloudWatchLambdaSource {
    reader: CloudWatchReader,
}

impl CloudWatchLambdaSource {
    pub fn new(client: aws_sdk_cloudwatch::Client) -> Self {
        Self {
            reader: CloudWatchReader::new(client),
        }
    }
}

#[async_trait]
impl LambdaSource for CloudWatchLambdaSource {
    async fn fetch_function_metrics(
        &self, function_name: &str, window: TimeWindow,
    ) -> SourceApiResult<LambdaMetrics> {
        let dimensions = [("FunctionName", function_name)];
        let query = |metric_name: &'static str, stat: Stat| MetricQuery {
            namespace: NAMESPACE,
            metric_name,
            dimensions: &dimensions,
            stat,
        };

        let (invocations, errors, throttles, duration, concurrency) = tokio::try_join!(
            self.reader.statistic(query("Invocations", Stat::Sum), window),
            self.reader.statistic(query("Errors", Stat::Sum), window),
            self.reader.statistic(query("Throttles", Stat::Sum), window),
            self.reader.statistic(query("Duration", Stat::Average), window),
            self.reader
                .statistic(query("ConcurrentExecutions", Stat::Maximum), window),
        )?;

        tracing::debug!(function = function_name, "Fetched Lambda metrics");

        Ok(LambdaMetrics {
            function_name: function_name.to_string(),
            invocations: to_count(invocations),
            errors: to_count(errors),
            throttles: to_count(throttles),
            avg_duration_ms: duration,
            max_concurrent_executions: concurrency,
        })
    }
}
