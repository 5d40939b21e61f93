use async_trait::async_trait;
use pulseboard_source_api::{
    ApiGatewayMetrics,
    ApiGatewaySource,
    SourceApiResult,
    TimeWindow,
};

use crate::cloudwatch::{
    CloudWatchReader,
    MetricQuery,
    Stat,
};
use crate::mapper::to_count;

const NAMESPACE: &str = "AWS/ApiGateway";

pub struct CloudWatchApiGatewaySource {
    reader: CloudWatchReader,
}

impl CloudWatchApiGatewaySource {
    pub fn new(client: aws_sdk_cloudwatch::Client) -> Self {
        Self {
            reader: CloudWatchReader::new(client),
        }
    }
}

#[async_trait]
impl ApiGatewaySource for CloudWatchApiGatewaySource {
    async fn fetch_api_metrics(
        &self, api_name: &str, window: TimeWindow,
    ) -> SourceApiResult<ApiGatewayMetrics> {
        let dimensions = [("ApiName", api_name)];
        let query = |metric_name: &'static str, stat: Stat| MetricQuery {
            namespace: NAMESPACE,
            metric_name,
            dimensions: &dimensions,
            stat,
        };

        let (count, errors_4xx, errors_5xx, latency, integration_latency) = tokio::try_join!(
            self.reader.statistic(query("Count", Stat::Sum), window),
            self.reader.statistic(query("4XXError", Stat::Sum), window),
            self.reader.statistic(query("5XXError", Stat::Sum), window),
            self.reader.statistic(query("Latency", Stat::Average), window),
            self.reader
                .statistic(query("IntegrationLatency", Stat::Average), window),
        )?;

        tracing::debug!(api = api_name, "Fetched API Gateway metrics");

        Ok(ApiGatewayMetrics {
            api_name: api_name.to_string(),
            count: to_count(count),
            errors_4xx: to_count(errors_4xx),
            errors_5xx: to_count(errors_5xx),
            avg_latency_ms: latency,
            avg_integration_latency_ms: integration_latency,
        })
    }
}
