use aws_sdk_cloudwatch::primitives::DateTime as AwsDateTime;
use aws_sdk_cloudwatch::types::{
    Datapoint,
    Dimension,
    Statistic,
};
use aws_sdk_cloudwatch::Client;
use pulseboard_source_api::{
    SourceApiResult,
    TimeWindow,
};

use crate::mapper::map_sdk_error;

/// How datapoints for one metric are folded into a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stat {
    Sum,
    Average,
    Maximum,
}

impl Stat {
    fn statistic(self) -> Statistic {
        match self {
            Stat::Sum => Statistic::Sum,
            Stat::Average => Statistic::Average,
            Stat::Maximum => Statistic::Maximum,
        }
    }

    fn pick(self, datapoint: &Datapoint) -> Option<f64> {
        match self {
            Stat::Sum => datapoint.sum(),
            Stat::Average => datapoint.average(),
            Stat::Maximum => datapoint.maximum(),
        }
    }

    /// `None` when CloudWatch returned no datapoints for the window
    pub(crate) fn fold(self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(match self {
            Stat::Sum => values.iter().sum(),
            Stat::Average => values.iter().sum::<f64>() / values.len() as f64,
            Stat::Maximum => values.iter().copied().fold(f64::MIN, f64::max),
        })
    }
}

/// One metric lookup: namespace, name and dimension filter
pub(crate) struct MetricQuery<'a> {
    pub namespace: &'a str,
    pub metric_name: &'a str,
    pub dimensions: &'a [(&'a str, &'a str)],
    pub stat: Stat,
}

#[derive(Clone)]
pub(crate) struct CloudWatchReader {
    client: Client,
}

impl CloudWatchReader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Reads one statistic over the whole window.
    pub async fn statistic(
        &self, query: MetricQuery<'_>, window: TimeWindow,
    ) -> SourceApiResult<Option<f64>> {
        let dimensions: Vec<Dimension> = query
            .dimensions
            .iter()
            .map(|(name, value)| Dimension::builder().name(*name).value(*value).build())
            .collect();

        let output = self
            .client
            .get_metric_statistics()
            .namespace(query.namespace)
            .metric_name(query.metric_name)
            .set_dimensions(Some(dimensions))
            .start_time(AwsDateTime::from_secs(window.start().timestamp()))
            .end_time(AwsDateTime::from_secs(window.end().timestamp()))
            .period(window.single_period_secs())
            .statistics(query.stat.statistic())
            .send()
            .await
            .map_err(|e| {
                map_sdk_error(
                    &format!("GetMetricStatistics {}/{}", query.namespace, query.metric_name),
                    e,
                )
            })?;

        let values: Vec<f64> = output
            .datapoints()
            .iter()
            .filter_map(|dp| query.stat.pick(dp))
            .collect();

        tracing::trace!(
            namespace = query.namespace,
            metric = query.metric_name,
            datapoints = values.len(),
            "CloudWatch statistic"
        );

        Ok(query.stat.fold(&values))
    }
}
