use std::collections::BTreeMap;

use async_trait::async_trait;
use aws_sdk_costexplorer::types::{
    DateInterval,
    Expression,
    Granularity,
    GroupDefinition,
    GroupDefinitionType,
    ResultByTime,
    TagValues,
};
use chrono::{
    Duration,
    NaiveDate,
};
use pulseboard_source_api::{
    CostMetrics,
    CostSource,
    DailyCost,
    ServiceCost,
    SourceApiResult,
    SourceError,
    TimeWindow,
};

use crate::mapper::map_sdk_error;

const COST_METRIC: &str = "UnblendedCost";

const DATE_FORMAT: &str = "%Y-%m-%d";

const MAX_PAGES: usize = 20;

pub struct CostExplorerSource {
    client: aws_sdk_costexplorer::Client,
    tag_key: String,
}

impl CostExplorerSource {
    pub fn new(client: aws_sdk_costexplorer::Client, tag_key: impl Into<String>) -> Self {
        Self {
            client,
            tag_key: tag_key.into(),
        }
    }
}

/// Cost Explorer works on whole days with an exclusive end date.
fn date_range(window: TimeWindow) -> (NaiveDate, NaiveDate) {
    let start = window.start().date_naive();
    let mut end = window.end().date_naive();
    if window.end().time() > chrono::NaiveTime::MIN || end <= start {
        end += Duration::days(1);
    }
    (start, end)
}

fn billed_days(start: NaiveDate, end: NaiveDate) -> u32 {
    u32::try_from((end - start).num_days()).unwrap_or(0)
}

/// Token for the next request, or `None` once the results are complete or the
/// page cap is hit.
fn next_page(page: usize, token: Option<&str>, cost_tag: &str) -> Option<String> {
    let token = token.filter(|t| !t.is_empty())?;
    if page >= MAX_PAGES {
        tracing::warn!(
            tag = cost_tag,
            pages = MAX_PAGES,
            "Cost Explorer page limit reached, results are truncated"
        );
        return None;
    }
    Some(token.to_string())
}

#[async_trait]
impl CostSource for CostExplorerSource {
    async fn fetch_costs(
        &self, cost_tag: &str, window: TimeWindow,
    ) -> SourceApiResult<CostMetrics> {
        let (start, end) = date_range(window);
        let period = DateInterval::builder()
            .start(start.format(DATE_FORMAT).to_string())
            .end(end.format(DATE_FORMAT).to_string())
            .build()
            .map_err(|e| SourceError::InvalidConfig(format!("Invalid cost period: {e}")))?;

        let filter = Expression::builder()
            .tags(
                TagValues::builder()
                    .key(&self.tag_key)
                    .values(cost_tag)
                    .build(),
            )
            .build();

        let mut results: Vec<ResultByTime> = Vec::new();
        let mut next_token: Option<String> = None;

        for page in 1..=MAX_PAGES {
            let output = self
                .client
                .get_cost_and_usage()
                .time_period(period.clone())
                .granularity(Granularity::Daily)
                .metrics(COST_METRIC)
                .filter(filter.clone())
                .group_by(
                    GroupDefinition::builder()
                        .r#type(GroupDefinitionType::Dimension)
                        .key("SERVICE")
                        .build(),
                )
                .set_next_page_token(next_token.take())
                .send()
                .await
                .map_err(|e| map_sdk_error("GetCostAndUsage", e))?;

            results.extend(output.results_by_time().iter().cloned());

            next_token = next_page(page, output.next_page_token(), cost_tag);
            if next_token.is_none() {
                break;
            }
        }

        let mut metrics = fold_results(&results)?;
        metrics.days = billed_days(start, end);
        tracing::debug!(
            tag = cost_tag,
            total = metrics.total,
            days = metrics.days,
            "Fetched cost data"
        );
        Ok(metrics)
    }
}

fn fold_results(results: &[ResultByTime]) -> SourceApiResult<CostMetrics> {
    let mut by_service: BTreeMap<String, f64> = BTreeMap::new();
    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut currency = String::new();

    for result in results {
        let date = result
            .time_period()
            .map(|p| NaiveDate::parse_from_str(p.start(), DATE_FORMAT))
            .transpose()
            .map_err(|e| SourceError::InvalidResponse(format!("Bad cost date: {e}")))?;

        for group in result.groups() {
            let Some(value) = group.metrics().and_then(|m| m.get(COST_METRIC)) else {
                continue;
            };
            let amount = value
                .amount()
                .unwrap_or("0")
                .parse::<f64>()
                .map_err(|e| SourceError::InvalidResponse(format!("Bad cost amount: {e}")))?;

            if currency.is_empty() {
                if let Some(unit) = value.unit() {
                    currency = unit.to_string();
                }
            }

            let service = group
                .keys()
                .first()
                .cloned()
                .unwrap_or_else(|| "Other".to_string());
            *by_service.entry(service).or_default() += amount;

            if let Some(date) = date {
                *daily.entry(date).or_default() += amount;
            }
        }
    }

    Ok(CostMetrics {
        total: by_service.values().sum(),
        days: 0,
        currency: if currency.is_empty() {
            "USD".to_string()
        } else {
            currency
        },
        by_service: by_service
            .into_iter()
            .map(|(service, amount)| ServiceCost { service, amount })
            .collect(),
        daily: daily
            .into_iter()
            .map(|(date, amount)| DailyCost { date, amount })
            .collect(),
    })
}
