use pulseboard_source_api::{
    ApiGatewayMetrics,
    DynamoDbMetrics,
    LambdaMetrics,
};

use crate::domain::summary::rate;
use crate::domain::{
    CategoryResults,
    HealthStatus,
    HealthThresholds,
    ResourceResult,
    SourceResult,
};

enum Assessment {
    Healthy,
    Degraded(String),
    Unknown,
}

#[derive(Default)]
struct Tally {
    healthy: usize,
    degraded: usize,
    unknown: usize,
    issues: Vec<String>,
}

impl Tally {
    fn record(&mut self, assessment: Assessment) {
        match assessment {
            Assessment::Healthy => self.healthy += 1,
            Assessment::Degraded(issue) => {
                self.degraded += 1;
                self.issues.push(issue);
            }
            Assessment::Unknown => self.unknown += 1,
        }
    }
}

/// Derives the health verdict from per-resource results.
///
/// Resources are visited Lambda functions first, then the API, then DynamoDB
/// tables, each in declaration order, so the issue list does not depend on
/// which fetch finished first. Failed fetches count as unknown and produce no
/// issue.
pub fn classify(results: &CategoryResults, thresholds: &HealthThresholds) -> HealthStatus {
    let mut tally = Tally::default();

    for function in &results.lambda {
        tally.record(assess(function, |m| assess_lambda(m, thresholds)));
    }

    if let Some(api) = &results.api_gateway {
        tally.record(assess(api, |m| assess_api_gateway(m, thresholds)));
    }

    for table in &results.dynamodb {
        tally.record(assess(table, |m| assess_dynamodb(m, thresholds)));
    }

    HealthStatus::new(tally.healthy, tally.degraded, tally.unknown, tally.issues)
}

fn assess<T>(
    resource: &ResourceResult<T>, evaluate: impl FnOnce(&T) -> Vec<String>,
) -> Assessment {
    match &resource.result {
        SourceResult::Failed(_) => Assessment::Unknown,
        SourceResult::Fetched(metrics) => {
            let reasons = evaluate(metrics);
            if reasons.is_empty() {
                Assessment::Healthy
            } else {
                Assessment::Degraded(reasons.join(" and "))
            }
        }
    }
}

fn assess_lambda(metrics: &LambdaMetrics, thresholds: &HealthThresholds) -> Vec<String> {
    let mut reasons = Vec::new();
    let error_rate = rate(metrics.errors, metrics.invocations);

    if error_rate > thresholds.lambda_error_rate_percent {
        reasons.push(format!(
            "Lambda {} has high error rate: {:.2}%",
            metrics.function_name, error_rate
        ));
    }
    if metrics.throttles > thresholds.lambda_max_throttles {
        let throttled = format!("{} throttled invocations", metrics.throttles);
        if reasons.is_empty() {
            reasons.push(format!("Lambda {} has {}", metrics.function_name, throttled));
        } else {
            reasons.push(throttled);
        }
    }
    reasons
}

fn assess_api_gateway(metrics: &ApiGatewayMetrics, thresholds: &HealthThresholds) -> Vec<String> {
    let mut reasons = Vec::new();
    let error_rate = rate(metrics.errors_4xx + metrics.errors_5xx, metrics.count);

    if error_rate > thresholds.api_error_rate_percent {
        reasons.push(format!(
            "API Gateway {} has high error rate: {:.2}%",
            metrics.api_name, error_rate
        ));
    }
    if let Some(latency) = metrics.avg_latency_ms {
        if latency > thresholds.api_latency_ms {
            let slow = format!("high latency: {:.0}ms", latency);
            if reasons.is_empty() {
                reasons.push(format!("API Gateway {} has {}", metrics.api_name, slow));
            } else {
                reasons.push(slow);
            }
        }
    }
    reasons
}

fn assess_dynamodb(metrics: &DynamoDbMetrics, thresholds: &HealthThresholds) -> Vec<String> {
    let mut reasons = Vec::new();

    if metrics.throttled_requests > thresholds.dynamodb_max_throttled_requests {
        reasons.push(format!(
            "DynamoDB table {} has {} throttled requests",
            metrics.table_name, metrics.throttled_requests
        ));
    }
    if metrics.system_errors > thresholds.dynamodb_max_system_errors {
        let errors = format!("{} system errors", metrics.system_errors);
        if reasons.is_empty() {
            reasons.push(format!("DynamoDB table {} has {}", metrics.table_name, errors));
        } else {
            reasons.push(errors);
        }
    }
    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HealthVerdict;

    fn lambda(name: &str, invocations: u64, errors: u64, throttles: u64) -> ResourceResult<LambdaMetrics> {
        ResourceResult::new(
            name,
            SourceResult::Fetched(LambdaMetrics {
                function_name: name.to_string(),
                invocations,
                errors,
                throttles,
                ..Default::default()
            }),
        )
    }

    fn failed<T>(name: &str) -> ResourceResult<T> {
        ResourceResult::new(name, SourceResult::Failed("unreachable".to_string()))
    }

    fn table(name: &str, throttled: u64, system_errors: u64) -> ResourceResult<DynamoDbMetrics> {
        ResourceResult::new(
            name,
            SourceResult::Fetched(DynamoDbMetrics {
                table_name: name.to_string(),
                throttled_requests: throttled,
                system_errors,
                ..Default::default()
            }),
        )
    }

    fn api(count: u64, errors_4xx: u64, errors_5xx: u64, latency: Option<f64>) -> ResourceResult<ApiGatewayMetrics> {
        ResourceResult::new(
            "public-api",
            SourceResult::Fetched(ApiGatewayMetrics {
                api_name: "public-api".to_string(),
                count,
                errors_4xx,
                errors_5xx,
                avg_latency_ms: latency,
                avg_integration_latency_ms: None,
            }),
        )
    }

    #[test]
    fn test_empty_results_are_healthy() {
        let status = classify(&CategoryResults::default(), &HealthThresholds::default());
        assert_eq!(status.verdict, HealthVerdict::Healthy);
        assert_eq!(status.healthy_count + status.degraded_count + status.unknown_count, 0);
        assert!(status.issues.is_empty());
    }

    #[test]
    fn test_failed_fetches_are_unknown() {
        let results = CategoryResults {
            lambda: vec![failed("a"), failed("b")],
            api_gateway: Some(failed("public-api")),
            dynamodb: vec![failed("users")],
            ..Default::default()
        };
        let status = classify(&results, &HealthThresholds::default());
        assert_eq!(status.unknown_count, 4);
        assert_eq!(status.verdict, HealthVerdict::Healthy);
        assert!(status.issues.is_empty());
    }

    #[test]
    fn test_error_rate_at_threshold_is_healthy() {
        let results = CategoryResults {
            lambda: vec![lambda("a", 1000, 50, 0)],
            ..Default::default()
        };
        let status = classify(&results, &HealthThresholds::default());
        assert_eq!(status.healthy_count, 1);
        assert_eq!(status.verdict, HealthVerdict::Healthy);
    }

    #[test]
    fn test_lambda_reasons_combine_into_one_issue() {
        let results = CategoryResults {
            lambda: vec![lambda("checkout", 1000, 75, 3), lambda("search", 10, 0, 0)],
            ..Default::default()
        };
        let status = classify(&results, &HealthThresholds::default());
        assert_eq!(status.degraded_count, 1);
        assert_eq!(status.healthy_count, 1);
        assert_eq!(status.verdict, HealthVerdict::Degraded);
        assert_eq!(
            status.issues,
            vec!["Lambda checkout has high error rate: 7.50% and 3 throttled invocations"]
        );
    }

    #[test]
    fn test_throttle_only_issue() {
        let results = CategoryResults {
            lambda: vec![lambda("resize", 100, 0, 1)],
            ..Default::default()
        };
        let status = classify(&results, &HealthThresholds::default());
        assert_eq!(status.issues, vec!["Lambda resize has 1 throttled invocations"]);
        assert_eq!(status.verdict, HealthVerdict::Critical);
    }

    #[test]
    fn test_api_gateway_latency_and_errors() {
        let slow = CategoryResults {
            api_gateway: Some(api(100, 0, 0, Some(1500.0))),
            ..Default::default()
        };
        let status = classify(&slow, &HealthThresholds::default());
        assert_eq!(status.issues, vec!["API Gateway public-api has high latency: 1500ms"]);

        let failing = CategoryResults {
            api_gateway: Some(api(100, 4, 3, None)),
            ..Default::default()
        };
        let status = classify(&failing, &HealthThresholds::default());
        assert_eq!(
            status.issues,
            vec!["API Gateway public-api has high error rate: 7.00%"]
        );

        let idle = CategoryResults {
            api_gateway: Some(api(0, 0, 0, None)),
            ..Default::default()
        };
        assert_eq!(classify(&idle, &HealthThresholds::default()).healthy_count, 1);
    }

    #[test]
    fn test_dynamodb_signals() {
        let results = CategoryResults {
            dynamodb: vec![table("users", 0, 0), table("orders", 4, 0), table("carts", 0, 2)],
            ..Default::default()
        };
        let status = classify(&results, &HealthThresholds::default());
        assert_eq!(status.degraded_count, 2);
        assert_eq!(status.healthy_count, 1);
        assert_eq!(status.verdict, HealthVerdict::Critical);
        assert_eq!(
            status.issues,
            vec![
                "DynamoDB table orders has 4 throttled requests",
                "DynamoDB table carts has 2 system errors",
            ]
        );
    }

    #[test]
    fn test_issue_order_follows_categories_then_declaration() {
        let results = CategoryResults {
            lambda: vec![lambda("z-last", 10, 5, 0), lambda("a-first", 10, 5, 0)],
            api_gateway: Some(api(10, 5, 0, None)),
            dynamodb: vec![table("orders", 1, 0)],
            ..Default::default()
        };
        let first = classify(&results, &HealthThresholds::default());
        let second = classify(&results, &HealthThresholds::default());

        assert_eq!(first.issues, second.issues);
        assert!(first.issues[0].starts_with("Lambda z-last"));
        assert!(first.issues[1].starts_with("Lambda a-first"));
        assert!(first.issues[2].starts_with("API Gateway"));
        assert!(first.issues[3].starts_with("DynamoDB"));
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = HealthThresholds {
            lambda_error_rate_percent: 20.0,
            lambda_max_throttles: 5,
            ..Default::default()
        };
        let results = CategoryResults {
            lambda: vec![lambda("batch", 100, 15, 5)],
            ..Default::default()
        };
        assert_eq!(classify(&results, &thresholds).verdict, HealthVerdict::Healthy);
    }
}
