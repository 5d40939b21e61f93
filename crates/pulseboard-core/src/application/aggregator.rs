use std::future::Future;
use std::sync::Arc;
use std::time::{
    Duration,
    Instant,
};

use chrono::Utc;
use futures::future::join_all;
use pulseboard_source_api::{
    ApiGatewayMetrics,
    AppStoreMetrics,
    CostMetrics,
    DynamoDbMetrics,
    LambdaMetrics,
    MetricSources,
    RetryPolicy,
    SourceApiResult,
    SourceError,
    TimeWindow,
};
use tokio::sync::Semaphore;
use tokio::time::timeout;

use super::health::classify;
use super::resolver::ResourceResolver;
use crate::domain::{
    AggregateMetrics,
    ApiGatewaySummary,
    AppStoreSummary,
    AwsMetrics,
    CategoryReport,
    CategoryResults,
    CategoryStatus,
    CostSummary,
    DynamoDbSummary,
    HealthThresholds,
    LambdaSummary,
    ResourceResult,
    SourceResult,
    SourceStatuses,
};
use crate::infrastructure::config::AggregationConfig;

const RETRY_INITIAL_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy)]
pub struct AggregateOptions {
    /// Whether the App Store category is fetched; it is reported as skipped
    /// otherwise
    pub include_app_store: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            include_app_store: true,
        }
    }
}

/// Fans one request out to every metric source and folds the outcomes into a
/// single document.
///
/// Each adapter call runs under its own timeout and retry policy, and a
/// failure only ever affects the resource it was made for. Per-resource
/// results are joined in declaration order, so nothing downstream depends on
/// which call finished first.
pub struct Aggregator {
    sources: MetricSources,
    resolver: Arc<ResourceResolver>,
    config: AggregationConfig,
    thresholds: HealthThresholds,
}

impl Aggregator {
    pub fn new(
        sources: MetricSources, resolver: Arc<ResourceResolver>, config: AggregationConfig,
        thresholds: HealthThresholds,
    ) -> Self {
        Self {
            sources,
            resolver,
            config,
            thresholds,
        }
    }

    pub fn resolver(&self) -> &ResourceResolver {
        &self.resolver
    }

    pub async fn aggregate(
        &self, app_id: &str, window: TimeWindow, options: AggregateOptions,
    ) -> AggregateMetrics {
        let started = Instant::now();
        let resources = self.resolver.resolve(app_id);
        if resources.is_empty() {
            tracing::debug!(app_id, "No resources configured for app");
        }

        let limiter = self.limiter();
        let (lambda, api_gateway, dynamodb, cost, app_store) = tokio::join!(
            self.fetch_lambda(&resources.lambda_functions, window, &limiter),
            self.fetch_api_gateway(resources.api_gateway.as_deref(), window, &limiter),
            self.fetch_dynamodb(&resources.dynamodb_tables, window, &limiter),
            self.fetch_cost(resources.cost_tag.as_deref(), window, &limiter),
            async {
                if options.include_app_store {
                    self.fetch_app_store(resources.app_store_id.as_deref(), window, &limiter)
                        .await
                } else {
                    None
                }
            },
        );

        let results = CategoryResults {
            lambda,
            api_gateway,
            dynamodb,
            cost,
            app_store,
        };

        let health = classify(&results, &self.thresholds);
        let sources = SourceStatuses {
            lambda: CategoryStatus::from_resources(&results.lambda),
            api_gateway: CategoryStatus::from_optional(results.api_gateway.as_ref()),
            dynamodb: CategoryStatus::from_resources(&results.dynamodb),
            cost: CategoryStatus::from_optional(results.cost.as_ref()),
            app_store: if options.include_app_store {
                CategoryStatus::from_optional(results.app_store.as_ref())
            } else {
                CategoryStatus::skipped()
            },
        };

        if sources.all_failed() {
            tracing::warn!(app_id, "Every metric source failed, serving zero summaries");
        }

        let CategoryResults {
            lambda,
            api_gateway,
            dynamodb,
            cost,
            app_store,
        } = results;

        let aggregate = AggregateMetrics {
            app_id: app_id.to_string(),
            period: window,
            timestamp: Utc::now(),
            aws: AwsMetrics {
                lambda: LambdaSummary::from_metrics(fetched(lambda)),
                api_gateway: api_gateway_summary(api_gateway),
                dynamodb: DynamoDbSummary::from_metrics(fetched(dynamodb)),
                cost: cost_summary(cost, window),
            },
            app_store: app_store_summary(app_store),
            health,
            sources,
        };

        tracing::info!(
            app_id,
            verdict = %aggregate.health.verdict,
            unknown = aggregate.health.unknown_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Aggregated metrics"
        );

        aggregate
    }

    pub async fn lambda(&self, app_id: &str, window: TimeWindow) -> CategoryReport<LambdaSummary> {
        let functions = self.resolver.lambda_functions(app_id);
        let results = self.fetch_lambda(&functions, window, &self.limiter()).await;
        let status = CategoryStatus::from_resources(&results);
        report(app_id, window, LambdaSummary::from_metrics(fetched(results)), status)
    }

    pub async fn api_gateway(
        &self, app_id: &str, window: TimeWindow,
    ) -> CategoryReport<ApiGatewaySummary> {
        let api = self.resolver.api_gateway(app_id);
        let result = self
            .fetch_api_gateway(api.as_deref(), window, &self.limiter())
            .await;
        let status = CategoryStatus::from_optional(result.as_ref());
        report(app_id, window, api_gateway_summary(result), status)
    }

    pub async fn dynamodb(
        &self, app_id: &str, window: TimeWindow,
    ) -> CategoryReport<DynamoDbSummary> {
        let tables = self.resolver.dynamodb_tables(app_id);
        let results = self.fetch_dynamodb(&tables, window, &self.limiter()).await;
        let status = CategoryStatus::from_resources(&results);
        report(app_id, window, DynamoDbSummary::from_metrics(fetched(results)), status)
    }

    pub async fn cost(&self, app_id: &str, window: TimeWindow) -> CategoryReport<CostSummary> {
        let tag = self.resolver.resolve(app_id).cost_tag;
        let result = self
            .fetch_cost(tag.as_deref(), window, &self.limiter())
            .await;
        let status = CategoryStatus::from_optional(result.as_ref());
        report(app_id, window, cost_summary(result, window), status)
    }

    pub async fn app_store(
        &self, app_id: &str, window: TimeWindow,
    ) -> CategoryReport<AppStoreSummary> {
        let app_store_id = self.resolver.app_store_id(app_id);
        let result = self
            .fetch_app_store(app_store_id.as_deref(), window, &self.limiter())
            .await;
        let status = CategoryStatus::from_optional(result.as_ref());
        report(app_id, window, app_store_summary(result), status)
    }

    fn limiter(&self) -> Semaphore {
        Semaphore::new(self.config.max_concurrent_fetches.max(1))
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.config.retry_attempts, RETRY_INITIAL_DELAY, true)
    }

    async fn fetch_lambda(
        &self, functions: &[String], window: TimeWindow, limiter: &Semaphore,
    ) -> Vec<ResourceResult<LambdaMetrics>> {
        join_all(functions.iter().map(|name| {
            self.call(limiter, "lambda", name, move || {
                self.sources.lambda.fetch_function_metrics(name, window)
            })
        }))
        .await
    }

    async fn fetch_api_gateway(
        &self, api: Option<&str>, window: TimeWindow, limiter: &Semaphore,
    ) -> Option<ResourceResult<ApiGatewayMetrics>> {
        let name = api?;
        Some(
            self.call(limiter, "api_gateway", name, move || {
                self.sources.api_gateway.fetch_api_metrics(name, window)
            })
            .await,
        )
    }

    async fn fetch_dynamodb(
        &self, tables: &[String], window: TimeWindow, limiter: &Semaphore,
    ) -> Vec<ResourceResult<DynamoDbMetrics>> {
        join_all(tables.iter().map(|name| {
            self.call(limiter, "dynamodb", name, move || {
                self.sources.dynamodb.fetch_table_metrics(name, window)
            })
        }))
        .await
    }

    async fn fetch_cost(
        &self, cost_tag: Option<&str>, window: TimeWindow, limiter: &Semaphore,
    ) -> Option<ResourceResult<CostMetrics>> {
        let tag = cost_tag?;
        Some(
            self.call(limiter, "cost", tag, move || self.sources.cost.fetch_costs(tag, window))
                .await,
        )
    }

    async fn fetch_app_store(
        &self, app_store_id: Option<&str>, window: TimeWindow, limiter: &Semaphore,
    ) -> Option<ResourceResult<AppStoreMetrics>> {
        let id = app_store_id?;
        Some(
            self.call(limiter, "app_store", id, move || {
                self.sources.app_store.fetch_app_metrics(id, window)
            })
            .await,
        )
    }

    /// Runs one adapter call under the request's concurrency limit, the retry
    /// policy and the per-call timeout.
    async fn call<T, F, Fut>(
        &self, limiter: &Semaphore, category: &'static str, resource: &str, operation: F,
    ) -> ResourceResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = SourceApiResult<T>>,
    {
        let outcome = match limiter.acquire().await {
            Ok(_permit) => {
                match timeout(self.config.source_timeout(), self.retry_policy().retry(operation))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(SourceError::Timeout(self.config.source_timeout_secs)),
                }
            }
            Err(e) => Err(SourceError::Internal(format!("Fetch limiter closed: {e}"))),
        };

        if let Err(e) = &outcome {
            tracing::warn!(category, resource, error = %e, "Metric source call failed");
        }

        ResourceResult::new(resource, SourceResult::from(outcome))
    }
}

fn fetched<T>(results: Vec<ResourceResult<T>>) -> Vec<T> {
    results
        .into_iter()
        .filter_map(|r| r.result.into_fetched())
        .collect()
}

fn fetched_one<T>(result: Option<ResourceResult<T>>) -> Option<T> {
    result.and_then(|r| r.result.into_fetched())
}

fn api_gateway_summary(result: Option<ResourceResult<ApiGatewayMetrics>>) -> ApiGatewaySummary {
    fetched_one(result)
        .map(ApiGatewaySummary::from_metrics)
        .unwrap_or_default()
}

fn cost_summary(result: Option<ResourceResult<CostMetrics>>, window: TimeWindow) -> CostSummary {
    fetched_one(result)
        .map(|metrics| CostSummary::from_metrics(metrics, window))
        .unwrap_or_default()
}

fn app_store_summary(result: Option<ResourceResult<AppStoreMetrics>>) -> AppStoreSummary {
    fetched_one(result)
        .map(AppStoreSummary::from_metrics)
        .unwrap_or_default()
}

fn report<S>(
    app_id: &str, window: TimeWindow, summary: S, status: CategoryStatus,
) -> CategoryReport<S> {
    CategoryReport {
        app_id: app_id.to_string(),
        period: window,
        timestamp: Utc::now(),
        summary,
        status,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{
        AtomicUsize,
        Ordering,
    };
    use std::sync::Mutex;

    use async_trait::async_trait;
    use indexmap::IndexMap;
    use pulseboard_source_api::{
        ApiGatewaySource,
        AppStoreSource,
        CostSource,
        DynamoDbSource,
        LambdaSource,
    };

    use super::*;
    use crate::domain::{
        CategoryState,
        HealthVerdict,
        ResourceSet,
    };

    #[derive(Default)]
    struct FakeSources {
        lambda: HashMap<String, SourceApiResult<LambdaMetrics>>,
        api_gateway: HashMap<String, SourceApiResult<ApiGatewayMetrics>>,
        dynamodb: HashMap<String, SourceApiResult<DynamoDbMetrics>>,
        cost: HashMap<String, SourceApiResult<CostMetrics>>,
        app_store: HashMap<String, SourceApiResult<AppStoreMetrics>>,
        delays: HashMap<String, Duration>,
        /// Transient failures served before the fixture
        flaky: Mutex<HashMap<String, usize>>,
        calls: AtomicUsize,
        app_store_calls: AtomicUsize,
    }

    impl FakeSources {
        async fn serve<T: Clone>(
            &self, fixtures: &HashMap<String, SourceApiResult<T>>, name: &str,
        ) -> SourceApiResult<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delays.get(name) {
                tokio::time::sleep(*delay).await;
            }
            {
                let mut flaky = self.flaky.lock().unwrap();
                if let Some(remaining) = flaky.get_mut(name) {
                    if *remaining > 0 {
                        *remaining -= 1;
                        return Err(SourceError::NetworkError("connection reset".into()));
                    }
                }
            }
            fixtures
                .get(name)
                .cloned()
                .unwrap_or_else(|| Err(SourceError::ApiError(format!("no fixture for {name}"))))
        }

        fn into_sources(self) -> (Arc<Self>, MetricSources) {
            let fake = Arc::new(self);
            let sources = MetricSources {
                lambda: fake.clone(),
                api_gateway: fake.clone(),
                dynamodb: fake.clone(),
                cost: fake.clone(),
                app_store: fake.clone(),
            };
            (fake, sources)
        }
    }

    #[async_trait]
    impl LambdaSource for FakeSources {
        async fn fetch_function_metrics(
            &self, function_name: &str, _window: TimeWindow,
        ) -> SourceApiResult<LambdaMetrics> {
            self.serve(&self.lambda, function_name).await
        }
    }

    #[async_trait]
    impl ApiGatewaySource for FakeSources {
        async fn fetch_api_metrics(
            &self, api_name: &str, _window: TimeWindow,
        ) -> SourceApiResult<ApiGatewayMetrics> {
            self.serve(&self.api_gateway, api_name).await
        }
    }

    #[async_trait]
    impl DynamoDbSource for FakeSources {
        async fn fetch_table_metrics(
            &self, table_name: &str, _window: TimeWindow,
        ) -> SourceApiResult<DynamoDbMetrics> {
            self.serve(&self.dynamodb, table_name).await
        }
    }

    #[async_trait]
    impl CostSource for FakeSources {
        async fn fetch_costs(
            &self, cost_tag: &str, _window: TimeWindow,
        ) -> SourceApiResult<CostMetrics> {
            self.serve(&self.cost, cost_tag).await
        }
    }

    #[async_trait]
    impl AppStoreSource for FakeSources {
        async fn fetch_app_metrics(
            &self, app_store_id: &str, _window: TimeWindow,
        ) -> SourceApiResult<AppStoreMetrics> {
            self.app_store_calls.fetch_add(1, Ordering::SeqCst);
            self.serve(&self.app_store, app_store_id).await
        }
    }

    fn lambda(name: &str, invocations: u64, errors: u64) -> SourceApiResult<LambdaMetrics> {
        Ok(LambdaMetrics {
            function_name: name.to_string(),
            invocations,
            errors,
            ..Default::default()
        })
    }

    fn table(name: &str, throttled: u64) -> SourceApiResult<DynamoDbMetrics> {
        Ok(DynamoDbMetrics {
            table_name: name.to_string(),
            consumed_read_capacity: 10.0,
            throttled_requests: throttled,
            ..Default::default()
        })
    }

    fn network_error() -> SourceApiResult<LambdaMetrics> {
        Err(SourceError::NetworkError("unreachable".into()))
    }

    fn ilikeyacut() -> ResourceSet {
        ResourceSet {
            lambda_functions: ["A", "B", "C", "D", "E", "F"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            dynamodb_tables: vec!["users".into(), "bookings".into()],
            api_gateway: Some("ilikeyacut-api".into()),
            app_store_id: Some("1500000000".into()),
            cost_tag: Some("ilikeyacut".into()),
        }
    }

    fn aggregator(sources: MetricSources, config: AggregationConfig) -> Aggregator {
        let mut apps = IndexMap::new();
        apps.insert("ilikeyacut".to_string(), ilikeyacut());
        Aggregator::new(
            sources,
            Arc::new(ResourceResolver::new(apps)),
            config,
            HealthThresholds::default(),
        )
    }

    fn test_config() -> AggregationConfig {
        AggregationConfig {
            source_timeout_secs: 5,
            retry_attempts: 1,
            ..Default::default()
        }
    }

    fn window() -> TimeWindow {
        TimeWindow::last_hours(Utc::now(), 24).unwrap()
    }

    fn healthy_fixtures() -> FakeSources {
        let mut fake = FakeSources::default();
        for name in ["A", "B", "C", "D", "E", "F"] {
            fake.lambda.insert(name.into(), lambda(name, 100, 0));
        }
        fake.dynamodb.insert("users".into(), table("users", 0));
        fake.dynamodb
            .insert("bookings".into(), table("bookings", 0));
        fake.api_gateway.insert(
            "ilikeyacut-api".into(),
            Ok(ApiGatewayMetrics {
                api_name: "ilikeyacut-api".into(),
                count: 1000,
                errors_4xx: 10,
                errors_5xx: 2,
                avg_latency_ms: Some(120.0),
                ..Default::default()
            }),
        );
        fake.cost.insert(
            "ilikeyacut".into(),
            Ok(CostMetrics {
                total: 12.0,
                currency: "USD".into(),
                ..Default::default()
            }),
        );
        fake.app_store.insert(
            "1500000000".into(),
            Ok(AppStoreMetrics {
                app_store_id: "1500000000".into(),
                downloads: 40,
                ..Default::default()
            }),
        );
        fake
    }

    #[tokio::test]
    async fn test_partial_lambda_failure() {
        let mut fake = healthy_fixtures();
        fake.lambda.insert("A".into(), lambda("A", 1000, 50));
        for name in ["C", "D", "E", "F"] {
            fake.lambda.insert(name.into(), lambda(name, 0, 0));
        }
        fake.lambda.insert("B".into(), network_error());
        let (_, sources) = fake.into_sources();

        let aggregate = aggregator(sources, test_config())
            .aggregate("ilikeyacut", window(), AggregateOptions::default())
            .await;

        let lambda = &aggregate.aws.lambda;
        assert_eq!(lambda.total_invocations, 1000);
        assert_eq!(lambda.total_errors, 50);
        assert!((lambda.error_rate - 5.0).abs() < 1e-9);
        assert_eq!(lambda.functions.len(), 5);

        assert_eq!(aggregate.sources.lambda.state, CategoryState::Partial);
        assert_eq!(aggregate.sources.lambda.failed_resources, vec!["B".to_string()]);
        assert_eq!(aggregate.health.unknown_count, 1);
        assert_eq!(aggregate.health.verdict, HealthVerdict::Healthy);
        assert_eq!(aggregate.sources.cost.state, CategoryState::Ok);
        assert_eq!(aggregate.app_store.downloads, 40);
    }

    #[tokio::test]
    async fn test_total_failure_still_produces_document() {
        let (_, sources) = FakeSources::default().into_sources();

        let aggregate = aggregator(sources, test_config())
            .aggregate("ilikeyacut", window(), AggregateOptions::default())
            .await;

        assert_eq!(aggregate.app_id, "ilikeyacut");
        assert_eq!(aggregate.aws.lambda, LambdaSummary::default());
        assert_eq!(aggregate.aws.api_gateway, ApiGatewaySummary::default());
        assert_eq!(aggregate.aws.dynamodb, DynamoDbSummary::default());
        assert_eq!(aggregate.aws.cost, CostSummary::default());
        assert_eq!(aggregate.app_store, AppStoreSummary::default());
        assert!(aggregate.sources.all_failed());
        assert_eq!(aggregate.health.unknown_count, 9);
        assert_eq!(aggregate.health.healthy_count, 0);
        assert_eq!(aggregate.health.verdict, HealthVerdict::Healthy);
        assert!(aggregate.health.issues.is_empty());
    }

    #[tokio::test]
    async fn test_failed_category_does_not_touch_others() {
        let mut broken = healthy_fixtures();
        broken.dynamodb.clear();
        let (_, broken_sources) = broken.into_sources();
        let (_, healthy_sources) = healthy_fixtures().into_sources();

        let window = window();
        let with_outage = aggregator(broken_sources, test_config())
            .aggregate("ilikeyacut", window, AggregateOptions::default())
            .await;
        let baseline = aggregator(healthy_sources, test_config())
            .aggregate("ilikeyacut", window, AggregateOptions::default())
            .await;

        assert_eq!(with_outage.sources.dynamodb.state, CategoryState::Failed);
        assert_eq!(with_outage.aws.dynamodb, DynamoDbSummary::default());
        assert_eq!(with_outage.aws.lambda, baseline.aws.lambda);
        assert_eq!(with_outage.aws.api_gateway, baseline.aws.api_gateway);
        assert_eq!(with_outage.aws.cost, baseline.aws.cost);
        assert_eq!(with_outage.app_store, baseline.app_store);
    }

    #[tokio::test]
    async fn test_issue_order_ignores_completion_order() {
        let mut fake = healthy_fixtures();
        fake.lambda.insert("A".into(), lambda("A", 100, 20));
        fake.lambda.insert("F".into(), lambda("F", 100, 30));
        fake.dynamodb
            .insert("users".into(), table("users", 3));
        fake.delays.insert("A".into(), Duration::from_millis(80));
        fake.delays.insert("users".into(), Duration::from_millis(40));
        let (_, sources) = fake.into_sources();

        let aggregate = aggregator(sources, test_config())
            .aggregate("ilikeyacut", window(), AggregateOptions::default())
            .await;

        assert_eq!(
            aggregate.health.issues,
            vec![
                "Lambda A has high error rate: 20.00%".to_string(),
                "Lambda F has high error rate: 30.00%".to_string(),
                "DynamoDB table users has 3 throttled requests".to_string(),
            ]
        );
        assert_eq!(aggregate.health.degraded_count, 3);
        assert_eq!(aggregate.health.healthy_count, 6);
        assert_eq!(aggregate.health.verdict, HealthVerdict::Degraded);
        assert_eq!(
            aggregate
                .aws
                .lambda
                .functions
                .iter()
                .map(|f| f.function_name.as_str())
                .collect::<Vec<_>>(),
            vec!["A", "B", "C", "D", "E", "F"]
        );
    }

    #[tokio::test]
    async fn test_slow_source_times_out() {
        let mut fake = healthy_fixtures();
        fake.delays.insert("C".into(), Duration::from_secs(30));
        let (_, sources) = fake.into_sources();
        let config = AggregationConfig {
            source_timeout_secs: 1,
            retry_attempts: 1,
            ..Default::default()
        };

        let report = aggregator(sources, config)
            .lambda("ilikeyacut", window())
            .await;

        assert_eq!(report.status.state, CategoryState::Partial);
        assert_eq!(report.status.failed_resources, vec!["C".to_string()]);
        assert_eq!(
            report.status.error.as_deref(),
            Some("Request timed out after 1s")
        );
        assert_eq!(report.summary.total_invocations, 500);
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried() {
        let fake = healthy_fixtures();
        fake.flaky.lock().unwrap().insert("A".into(), 1);
        let (fake, sources) = fake.into_sources();
        let config = AggregationConfig {
            retry_attempts: 2,
            ..test_config()
        };

        let report = aggregator(sources, config)
            .lambda("ilikeyacut", window())
            .await;

        assert_eq!(report.status.state, CategoryState::Ok);
        assert_eq!(fake.calls.load(Ordering::SeqCst), 7);
    }

    #[tokio::test]
    async fn test_app_store_skipped_without_call() {
        let (fake, sources) = healthy_fixtures().into_sources();

        let aggregate = aggregator(sources, test_config())
            .aggregate(
                "ilikeyacut",
                window(),
                AggregateOptions {
                    include_app_store: false,
                },
            )
            .await;

        assert_eq!(aggregate.sources.app_store.state, CategoryState::Skipped);
        assert_eq!(aggregate.app_store, AppStoreSummary::default());
        assert_eq!(fake.app_store_calls.load(Ordering::SeqCst), 0);
        assert!(!aggregate.sources.all_failed());
    }

    #[tokio::test]
    async fn test_unknown_app_is_unconfigured() {
        let (fake, sources) = healthy_fixtures().into_sources();

        let aggregate = aggregator(sources, test_config())
            .aggregate("unknown", window(), AggregateOptions::default())
            .await;

        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
        assert_eq!(aggregate.sources, SourceStatuses::default());
        assert_eq!(aggregate.health.verdict, HealthVerdict::Healthy);
        assert_eq!(aggregate.health.unknown_count, 0);
        assert!(!aggregate.sources.all_failed());
    }

    #[tokio::test]
    async fn test_single_category_reports() {
        let (_, sources) = healthy_fixtures().into_sources();
        let aggregator = aggregator(sources, test_config());
        let window = window();

        let api = aggregator.api_gateway("ilikeyacut", window).await;
        assert_eq!(api.status.state, CategoryState::Ok);
        assert_eq!(api.summary.total_requests, 1000);
        assert!((api.summary.error_rate - 1.2).abs() < 1e-9);

        let cost = aggregator.cost("ilikeyacut", window).await;
        assert_eq!(cost.summary.total_cost, 12.0);
        assert!((cost.summary.projected_monthly_cost - 360.0).abs() < 1e-6);

        let tables = aggregator.dynamodb("ilikeyacut", window).await;
        assert_eq!(tables.summary.tables.len(), 2);

        let app_store = aggregator.app_store("ilikeyacut", window).await;
        assert_eq!(app_store.summary.downloads, 40);
        assert_eq!(app_store.app_id, "ilikeyacut");
    }

    #[tokio::test]
    async fn test_concurrency_limit_of_one_still_completes() {
        let (fake, sources) = healthy_fixtures().into_sources();
        let config = AggregationConfig {
            max_concurrent_fetches: 1,
            ..test_config()
        };

        let aggregate = aggregator(sources, config)
            .aggregate("ilikeyacut", window(), AggregateOptions::default())
            .await;

        assert_eq!(fake.calls.load(Ordering::SeqCst), 11);
        assert_eq!(aggregate.health.healthy_count, 9);
    }
}
