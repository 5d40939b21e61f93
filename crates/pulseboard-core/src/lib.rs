pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod logging;

use std::sync::Arc;

pub use application::{
    AggregateOptions,
    Aggregator,
    ResourceResolver,
};
pub use domain::{
    AggregateMetrics,
    CategoryReport,
    DomainError,
    DomainResult,
    HealthStatus,
    HealthVerdict,
    ResourceSet,
};
pub use infrastructure::{
    AuthError,
    ConfigLoader,
    Principal,
    PulseboardConfig,
    StaticTokenVerifier,
    TokenVerifier,
};
pub use pulseboard_source_api::{
    MetricSources,
    TimeWindow,
    WindowError,
};

/// Services shared by every request handler
pub struct CoreContext {
    pub config: PulseboardConfig,

    pub resolver: Arc<ResourceResolver>,

    pub aggregator: Arc<Aggregator>,

    pub token_verifier: Arc<dyn TokenVerifier>,
}

impl CoreContext {
    /// Wires the core around already-built metric sources.
    pub fn new(config: PulseboardConfig, sources: MetricSources) -> Self {
        let token_verifier = Arc::new(StaticTokenVerifier::from_config(&config.auth));
        Self::with_verifier(config, sources, token_verifier)
    }

    pub fn with_verifier(
        config: PulseboardConfig, sources: MetricSources, token_verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        let resolver = Arc::new(ResourceResolver::from_config(&config.apps));
        let aggregator = Arc::new(Aggregator::new(
            sources,
            Arc::clone(&resolver),
            config.aggregation.clone(),
            config.health.clone(),
        ));

        if !token_verifier.requires_token() {
            tracing::warn!("No API tokens configured - every request is served as local admin");
        }

        tracing::info!(apps = resolver.len(), "Core context ready");

        Self {
            config,
            resolver,
            aggregator,
            token_verifier,
        }
    }

    /// Builds the production AWS and App Store sources from the configuration.
    pub async fn from_config(config: PulseboardConfig) -> DomainResult<Self> {
        let sources = infrastructure::build_metric_sources(&config).await?;
        Ok(Self::new(config, sources))
    }

    /// Window for a request, falling back to `default_window_hours` before `end`.
    pub fn window(&self, start: Option<&str>, end: Option<&str>) -> DomainResult<TimeWindow> {
        let window = TimeWindow::from_rfc3339(
            start,
            end,
            chrono::Utc::now(),
            self.config.aggregation.default_window_hours,
        )?;
        Ok(window)
    }
}
