use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const DEFAULT_LOG_FILTER: &str =
    "pulseboard=info,pulseboard_core=info,pulseboard_web=info,tower_http=info";

pub const DEV_LOG_FILTER: &str =
    "pulseboard=debug,pulseboard_core=debug,pulseboard_web=debug,pulseboard_source_aws=debug,pulseboard_source_appstore=debug,tower_http=debug";

/// Checked before `RUST_LOG`
pub const LOG_ENV_VAR: &str = "PULSEBOARD_LOG";

pub fn init() {
    init_with_default(DEFAULT_LOG_FILTER);
}

pub fn init_with_default(default_filter: &str) {
    tracing_subscriber::registry()
        .with(filter_from_env(default_filter))
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .init();
}

pub fn init_dev() {
    init_with_default(DEV_LOG_FILTER);
}

fn filter_from_env(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_filter))
}
