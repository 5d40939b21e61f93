use serde::{
    Deserialize,
    Serialize,
};

pub const DEFAULT_ERROR_RATE_PERCENT: f64 = 5.0;

pub const DEFAULT_LATENCY_MS: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HealthVerdict {
    #[default]
    Healthy,
    Degraded,
    Critical,
}

impl HealthVerdict {
    /// `critical` when degraded resources outnumber healthy ones, `degraded`
    /// when at least one resource is degraded, `healthy` otherwise.
    pub fn from_counts(healthy: usize, degraded: usize) -> Self {
        if degraded > healthy {
            HealthVerdict::Critical
        } else if degraded > 0 {
            HealthVerdict::Degraded
        } else {
            HealthVerdict::Healthy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthVerdict::Healthy => "healthy",
            HealthVerdict::Degraded => "degraded",
            HealthVerdict::Critical => "critical",
        }
    }
}

impl std::fmt::Display for HealthVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub verdict: HealthVerdict,
    pub healthy_count: usize,
    pub degraded_count: usize,
    pub unknown_count: usize,
    pub issues: Vec<String>,
}

impl HealthStatus {
    pub fn new(healthy: usize, degraded: usize, unknown: usize, issues: Vec<String>) -> Self {
        Self {
            verdict: HealthVerdict::from_counts(healthy, degraded),
            healthy_count: healthy,
            degraded_count: degraded,
            unknown_count: unknown,
            issues,
        }
    }
}

/// Limits above which a resource counts as degraded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthThresholds {
    pub lambda_error_rate_percent: f64,
    pub lambda_max_throttles: u64,
    pub api_error_rate_percent: f64,
    pub api_latency_ms: f64,
    pub dynamodb_max_throttled_requests: u64,
    pub dynamodb_max_system_errors: u64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            lambda_error_rate_percent: DEFAULT_ERROR_RATE_PERCENT,
            lambda_max_throttles: 0,
            api_error_rate_percent: DEFAULT_ERROR_RATE_PERCENT,
            api_latency_ms: DEFAULT_LATENCY_MS,
            dynamodb_max_throttled_requests: 0,
            dynamodb_max_system_errors: 0,
        }
    }
}
