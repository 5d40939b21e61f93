use std::collections::HashSet;

use super::interpolation::has_variables;
use super::schema::PulseboardConfig;

#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<ConfigWarning>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(
        &mut self, field: impl Into<String>, message: impl Into<String>, code: ConfigErrorCode,
    ) {
        self.errors.push(ConfigError {
            field: field.into(),
            message: message.into(),
            code,
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigWarning {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn summary(&self) -> String {
        if self.errors.is_empty() && self.warnings.is_empty() {
            "Configuration is valid".to_string()
        } else {
            format!(
                "{} error(s), {} warning(s)",
                self.errors.len(),
                self.warnings.len()
            )
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigError {
    pub field: String,
    pub message: String,
    pub code: ConfigErrorCode,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.message, self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorCode {
    MissingRequired,
    InvalidValue,
    Duplicate,
}

impl std::fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired => write!(f, "MISSING_REQUIRED"),
            Self::InvalidValue => write!(f, "INVALID_VALUE"),
            Self::Duplicate => write!(f, "DUPLICATE"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl PulseboardConfig {
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();

        if self
            .server
            .bind_addr
            .parse::<std::net::SocketAddr>()
            .is_err()
        {
            result.add_error(
                "server.bind_addr",
                format!("'{}' is not a socket address", self.server.bind_addr),
                ConfigErrorCode::InvalidValue,
            );
        }

        if self.aggregation.source_timeout_secs == 0 {
            result.add_error(
                "aggregation.source_timeout_secs",
                "must be greater than zero",
                ConfigErrorCode::InvalidValue,
            );
        }
        if self.aggregation.max_concurrent_fetches == 0 {
            result.add_error(
                "aggregation.max_concurrent_fetches",
                "must be greater than zero",
                ConfigErrorCode::InvalidValue,
            );
        }
        if self.aggregation.default_window_hours == 0 {
            result.add_error(
                "aggregation.default_window_hours",
                "must be greater than zero",
                ConfigErrorCode::InvalidValue,
            );
        }

        if self.aws.region.trim().is_empty() {
            result.add_error(
                "aws.region",
                "region is required",
                ConfigErrorCode::MissingRequired,
            );
        }

        let uses_app_store = self.apps.values().any(|app| app.app_store_id.is_some());
        if uses_app_store && !self.app_store.is_configured() {
            result.add_warning(
                "app_store.base_url",
                "apps reference an App Store id but no reporting endpoint is configured",
            );
        }

        self.validate_tokens(&mut result);
        self.validate_apps(&mut result);

        result
    }

    fn validate_tokens(&self, result: &mut ValidationResult) {
        if self.auth.tokens.is_empty() {
            result.add_warning(
                "auth.tokens",
                "no API tokens configured - every request is treated as an admin",
            );
        }

        let mut seen = HashSet::new();
        for (index, token) in self.auth.tokens.iter().enumerate() {
            let field = format!("auth.tokens[{}]", index);
            if token.token.is_empty() {
                result.add_error(
                    format!("{}.token", field),
                    "token must not be empty",
                    ConfigErrorCode::MissingRequired,
                );
            } else if !seen.insert(token.token.as_str()) {
                result.add_error(
                    format!("{}.token", field),
                    "token is configured more than once",
                    ConfigErrorCode::Duplicate,
                );
            }
            if token.user_id.is_empty() {
                result.add_error(
                    format!("{}.user_id", field),
                    "user_id must not be empty",
                    ConfigErrorCode::MissingRequired,
                );
            }
        }
    }

    fn validate_apps(&self, result: &mut ValidationResult) {
        for (app_id, app) in &self.apps {
            if app_id.trim().is_empty() {
                result.add_error(
                    "apps",
                    "app id must not be empty",
                    ConfigErrorCode::InvalidValue,
                );
            }

            let names = app
                .lambda_functions
                .iter()
                .map(|n| ("lambda_functions", n))
                .chain(app.dynamodb_tables.iter().map(|n| ("dynamodb_tables", n)));
            for (kind, name) in names {
                if name.trim().is_empty() {
                    result.add_error(
                        format!("apps.{}.{}", app_id, kind),
                        "resource names must not be empty",
                        ConfigErrorCode::InvalidValue,
                    );
                } else if has_variables(name) {
                    result.add_warning(
                        format!("apps.{}.{}", app_id, kind),
                        format!("'{}' still contains an unresolved variable", name),
                    );
                }
            }

            let mut seen = HashSet::new();
            for name in &app.lambda_functions {
                if !seen.insert(name) {
                    result.add_warning(
                        format!("apps.{}.lambda_functions", app_id),
                        format!("'{}' is listed more than once", name),
                    );
                }
            }
        }
    }
}
