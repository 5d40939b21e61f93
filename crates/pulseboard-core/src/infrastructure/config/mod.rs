mod interpolation;
mod loader;
mod schema;
mod validation;

pub use interpolation::{
    has_variables,
    interpolate,
    InterpolationError,
};
pub use loader::{
    ConfigLoadError,
    ConfigLoadResult,
    ConfigLoader,
};
pub use schema::{
    AggregationConfig,
    AppFileConfig,
    AppStoreConfig,
    AuthConfig,
    AwsConfig,
    PulseboardConfig,
    ServerConfig,
    TokenFileConfig,
};
pub use validation::{
    ConfigError,
    ConfigErrorCode,
    ConfigWarning,
    ValidationResult,
};
