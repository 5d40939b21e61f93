pub mod auth;
pub mod config;
pub mod sources;

pub use auth::{
    bearer_token,
    AuthError,
    Principal,
    StaticTokenVerifier,
    TokenVerifier,
};
pub use config::{
    ConfigLoader,
    PulseboardConfig,
};
pub use sources::build_metric_sources;
