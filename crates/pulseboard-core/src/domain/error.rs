use pulseboard_source_api::WindowError;
use thiserror::Error;

/// Failures surfaced to callers. Source failures never appear here: they are
/// folded into per-resource results instead.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid time window: {0}")]
    InvalidTimeWindow(#[from] WindowError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
