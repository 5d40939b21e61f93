use thiserror::Error;

/// Errors a metric source can report for a single fetch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request throttled: {0}")]
    Throttled(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SourceError {
    /// Whether retrying the same call may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SourceError::NetworkError(_) | SourceError::ApiError(_) | SourceError::Throttled(_)
        )
    }
}

pub type SourceApiResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(SourceError::NetworkError("reset".into()).is_transient());
        assert!(SourceError::Throttled("rate exceeded".into()).is_transient());
        assert!(!SourceError::AuthenticationFailed("expired".into()).is_transient());
        assert!(!SourceError::Timeout(30).is_transient());
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(
            SourceError::Timeout(30).to_string(),
            "Request timed out after 30s"
        );
    }
}
