//! Conversion from SDK errors and raw CloudWatch values

use aws_sdk_cloudwatch::error::{
    DisplayErrorContext,
    ProvideErrorMetadata,
    SdkError,
};
use pulseboard_source_api::SourceError;

const THROTTLING_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "RequestLimitExceeded",
    "LimitExceededException",
    "TooManyRequestsException",
];

const AUTH_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "ExpiredToken",
    "ExpiredTokenException",
    "InvalidClientTokenId",
    "UnrecognizedClientException",
];

pub(crate) fn map_sdk_error<E, R>(context: &str, err: SdkError<E, R>) -> SourceError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let detail = format!("{context}: {}", DisplayErrorContext(&err));

    match &err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
            SourceError::NetworkError(detail)
        }
        SdkError::ServiceError(service) => {
            let code = service.err().code().unwrap_or_default();
            if THROTTLING_CODES.contains(&code) {
                SourceError::Throttled(detail)
            } else if AUTH_CODES.contains(&code) {
                SourceError::AuthenticationFailed(detail)
            } else {
                SourceError::ApiError(detail)
            }
        }
        _ => SourceError::ApiError(detail),
    }
}

/// Rounds a CloudWatch sum to a counter; negative or non-finite values become 0.
pub(crate) fn to_count(value: Option<f64>) -> u64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v.round() as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_count() {
        assert_eq!(to_count(None), 0);
        assert_eq!(to_count(Some(41.6)), 42);
        assert_eq!(to_count(Some(-3.0)), 0);
        assert_eq!(to_count(Some(f64::NAN)), 0);
    }
}
