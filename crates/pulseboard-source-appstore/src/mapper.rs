use pulseboard_source_api::{
    AppStoreMetrics,
    SourceError,
};
use reqwest::StatusCode;

use crate::types;

pub(crate) fn map_report(app_store_id: &str, report: types::AnalyticsReport) -> AppStoreMetrics {
    let (proceeds, currency) = report
        .proceeds
        .map(|money| (money.amount, money.currency))
        .unwrap_or_else(|| (0.0, String::new()));
    let (average_rating, rating_count) = report
        .ratings
        .map(|ratings| (ratings.average, ratings.count))
        .unwrap_or((None, 0));

    AppStoreMetrics {
        app_store_id: app_store_id.to_string(),
        downloads: report.units.downloads,
        redownloads: report.units.redownloads,
        updates: report.units.updates,
        proceeds,
        currency,
        crashes: report.usage.crashes,
        sessions: report.usage.sessions,
        active_devices: report.usage.active_devices,
        average_rating: average_rating.filter(|rating| rating.is_finite()),
        rating_count,
    }
}

/// Maps a non-success reporting API status to a source error
pub(crate) fn map_status(status: StatusCode, app_store_id: &str, body: &str) -> SourceError {
    let message = serde_json::from_str::<types::ErrorBody>(body)
        .map(|b| b.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SourceError::AuthenticationFailed(format!("App Store API rejected key: {message}"))
        }
        StatusCode::NOT_FOUND => {
            SourceError::InvalidConfig(format!("Unknown App Store app {app_store_id}: {message}"))
        }
        StatusCode::TOO_MANY_REQUESTS => SourceError::Throttled(message),
        s if s.is_server_error() => SourceError::ApiError(format!("App Store API {s}: {message}")),
        s => SourceError::InvalidResponse(format!("App Store API {s}: {message}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_full_report() {
        let json = r#"{
            "units": {"downloads": 1200, "redownloads": 80, "updates": 300},
            "proceeds": {"amount": 512.25, "currency": "EUR"},
            "usage": {"crashes": 4, "sessions": 800, "activeDevices": 350},
            "ratings": {"average": 4.6, "count": 27}
        }"#;
        let report: types::AnalyticsReport = serde_json::from_str(json).unwrap();
        let metrics = map_report("1500000000", report);

        assert_eq!(metrics.app_store_id, "1500000000");
        assert_eq!(metrics.downloads, 1200);
        assert_eq!(metrics.redownloads, 80);
        assert_eq!(metrics.updates, 300);
        assert_eq!(metrics.currency, "EUR");
        assert_eq!(metrics.crashes, 4);
        assert_eq!(metrics.sessions, 800);
        assert_eq!(metrics.active_devices, 350);
        assert_eq!(metrics.average_rating, Some(4.6));
        assert_eq!(metrics.rating_count, 27);
    }

    #[test]
    fn test_map_sparse_report() {
        let report: types::AnalyticsReport = serde_json::from_str("{}").unwrap();
        let metrics = map_report("42", report);

        assert_eq!(metrics.downloads, 0);
        assert_eq!(metrics.proceeds, 0.0);
        assert!(metrics.currency.is_empty());
        assert_eq!(metrics.average_rating, None);
    }

    #[test]
    fn test_map_status() {
        assert!(matches!(
            map_status(StatusCode::UNAUTHORIZED, "42", ""),
            SourceError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            map_status(StatusCode::TOO_MANY_REQUESTS, "42", ""),
            SourceError::Throttled(_)
        ));
        assert!(matches!(
            map_status(StatusCode::BAD_GATEWAY, "42", ""),
            SourceError::ApiError(_)
        ));
        assert!(matches!(
            map_status(StatusCode::NOT_FOUND, "42", ""),
            SourceError::InvalidConfig(_)
        ));

        let err = map_status(
            StatusCode::BAD_REQUEST,
            "42",
            r#"{"message": "start must precede end"}"#,
        );
        assert_eq!(
            err,
            SourceError::InvalidResponse(
                "App Store API 400 Bad Request: start must precede end".to_string()
            )
        );
    }
}
