//! Response types for the App Store reporting API

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyticsReport {
    #[serde(default)]
    pub units: Units,
    pub proceeds: Option<Money>,
    #[serde(default)]
    pub usage: Usage,
    pub ratings: Option<Ratings>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Units {
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub redownloads: u64,
    #[serde(default)]
    pub updates: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Money {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Usage {
    #[serde(default)]
    pub crashes: u64,
    #[serde(default)]
    pub sessions: u64,
    #[serde(default)]
    pub active_devices: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Ratings {
    pub average: Option<f64>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}
