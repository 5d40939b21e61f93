use axum::{
    extract::State,
    routing::get,
    Json,
    Router,
};
use pulseboard_core::ResourceSet;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
    pub app_id: String,
    pub resources: ResourceSet,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_apps))
}

async fn list_apps(State(state): State<AppState>) -> Json<Vec<AppEntry>> {
    let apps = state
        .core
        .resolver
        .apps()
        .iter()
        .map(|(app_id, resources)| AppEntry {
            app_id: app_id.clone(),
            resources: resources.clone(),
        })
        .collect();

    Json(apps)
}
