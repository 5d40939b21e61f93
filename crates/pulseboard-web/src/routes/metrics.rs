use axum::{
    extract::{
        Path,
        Query,
        State,
    },
    routing::get,
    Extension,
    Json,
    Router,
};
use pulseboard_core::domain::{
    ApiGatewaySummary,
    AppStoreSummary,
    CostSummary,
    DynamoDbSummary,
    LambdaSummary,
};
use pulseboard_core::{
    AggregateMetrics,
    AggregateOptions,
    CategoryReport,
    Principal,
    TimeWindow,
};
use serde::Deserialize;

use crate::error::{
    ApiResult,
    AppError,
};
use crate::state::AppState;

/// RFC3339 bounds; `end` defaults to now and `start` to the configured window
/// before `end`
#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl WindowQuery {
    fn window(&self, state: &AppState) -> ApiResult<TimeWindow> {
        Ok(state
            .core
            .window(self.start.as_deref(), self.end.as_deref())?)
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{app_id}/metrics/aggregated", get(aggregated))
        .route("/{app_id}/metrics/lambda", get(lambda))
        .route("/{app_id}/metrics/apigateway", get(api_gateway))
        .route("/{app_id}/metrics/dynamodb", get(dynamodb))
        .route("/{app_id}/metrics/cost", get(cost))
        .route("/{app_id}/metrics/appstore", get(app_store))
}

async fn aggregated(
    State(state): State<AppState>, Extension(principal): Extension<Principal>,
    Path(app_id): Path<String>, Query(query): Query<WindowQuery>,
) -> ApiResult<Json<AggregateMetrics>> {
    let window = query.window(&state)?;
    let options = AggregateOptions {
        include_app_store: principal.admin,
    };

    tracing::debug!(
        app_id = %app_id,
        user = %principal.user_id,
        window = %window.label(),
        "Aggregating metrics"
    );

    let metrics = state.core.aggregator.aggregate(&app_id, window, options).await;
    Ok(Json(metrics))
}

async fn lambda(
    State(state): State<AppState>, Path(app_id): Path<String>, Query(query): Query<WindowQuery>,
) -> ApiResult<Json<CategoryReport<LambdaSummary>>> {
    let window = query.window(&state)?;
    Ok(Json(state.core.aggregator.lambda(&app_id, window).await))
}

async fn api_gateway(
    State(state): State<AppState>, Path(app_id): Path<String>, Query(query): Query<WindowQuery>,
) -> ApiResult<Json<CategoryReport<ApiGatewaySummary>>> {
    let window = query.window(&state)?;
    Ok(Json(state.core.aggregator.api_gateway(&app_id, window).await))
}

async fn dynamodb(
    State(state): State<AppState>, Path(app_id): Path<String>, Query(query): Query<WindowQuery>,
) -> ApiResult<Json<CategoryReport<DynamoDbSummary>>> {
    let window = query.window(&state)?;
    Ok(Json(state.core.aggregator.dynamodb(&app_id, window).await))
}

async fn cost(
    State(state): State<AppState>, Path(app_id): Path<String>, Query(query): Query<WindowQuery>,
) -> ApiResult<Json<CategoryReport<CostSummary>>> {
    let window = query.window(&state)?;
    Ok(Json(state.core.aggregator.cost(&app_id, window).await))
}

async fn app_store(
    State(state): State<AppState>, Extension(principal): Extension<Principal>,
    Path(app_id): Path<String>, Query(query): Query<WindowQuery>,
) -> ApiResult<Json<CategoryReport<AppStoreSummary>>> {
    if !principal.admin {
        return Err(AppError::forbidden("App Store metrics require an admin token"));
    }

    let window = query.window(&state)?;
    Ok(Json(state.core.aggregator.app_store(&app_id, window).await))
}
