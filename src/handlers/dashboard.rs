use axum::{extract::State, response::Json};
use chrono::Utc;
use common::{ChartData, DashboardCards};
use compute::{charts, metrics};
use tracing::{debug, instrument};

use crate::helpers::{compute_error_response, HandlerError};
use crate::schemas::{AppState, CachedData};

const CHART_CACHE_KEY: &str = "chart_data";

/// Data for the four dashboard metric cards
#[utoipa::path(
    get,
    path = "/api/predictions/dashboard-cards/",
    tag = "dashboard",
    responses(
        (status = 200, description = "Metric cards computed from the prediction log", body = DashboardCards),
        (status = 500, description = "Query failed", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn dashboard_cards(State(state): State<AppState>) -> Result<Json<DashboardCards>, HandlerError> {
    metrics::dashboard_cards(&state.db, Utc::now())
        .await
        .map(Json)
        .map_err(|e| compute_error_response("Failed to compute dashboard cards", e))
}

/// Recent market weeks for the dashboard charts
#[utoipa::path(
    get,
    path = "/api/predictions/chart-data/",
    tag = "dashboard",
    responses(
        (status = 200, description = "Trend points and demand distribution", body = ChartData),
        (status = 500, description = "Query failed", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn chart_data(State(state): State<AppState>) -> Result<Json<ChartData>, HandlerError> {
    if let Some(CachedData::Chart(data)) = state.cache.get(CHART_CACHE_KEY).await {
        debug!("Chart data served from cache");
        return Ok(Json(data));
    }

    let data = charts::chart_data(&state.db)
        .await
        .map_err(|e| compute_error_response("Failed to build chart data", e))?;

    state
        .cache
        .insert(CHART_CACHE_KEY.to_string(), CachedData::Chart(data.clone()))
        .await;

    Ok(Json(data))
}
