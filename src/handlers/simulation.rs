use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::SimulationResponse;
use compute::replay;
use tracing::{debug, instrument};

use crate::helpers::{compute_error_response, HandlerError};
use crate::schemas::{AppState, CachedData, SimulationQuery};

/// Week-by-week replay of historical market data through the model
#[utoipa::path(
    get,
    path = "/api/predictions/simulate/",
    tag = "simulation",
    params(SimulationQuery),
    responses(
        (status = 200, description = "Simulation frames in ascending week order", body = SimulationResponse),
        (status = 400, description = "Invalid week range"),
        (status = 500, description = "Query failed", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn simulate_weeks(
    Valid(Query(query)): Valid<Query<SimulationQuery>>,
    State(state): State<AppState>,
) -> Result<Json<SimulationResponse>, HandlerError> {
    let range = query.week_range();
    let cache_key = format!("simulation_{}_{}_{}", range.year, range.start, range.end);

    if let Some(CachedData::Simulation(response)) = state.cache.get(&cache_key).await {
        debug!("Simulation for {:?} served from cache", range);
        return Ok(Json(response));
    }

    let response = replay::simulate(&state.db, state.predictor.as_ref(), range)
        .await
        .map_err(|e| compute_error_response("Simulation failed", e))?;

    state
        .cache
        .insert(cache_key, CachedData::Simulation(response.clone()))
        .await;

    Ok(Json(response))
}
