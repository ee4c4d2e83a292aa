use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::Utc;
use common::{CurrentWeekPrediction, DemandLevel, DiseaseAlert, PredictionHistory, PredictionResult};
use compute::{forecast, history, PredictionFeatures};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

use crate::helpers::{compute_error_response, HandlerError};
use crate::schemas::{AppState, HistoryQuery};

/// Request body for an ad-hoc prediction
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct PredictRequest {
    /// Weekly rainfall in millimetres
    #[validate(range(min = 0.0, max = 2000.0))]
    pub rainfall_mm: f64,
    /// Mean temperature in degrees Celsius
    #[validate(range(min = -30.0, max = 60.0))]
    pub temperature_c: f64,
    pub market_day: bool,
    pub school_open: bool,
    pub disease_alert: DiseaseAlert,
    pub last_week_demand: DemandLevel,
    /// ISO week number
    #[validate(range(min = 1, max = 53))]
    pub week: i32,
    /// English month name, e.g. "June"
    #[validate(length(min = 3, max = 9))]
    pub month: String,
}

impl From<PredictRequest> for PredictionFeatures {
    fn from(request: PredictRequest) -> Self {
        Self {
            rainfall_mm: request.rainfall_mm,
            temperature_c: request.temperature_c,
            market_day: request.market_day,
            school_open: request.school_open,
            disease_alert: request.disease_alert,
            last_week_demand: request.last_week_demand,
            week: request.week,
            month: request.month,
        }
    }
}

/// Current week's demand prediction
#[utoipa::path(
    get,
    path = "/api/predictions/current-week/",
    tag = "predictions",
    responses(
        (status = 200, description = "Prediction for the current ISO week", body = CurrentWeekPrediction),
        (status = 500, description = "Prediction or query failed", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn current_week_prediction(
    State(state): State<AppState>,
) -> Result<Json<CurrentWeekPrediction>, HandlerError> {
    trace!("Entering current_week_prediction function");

    let now = Utc::now();
    match forecast::current_week_prediction(&state.db, state.predictor.as_ref(), &state.conditions, now).await {
        Ok(prediction) => {
            info!(
                "Week {} predicted {} ({})",
                prediction.week, prediction.predicted_demand, prediction.confidence_percentage
            );
            Ok(Json(prediction))
        }
        Err(e) => Err(compute_error_response("Current week prediction failed", e)),
    }
}

/// Predict demand for caller-supplied conditions
#[utoipa::path(
    post,
    path = "/api/predictions/predict/",
    tag = "predictions",
    request_body = PredictRequest,
    responses(
        (status = 201, description = "Prediction made and logged", body = PredictionResult),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Prediction or query failed", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn predict(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<PredictRequest>>,
) -> Result<(StatusCode, Json<PredictionResult>), HandlerError> {
    trace!("Entering predict function");
    debug!("Predicting week {} ({})", request.week, request.month);

    let features = PredictionFeatures::from(request);
    match forecast::predict_and_record(&state.db, state.predictor.as_ref(), &features, Utc::now()).await {
        Ok((record, outcome)) => Ok((
            StatusCode::CREATED,
            Json(PredictionResult::new(record.id, outcome.label, outcome.confidence)),
        )),
        Err(e) => Err(compute_error_response("Prediction failed", e)),
    }
}

/// Logged predictions, newest first
#[utoipa::path(
    get,
    path = "/api/predictions/history/",
    tag = "predictions",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Page of the prediction log", body = PredictionHistory),
        (status = 400, description = "Invalid paging parameters"),
        (status = 500, description = "Query failed", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn prediction_history(
    Valid(Query(query)): Valid<Query<HistoryQuery>>,
    State(state): State<AppState>,
) -> Result<Json<PredictionHistory>, HandlerError> {
    trace!("Entering prediction_history function");

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(50);
    debug!("Fetching prediction history - page: {}, limit: {}", page, limit);

    history::prediction_history(&state.db, page, limit)
        .await
        .map(Json)
        .map_err(|e| compute_error_response("Failed to fetch prediction history", e))
}
