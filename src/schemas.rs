use common::{
    ChartData, CurrentWeekPrediction, DashboardCards, DemandDistribution, DemandLevel,
    DiseaseAlert, MetricCard, PredictionHistory, PredictionRecordDto, PredictionResult,
    SimulationFrame, SimulationResponse, Trend, TrendPoint,
};
use compute::{CurrentConditions, DemandPredictor, WeekRange};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

use crate::handlers::predictions::PredictRequest;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for views derived from the read-only market dataset
    pub cache: Cache<String, CachedData>,
    /// Demand classifier
    pub predictor: Arc<dyn DemandPredictor>,
    /// Assumed conditions for the current-week forecast
    pub conditions: Arc<CurrentConditions>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Chart(ChartData),
    Simulation(SimulationResponse),
}

/// Query parameters for the simulation endpoint
#[derive(Debug, Deserialize, Serialize, ToSchema, IntoParams, Validate)]
pub struct SimulationQuery {
    /// First ISO week to replay (default: 1)
    #[validate(range(min = 1, max = 53))]
    pub start: Option<i32>,
    /// Last ISO week to replay, inclusive (default: 20)
    #[validate(range(min = 1, max = 53))]
    pub end: Option<i32>,
    /// Year to replay (default: 2025)
    #[validate(range(min = 1900, max = 2200))]
    pub year: Option<i32>,
}

impl SimulationQuery {
    pub fn week_range(&self) -> WeekRange {
        let defaults = WeekRange::default();
        WeekRange {
            start: self.start.unwrap_or(defaults.start),
            end: self.end.unwrap_or(defaults.end),
            year: self.year.unwrap_or(defaults.year),
        }
    }
}

/// Query parameters for the prediction history endpoint
#[derive(Debug, Deserialize, Serialize, ToSchema, IntoParams, Validate)]
pub struct HistoryQuery {
    /// Page number (default: 1)
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u64>,
    /// Page size (default: 50)
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u64>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
    /// Name and version of the loaded model
    pub model: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::predictions::current_week_prediction,
        crate::handlers::predictions::predict,
        crate::handlers::predictions::prediction_history,
        crate::handlers::dashboard::dashboard_cards,
        crate::handlers::dashboard::chart_data,
        crate::handlers::simulation::simulate_weeks,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            SimulationQuery,
            HistoryQuery,
            PredictRequest,
            DemandLevel,
            DiseaseAlert,
            CurrentWeekPrediction,
            PredictionResult,
            PredictionRecordDto,
            PredictionHistory,
            DashboardCards,
            MetricCard,
            Trend,
            ChartData,
            TrendPoint,
            DemandDistribution,
            SimulationResponse,
            SimulationFrame,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "predictions", description = "Demand prediction endpoints"),
        (name = "dashboard", description = "Dashboard metrics and chart endpoints"),
        (name = "simulation", description = "Historical replay endpoints"),
    ),
    info(
        title = "Nyanya API",
        description = "Weekly tomato demand predictions for the Mbeya market dashboard",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
