use crate::handlers::{
    dashboard::{chart_data, dashboard_cards},
    health::health_check,
    predictions::{current_week_prediction, predict, prediction_history},
    simulation::simulate_weeks,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    create_router_with_timeout(state, DEFAULT_TIMEOUT)
}

/// Create application router with a custom request timeout
pub fn create_router_with_timeout(state: AppState, timeout: Duration) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Dashboard endpoints
        .route("/api/predictions/current-week/", get(current_week_prediction))
        .route("/api/predictions/dashboard-cards/", get(dashboard_cards))
        .route("/api/predictions/chart-data/", get(chart_data))
        .route("/api/predictions/simulate/", get(simulate_weeks))
        // Prediction log
        .route("/api/predictions/predict/", post(predict))
        .route("/api/predictions/history/", get(prediction_history))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
