#[cfg(test)]
mod integration_tests {
    use crate::handlers::predictions::PredictRequest;
    use crate::schemas::{ErrorResponse, HealthResponse};
    use crate::test_utils::test_utils::{
        app_from_state, app_state, insert_market_week, record_prediction, setup_test_app,
        setup_test_app_state, setup_test_db,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::{Duration, Utc};
    use common::{
        ChartData, CurrentWeekPrediction, DashboardCards, DemandLevel, DiseaseAlert,
        PredictionHistory, PredictionResult, SimulationResponse, Trend,
    };
    use compute::{DemandPredictor, LogisticModel};
    use sea_orm::ConnectionTrait;
    use std::sync::Arc;

    fn predict_request(week: i32, month: &str) -> PredictRequest {
        PredictRequest {
            rainfall_mm: 40.0,
            temperature_c: 22.0,
            market_day: true,
            school_open: true,
            disease_alert: DiseaseAlert::Absence,
            last_week_demand: DemandLevel::High,
            week,
            month: month.to_string(),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.database, "connected");
        assert_eq!(body.model, "fixed");
    }

    #[tokio::test]
    async fn test_current_week_with_stubbed_high_prediction_is_red() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/predictions/current-week/").await;

        response.assert_status(StatusCode::OK);
        let body: CurrentWeekPrediction = response.json();
        assert_eq!(body.predicted_demand, DemandLevel::High);
        assert_eq!(body.status_color, "red");
        assert_eq!(body.confidence, 0.9);
        assert_eq!(body.confidence_percentage, "90%");
        assert!((1..=53).contains(&body.week));
    }

    #[tokio::test]
    async fn test_current_week_with_bundled_model() {
        let db = setup_test_db().await;
        let model: Arc<dyn DemandPredictor> = Arc::new(LogisticModel::bundled().unwrap());
        let server = TestServer::new(app_from_state(app_state(db, model))).unwrap();

        let response = server.get("/api/predictions/current-week/").await;

        response.assert_status(StatusCode::OK);
        let body: CurrentWeekPrediction = response.json();
        assert!((0.0..=1.0).contains(&body.confidence));
        assert_eq!(body.status_color, body.predicted_demand.status_color());
        assert!(body.confidence_percentage.ends_with('%'));
    }

    #[tokio::test]
    async fn test_dashboard_cards_empty_log() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/predictions/dashboard-cards/").await;

        response.assert_status(StatusCode::OK);
        let body: DashboardCards = response.json();
        assert_eq!(body.total_predictions.value, "0");
        assert_eq!(body.total_predictions.change, "+0%");
        assert_eq!(body.total_predictions.label, "TOTAL PREDICTIONS");
        assert_eq!(body.weekly_predictions.label, "THIS WEEK");
        assert_eq!(body.model_performance.value, "0%");
        assert_eq!(body.model_performance.change, "+2.6%");
        assert_eq!(body.high_demand_weeks.change, "+5.8%");
        assert_eq!(body.high_demand_weeks.trend, Trend::Up);
    }

    #[tokio::test]
    async fn test_current_week_feeds_dashboard_cards() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        server.get("/api/predictions/current-week/").await.assert_status(StatusCode::OK);
        server.get("/api/predictions/current-week/").await.assert_status(StatusCode::OK);

        let body: DashboardCards = server.get("/api/predictions/dashboard-cards/").await.json();
        assert_eq!(body.total_predictions.value, "2");
        assert_eq!(body.weekly_predictions.value, "2");
        assert_eq!(body.model_performance.value, "90%");
        assert_eq!(body.high_demand_weeks.value, "2");
    }

    #[tokio::test]
    async fn test_dashboard_weekly_change() {
        let state = setup_test_app_state().await;
        let now = Utc::now();
        for i in 0..15 {
            record_prediction(&state.db, now - Duration::hours(i + 1), DemandLevel::Low, 0.5).await;
        }
        for i in 0..10 {
            record_prediction(&state.db, now - Duration::days(9) - Duration::hours(i), DemandLevel::Low, 0.5).await;
        }
        let server = TestServer::new(app_from_state(state)).unwrap();

        let body: DashboardCards = server.get("/api/predictions/dashboard-cards/").await.json();
        assert_eq!(body.weekly_predictions.value, "15");
        assert_eq!(body.weekly_predictions.change, "+50%");
        assert_eq!(body.weekly_predictions.trend, Trend::Up);
        assert_eq!(body.total_predictions.value, "25");
    }

    #[tokio::test]
    async fn test_chart_data_distribution_matches_points() {
        let state = setup_test_app_state().await;
        let demands = [DemandLevel::Low, DemandLevel::High, DemandLevel::Medium, DemandLevel::High];
        for (i, demand) in demands.iter().enumerate() {
            insert_market_week(&state.db, 2025, i as i32 + 10, "March", *demand).await;
        }
        let server = TestServer::new(app_from_state(state)).unwrap();

        let response = server.get("/api/predictions/chart-data/").await;

        response.assert_status(StatusCode::OK);
        let raw: serde_json::Value = response.json();
        assert_eq!(raw["demand_distribution"]["High"], 2);
        let body: ChartData = response.json();
        assert_eq!(body.total_weeks, 4);
        assert_eq!(body.demand_distribution.total(), body.trend_data.len());
        assert_eq!(body.trend_data[0].week, "W10");
        assert_eq!(body.trend_data[0].demand_value, 1);
        assert_eq!(body.trend_data[3].week, "W13");
    }

    #[tokio::test]
    async fn test_simulation_frames() {
        let state = setup_test_app_state().await;
        insert_market_week(&state.db, 2025, 7, "February", DemandLevel::High).await;
        insert_market_week(&state.db, 2025, 3, "January", DemandLevel::Low).await;
        insert_market_week(&state.db, 2025, 5, "January", DemandLevel::High).await;
        insert_market_week(&state.db, 2025, 30, "July", DemandLevel::High).await;
        let server = TestServer::new(app_from_state(state)).unwrap();

        let response = server
            .get("/api/predictions/simulate/")
            .add_query_param("start", 1)
            .add_query_param("end", 10)
            .add_query_param("year", 2025)
            .await;

        response.assert_status(StatusCode::OK);
        let raw: serde_json::Value = response.json();
        assert_eq!(raw["frames"][0]["match"], false);
        let body: SimulationResponse = response.json();
        let weeks: Vec<i32> = body.frames.iter().map(|f| f.week).collect();
        assert_eq!(weeks, vec![3, 5, 7]);
        for frame in &body.frames {
            assert_eq!(frame.is_match, frame.predicted_demand == frame.actual_demand);
        }
        assert_eq!(body.total_frames, 3);
        assert_eq!(body.play_speed, 500);
    }

    #[tokio::test]
    async fn test_simulation_defaults_and_cache() {
        let state = setup_test_app_state().await;
        insert_market_week(&state.db, 2025, 2, "January", DemandLevel::Medium).await;
        let db = state.db.clone();
        let server = TestServer::new(app_from_state(state)).unwrap();

        let first: SimulationResponse = server.get("/api/predictions/simulate/").await.json();
        assert_eq!(first.total_frames, 1);

        // The market dataset is read-only while serving, so repeated ranges
        // come from the cache
        insert_market_week(&db, 2025, 3, "January", DemandLevel::Medium).await;
        let second: SimulationResponse = server.get("/api/predictions/simulate/").await.json();
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_simulation_rejects_invalid_weeks() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/predictions/simulate/")
            .add_query_param("start", 0)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .get("/api/predictions/simulate/")
            .add_query_param("end", 60)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_records_prediction() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/predictions/predict/")
            .json(&predict_request(27, "July"))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: PredictionResult = response.json();
        assert!(body.id > 0);
        assert_eq!(body.predicted_demand, DemandLevel::High);
        assert_eq!(body.status_color, "red");

        let history: PredictionHistory = server.get("/api/predictions/history/").await.json();
        assert_eq!(history.total, 1);
        assert_eq!(history.predictions[0].id, body.id);
    }

    #[tokio::test]
    async fn test_predict_validation_failure() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/predictions/predict/")
            .json(&predict_request(60, "July"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_inference_failure() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/predictions/predict/")
            .json(&predict_request(27, "Smarch"))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INFERENCE_FAILED");
        assert!(!body.success);

        let history: PredictionHistory = server.get("/api/predictions/history/").await.json();
        assert_eq!(history.total, 0);
    }

    #[tokio::test]
    async fn test_query_failure_returns_error_body() {
        let state = setup_test_app_state().await;
        state
            .db
            .execute_unprepared("DROP TABLE predictions")
            .await
            .unwrap();
        let server = TestServer::new(app_from_state(state)).unwrap();

        let response = server.get("/api/predictions/dashboard-cards/").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "QUERY_FAILED");
        assert!(!body.error.is_empty());
    }

    #[tokio::test]
    async fn test_history_paging_validation() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/predictions/history/")
            .add_query_param("limit", 0)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
