#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use chrono::{DateTime, Utc};
    use compute::{CurrentConditions, DemandPredictor, FixedPredictor};
    use migration::{Migrator, MigratorTrait};
    use model::entities::{market_data, prediction};
    use model::{DemandLevel, DiseaseAlert};
    use moka::future::Cache;
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
    use std::sync::Arc;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing around the given predictor
    pub fn app_state(db: DatabaseConnection, predictor: Arc<dyn DemandPredictor>) -> AppState {
        AppState {
            db,
            cache: Cache::new(100),
            predictor,
            conditions: Arc::new(CurrentConditions::default()),
        }
    }

    /// Create AppState with a predictor pinned to (High, 0.9)
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;
        app_state(db, Arc::new(FixedPredictor::new(DemandLevel::High, 0.9)))
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing from a prepared state
    pub fn app_from_state(state: AppState) -> Router {
        let _ = init_test_tracing();
        create_router(state)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        let state = setup_test_app_state().await;
        app_from_state(state)
    }

    pub async fn insert_market_week(
        db: &DatabaseConnection,
        year: i32,
        week: i32,
        month: &str,
        demand: DemandLevel,
    ) -> market_data::Model {
        market_data::ActiveModel {
            year: Set(year),
            week: Set(week),
            rainfall_mm: Set(70.0),
            temperature_c: Set(22.0),
            market_day: Set(true),
            school_open: Set(true),
            disease_alert: Set(DiseaseAlert::Absence),
            last_week_demand: Set(DemandLevel::Medium),
            market_demand: Set(demand),
            month: Set(month.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to insert market week")
    }

    pub async fn record_prediction(
        db: &DatabaseConnection,
        at: DateTime<Utc>,
        demand: DemandLevel,
        confidence: f64,
    ) -> prediction::Model {
        prediction::ActiveModel {
            timestamp: Set(at),
            predicted_demand: Set(demand),
            confidence_score: Set(confidence),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to record prediction")
    }
}
