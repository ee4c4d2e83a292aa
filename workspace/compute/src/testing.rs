//! Shared fixtures for compute tests.

use chrono::{DateTime, Utc};
use migration::{Migrator, MigratorTrait};
use model::entities::{market_data, prediction};
use model::{DemandLevel, DiseaseAlert};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, DbErr, Set};

pub async fn setup_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await.expect("Migrations failed.");
    Ok(db)
}

pub async fn insert_market_week(db: &DatabaseConnection, year: i32, week: i32, demand: DemandLevel) {
    insert_market_week_with(db, year, week, demand, "March").await;
}

pub async fn insert_market_week_with(
    db: &DatabaseConnection,
    year: i32,
    week: i32,
    demand: DemandLevel,
    month: &str,
) {
    market_data::ActiveModel {
        year: Set(year),
        week: Set(week),
        rainfall_mm: Set(55.0 + week as f64),
        temperature_c: Set(21.0),
        market_day: Set(week % 2 == 0),
        school_open: Set(true),
        disease_alert: Set(DiseaseAlert::Absence),
        last_week_demand: Set(DemandLevel::Medium),
        market_demand: Set(demand),
        month: Set(month.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert market week");
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
