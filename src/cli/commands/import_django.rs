use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use model::entities::{market_data, prediction};
use model::{DemandLevel, DiseaseAlert};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, trace, warn};

const MARKET_DATA_MODEL: &str = "market_data.marketdata";
const PREDICTION_MODEL: &str = "predictions.prediction";

/// One entry of a `manage.py dumpdata` JSON array
#[derive(Debug, Deserialize)]
pub struct DjangoRecord {
    pub model: String,
    #[serde(default)]
    pub pk: serde_json::Value,
    pub fields: serde_json::Value,
}

/// Django MarketData Model
#[derive(Debug, Deserialize)]
struct DjangoMarketData {
    year: i32,
    week: i32,
    rainfall_mm: f64,
    temperature_c: f64,
    market_day: bool,
    school_open: bool,
    disease_alert: DiseaseAlert,
    last_week_demand: DemandLevel,
    market_demand: DemandLevel,
    month: String,
}

/// Django Prediction Model
#[derive(Debug, Deserialize)]
struct DjangoPrediction {
    timestamp: String,
    predicted_demand: DemandLevel,
    confidence_score: f64,
}

/// Counts reported at the end of an import
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub market_weeks: usize,
    pub predictions: usize,
    pub duplicates: usize,
    pub ignored: usize,
}

/// Django writes timestamps as RFC 3339, or naive when USE_TZ is off.
fn parse_django_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .with_context(|| format!("Invalid timestamp: {}", raw))?;
    Ok(naive.and_utc())
}

pub async fn import_django(json_path: &str, database_url: &str) -> Result<()> {
    trace!("Entering import_django function");
    info!("Starting Django data import");
    debug!("JSON path: {}", json_path);
    debug!("Database URL: {}", database_url);

    trace!("Connecting to database");
    let db = Database::connect(database_url)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    trace!("Loading JSON file");
    let path = Path::new(json_path);
    let file = File::open(path).with_context(|| format!("Failed to open file: {}", json_path))?;

    info!("Parsing JSON data...");
    let records: Vec<DjangoRecord> = serde_json::from_reader(file).context("Failed to parse JSON")?;
    info!("Loaded {} records from Django dump", records.len());

    let summary = import_records(&db, &records).await?;

    info!("Django data import completed successfully!");
    info!("Summary:");
    info!("  - Market weeks: {}", summary.market_weeks);
    info!("  - Predictions: {}", summary.predictions);
    info!("  - Duplicate weeks skipped: {}", summary.duplicates);
    info!("  - Records of other models ignored: {}", summary.ignored);

    Ok(())
}

/// Inserts market weeks and predictions from parsed dump records in a single
/// transaction; a bad record leaves the database as it was. Weeks that
/// already exist for the same year are left untouched.
pub async fn import_records(db: &DatabaseConnection, records: &[DjangoRecord]) -> Result<ImportSummary> {
    let txn = db.begin().await.context("Failed to start import transaction")?;
    match insert_records(&txn, records).await {
        Ok(summary) => {
            txn.commit().await.context("Failed to commit import")?;
            Ok(summary)
        }
        Err(e) => {
            warn!("Import failed, rolling back: {:#}", e);
            txn.rollback().await.context("Failed to roll back import")?;
            Err(e)
        }
    }
}

async fn insert_records<C: ConnectionTrait>(db: &C, records: &[DjangoRecord]) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    info!("Importing market data...");
    for record in records.iter().filter(|r| r.model == MARKET_DATA_MODEL) {
        let row: DjangoMarketData = serde_json::from_value(record.fields.clone())
            .with_context(|| format!("Invalid market data record {}", record.pk))?;

        let existing = market_data::Entity::find()
            .filter(market_data::Column::Year.eq(row.year))
            .filter(market_data::Column::Week.eq(row.week))
            .one(db)
            .await?;
        if existing.is_some() {
            warn!("Week {} of {} already imported, skipping", row.week, row.year);
            summary.duplicates += 1;
            continue;
        }

        let inserted = market_data::ActiveModel {
            year: Set(row.year),
            week: Set(row.week),
            rainfall_mm: Set(row.rainfall_mm),
            temperature_c: Set(row.temperature_c),
            market_day: Set(row.market_day),
            school_open: Set(row.school_open),
            disease_alert: Set(row.disease_alert),
            last_week_demand: Set(row.last_week_demand),
            market_demand: Set(row.market_demand),
            month: Set(row.month),
            ..Default::default()
        }
        .insert(db)
        .await?;
        summary.market_weeks += 1;
        debug!("Imported market week {}/{} -> ID {}", inserted.year, inserted.week, inserted.id);
    }
    info!("Imported {} market weeks", summary.market_weeks);

    info!("Importing predictions...");
    for record in records.iter().filter(|r| r.model == PREDICTION_MODEL) {
        let row: DjangoPrediction = serde_json::from_value(record.fields.clone())
            .with_context(|| format!("Invalid prediction record {}", record.pk))?;

        let inserted = prediction::ActiveModel {
            timestamp: Set(parse_django_timestamp(&row.timestamp)?),
            predicted_demand: Set(row.predicted_demand),
            confidence_score: Set(row.confidence_score),
            ..Default::default()
        }
        .insert(db)
        .await?;
        summary.predictions += 1;
        debug!("Imported prediction {} -> ID {}", record.pk, inserted.id);
    }
    info!("Imported {} predictions", summary.predictions);

    summary.ignored = records
        .iter()
        .filter(|r| r.model != MARKET_DATA_MODEL && r.model != PREDICTION_MODEL)
        .count();

    Ok(summary)
}
