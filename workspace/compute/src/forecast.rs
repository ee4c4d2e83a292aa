//! Live predictions: the current-week forecast and ad-hoc scoring, both
//! logged to the prediction table.

use chrono::{DateTime, Utc};
use common::CurrentWeekPrediction;
use model::entities::prediction;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::predictor::{CurrentConditions, DemandPredictor, Prediction, PredictionFeatures};

/// Scores `features` and appends the outcome to the prediction log.
#[instrument(skip(db, predictor))]
pub async fn predict_and_record(
    db: &DatabaseConnection,
    predictor: &dyn DemandPredictor,
    features: &PredictionFeatures,
    at: DateTime<Utc>,
) -> Result<(prediction::Model, Prediction)> {
    let outcome = predictor.predict(features)?;
    debug!(label = %outcome.label, confidence = outcome.confidence, "Model returned prediction");

    let record = prediction::ActiveModel {
        timestamp: Set(at),
        predicted_demand: Set(outcome.label),
        confidence_score: Set(outcome.confidence),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Recorded prediction {} ({})", record.id, record.predicted_demand);
    Ok((record, outcome))
}

/// Predicts demand for the ISO week containing `now` under the assumed
/// `conditions`.
#[instrument(skip(db, predictor))]
pub async fn current_week_prediction(
    db: &DatabaseConnection,
    predictor: &dyn DemandPredictor,
    conditions: &CurrentConditions,
    now: DateTime<Utc>,
) -> Result<CurrentWeekPrediction> {
    let features = conditions.features_for(&now);
    let week = features.week as u32;
    let (_, outcome) = predict_and_record(db, predictor, &features, now).await?;
    Ok(CurrentWeekPrediction::new(week, outcome.label, outcome.confidence))
}
