use chrono::{DateTime, Utc};
use model::DemandLevel;
use model::entities::prediction;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::format::{confidence_percentage, round2};

/// Prediction for the current ISO week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurrentWeekPrediction {
    /// ISO week number
    pub week: u32,
    pub predicted_demand: DemandLevel,
    /// Confidence rounded to two decimals
    pub confidence: f64,
    /// Dashboard color for the predicted level
    pub status_color: String,
    /// Truncated whole percentage, e.g. "87%"
    pub confidence_percentage: String,
}

impl CurrentWeekPrediction {
    pub fn new(week: u32, predicted_demand: DemandLevel, confidence: f64) -> Self {
        Self {
            week,
            predicted_demand,
            confidence: round2(confidence),
            status_color: predicted_demand.status_color().to_string(),
            confidence_percentage: confidence_percentage(confidence),
        }
    }
}

/// Result of an ad-hoc prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionResult {
    /// Identifier of the logged prediction record
    pub id: i32,
    pub predicted_demand: DemandLevel,
    pub confidence: f64,
    pub status_color: String,
    pub confidence_percentage: String,
}

impl PredictionResult {
    pub fn new(id: i32, predicted_demand: DemandLevel, confidence: f64) -> Self {
        Self {
            id,
            predicted_demand,
            confidence: round2(confidence),
            status_color: predicted_demand.status_color().to_string(),
            confidence_percentage: confidence_percentage(confidence),
        }
    }
}

/// A logged prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionRecordDto {
    pub id: i32,
    pub timestamp: DateTime<Utc>,
    pub predicted_demand: DemandLevel,
    pub confidence_score: f64,
}

impl From<prediction::Model> for PredictionRecordDto {
    fn from(model: prediction::Model) -> Self {
        Self {
            id: model.id,
            timestamp: model.timestamp,
            predicted_demand: model.predicted_demand,
            confidence_score: model.confidence_score,
        }
    }
}

/// A page of the prediction log, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionHistory {
    pub predictions: Vec<PredictionRecordDto>,
    pub page: u64,
    pub limit: u64,
    /// Total number of logged predictions
    pub total: u64,
}
