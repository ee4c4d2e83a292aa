//! Prediction facade over the pre-trained demand classifier.
//!
//! Handlers and the replay loop only see [`DemandPredictor`]; the concrete
//! model is chosen at startup.

pub mod logistic;

use chrono::{Datelike, Month};
use model::{DemandLevel, DiseaseAlert, entities::market_data};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

pub use logistic::LogisticModel;

/// Inference failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("feature `{feature}` is not a finite number")]
    NonFinite { feature: &'static str },

    #[error("week {0} is outside 1..=53")]
    WeekOutOfRange(i32),

    #[error("unknown month name `{0}`")]
    UnknownMonth(String),

    #[error("model produced no usable scores")]
    Degenerate,
}

/// The full feature set the model is trained on. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionFeatures {
    pub rainfall_mm: f64,
    pub temperature_c: f64,
    pub market_day: bool,
    pub school_open: bool,
    pub disease_alert: DiseaseAlert,
    pub last_week_demand: DemandLevel,
    pub week: i32,
    /// English month name, e.g. "June"
    pub month: String,
}

impl PredictionFeatures {
    /// Checks ranges the model cannot extrapolate over and returns the
    /// normalised month.
    pub fn validate(&self) -> Result<Month, PredictionError> {
        if !self.rainfall_mm.is_finite() {
            return Err(PredictionError::NonFinite { feature: "rainfall_mm" });
        }
        if !self.temperature_c.is_finite() {
            return Err(PredictionError::NonFinite { feature: "temperature_c" });
        }
        if !(1..=53).contains(&self.week) {
            return Err(PredictionError::WeekOutOfRange(self.week));
        }
        self.month
            .trim()
            .parse::<Month>()
            .map_err(|_| PredictionError::UnknownMonth(self.month.clone()))
    }
}

impl From<&market_data::Model> for PredictionFeatures {
    fn from(row: &market_data::Model) -> Self {
        Self {
            rainfall_mm: row.rainfall_mm,
            temperature_c: row.temperature_c,
            market_day: row.market_day,
            school_open: row.school_open,
            disease_alert: row.disease_alert,
            last_week_demand: row.last_week_demand,
            week: row.week,
            month: row.month.clone(),
        }
    }
}

/// Model output: the chosen label and the model's certainty in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: DemandLevel,
    /// In [0, 1]
    pub confidence: f64,
}

/// Interface for demand classifiers.
pub trait DemandPredictor: Send + Sync + Debug {
    /// Predicts the demand level for one week of features.
    fn predict(&self, features: &PredictionFeatures) -> Result<Prediction, PredictionError>;

    /// Model name/version for logs and health output.
    fn name(&self) -> &str;
}

/// Always answers with the same prediction. Used where the classifier must be
/// pinned, e.g. API tests and dry runs.
#[derive(Debug, Clone)]
pub struct FixedPredictor {
    prediction: Prediction,
}

impl FixedPredictor {
    pub fn new(label: DemandLevel, confidence: f64) -> Self {
        Self {
            prediction: Prediction { label, confidence },
        }
    }
}

impl DemandPredictor for FixedPredictor {
    fn predict(&self, features: &PredictionFeatures) -> Result<Prediction, PredictionError> {
        features.validate()?;
        Ok(self.prediction)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Assumed conditions used when predicting the current week, where no
/// observations exist yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    pub rainfall_mm: f64,
    pub temperature_c: f64,
    pub market_day: bool,
    pub school_open: bool,
    pub disease_alert: DiseaseAlert,
    pub last_week_demand: DemandLevel,
}

impl Default for CurrentConditions {
    fn default() -> Self {
        Self {
            rainfall_mm: 75.0,
            temperature_c: 23.0,
            market_day: true,
            school_open: true,
            disease_alert: DiseaseAlert::Absence,
            last_week_demand: DemandLevel::Medium,
        }
    }
}

impl CurrentConditions {
    /// Features for the ISO week and month containing `date`.
    pub fn features_for<D: Datelike>(&self, date: &D) -> PredictionFeatures {
        let month = Month::try_from(date.month() as u8)
            .map(|m| m.name().to_string())
            .unwrap_or_default();
        PredictionFeatures {
            rainfall_mm: self.rainfall_mm,
            temperature_c: self.temperature_c,
            market_day: self.market_day,
            school_open: self.school_open,
            disease_alert: self.disease_alert,
            last_week_demand: self.last_week_demand,
            week: date.iso_week().week() as i32,
            month,
        }
    }
}
