//! Multinomial logistic-regression demand classifier.
//!
//! Numeric features are standardised with the training mean/scale, booleans
//! enter as 0/1, categorical features are one-hot with a weight vector per
//! category (a missing category is the reference level). Scores go through a
//! softmax; the confidence is the winning class probability.

use model::DemandLevel;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{debug, info, instrument};

use super::{DemandPredictor, Prediction, PredictionError, PredictionFeatures};
use crate::error::{ComputeError, Result};

const BUNDLED_MODEL: &str = include_str!("../../models/demand_model.json");

/// Standardisation parameters and per-class weights of one numeric feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericFeature {
    pub mean: f64,
    pub scale: f64,
    pub weights: Vec<f64>,
}

/// Serialized classifier parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub name: String,
    pub version: String,
    /// Class order of every weight vector
    pub classes: Vec<DemandLevel>,
    pub intercepts: Vec<f64>,
    #[serde(default)]
    pub numeric: BTreeMap<String, NumericFeature>,
    #[serde(default)]
    pub categorical: BTreeMap<String, BTreeMap<String, Vec<f64>>>,
    #[serde(skip)]
    label: String,
}

impl LogisticModel {
    /// The model shipped with the service.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_MODEL)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let model: LogisticModel = serde_json::from_str(raw)
            .map_err(|e| ComputeError::Model(format!("Malformed model JSON: {}", e)))?;
        model.validated()
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let model: LogisticModel = serde_yaml::from_str(raw)
            .map_err(|e| ComputeError::Model(format!("Malformed model YAML: {}", e)))?;
        model.validated()
    }

    /// Loads a model file; `.yaml`/`.yml` are read as YAML, anything else as JSON.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ComputeError::Model(format!("Cannot read model file {}: {}", path.display(), e))
        })?;
        let model = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&raw)?,
            _ => Self::from_json(&raw)?,
        };
        info!("Loaded demand model {} from {}", model.label, path.display());
        Ok(model)
    }

    fn validated(mut self) -> Result<Self> {
        let width = self.classes.len();
        let distinct: HashSet<DemandLevel> = self.classes.iter().copied().collect();
        if width != DemandLevel::ALL.len() || distinct.len() != width {
            return Err(ComputeError::Model(format!(
                "Model classes must be exactly Low, Medium and High, got {:?}",
                self.classes
            )));
        }
        if self.intercepts.len() != width {
            return Err(ComputeError::Model(format!(
                "Expected {} intercepts, got {}",
                width,
                self.intercepts.len()
            )));
        }
        for (name, feature) in &self.numeric {
            if feature.weights.len() != width {
                return Err(ComputeError::Model(format!(
                    "Numeric feature `{}` has {} weights, expected {}",
                    name,
                    feature.weights.len(),
                    width
                )));
            }
            if !(feature.scale.is_finite() && feature.scale > 0.0) {
                return Err(ComputeError::Model(format!(
                    "Numeric feature `{}` has non-positive scale",
                    name
                )));
            }
        }
        for (name, categories) in &self.categorical {
            for (category, weights) in categories {
                if weights.len() != width {
                    return Err(ComputeError::Model(format!(
                        "Category `{}={}` has {} weights, expected {}",
                        name,
                        category,
                        weights.len(),
                        width
                    )));
                }
            }
        }
        self.label = format!("{}@{}", self.name, self.version);
        Ok(self)
    }

    fn add_numeric(&self, scores: &mut [f64], feature: &str, value: f64) {
        if let Some(f) = self.numeric.get(feature) {
            let x = (value - f.mean) / f.scale;
            for (score, w) in scores.iter_mut().zip(&f.weights) {
                *score += w * x;
            }
        }
    }

    fn add_categorical(&self, scores: &mut [f64], feature: &str, value: &str) {
        if let Some(weights) = self.categorical.get(feature).and_then(|c| c.get(value)) {
            for (score, w) in scores.iter_mut().zip(weights) {
                *score += w;
            }
        }
    }

    /// Class probabilities in `classes` order.
    pub fn probabilities(&self, features: &PredictionFeatures) -> std::result::Result<Vec<f64>, PredictionError> {
        let month = features.validate()?;

        let mut scores = self.intercepts.clone();
        self.add_numeric(&mut scores, "rainfall_mm", features.rainfall_mm);
        self.add_numeric(&mut scores, "temperature_c", features.temperature_c);
        self.add_numeric(&mut scores, "week", features.week as f64);
        self.add_numeric(&mut scores, "market_day", if features.market_day { 1.0 } else { 0.0 });
        self.add_numeric(&mut scores, "school_open", if features.school_open { 1.0 } else { 0.0 });
        self.add_categorical(&mut scores, "disease_alert", features.disease_alert.as_str());
        self.add_categorical(&mut scores, "last_week_demand", features.last_week_demand.as_str());
        self.add_categorical(&mut scores, "month", month.name());

        softmax(&scores).ok_or(PredictionError::Degenerate)
    }
}

impl DemandPredictor for LogisticModel {
    fn predict(&self, features: &PredictionFeatures) -> std::result::Result<Prediction, PredictionError> {
        let probabilities = self.probabilities(features)?;
        let (index, confidence) = probabilities
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or(PredictionError::Degenerate)?;
        let label = self.classes[index];
        debug!(?label, confidence, week = features.week, "Scored week");
        Ok(Prediction { label, confidence })
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Numerically stable softmax; `None` if the scores are not finite.
fn softmax(scores: &[f64]) -> Option<Vec<f64>> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return None;
    }
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return None;
    }
    Some(exps.into_iter().map(|e| e / sum).collect())
}
