//! Demand prediction logic behind the dashboard API: the model facade,
//! metric aggregation over the prediction log, chart data and historical
//! replay. Everything here is framework-agnostic and takes a database
//! connection plus, where inference is involved, a [`DemandPredictor`].

pub mod charts;
pub mod error;
pub mod forecast;
pub mod history;
pub mod metrics;
pub mod predictor;
pub mod replay;

#[cfg(test)]
mod testing;

pub use error::{ComputeError, Result};
pub use predictor::{CurrentConditions, DemandPredictor, FixedPredictor, LogisticModel, PredictionFeatures};
pub use replay::WeekRange;
