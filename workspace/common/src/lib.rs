//! Common transport-layer types shared by the HTTP handlers, the compute
//! crate and the integration tests. Field names match the JSON consumed by
//! the dashboard client.

mod dashboard;
pub mod format;
mod prediction;
mod simulation;

pub use dashboard::{ChartData, DashboardCards, DemandDistribution, MetricCard, Trend, TrendPoint};
pub use prediction::{
    CurrentWeekPrediction, PredictionHistory, PredictionRecordDto, PredictionResult,
};
pub use simulation::{SimulationFrame, SimulationResponse};

pub use model::{DemandLevel, DiseaseAlert};
