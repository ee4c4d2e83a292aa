use model::DemandLevel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Direction indicator shown next to a card's change value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// `Up` when the formatted change carries a plus sign.
    pub fn from_change(change: &str) -> Self {
        if change.contains('+') {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

/// One dashboard metric card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetricCard {
    /// Display value (already formatted)
    pub value: String,
    /// Change versus the previous window, e.g. "+12%"
    pub change: String,
    pub trend: Trend,
    /// Card caption
    pub label: String,
}

impl MetricCard {
    /// Builds a card whose trend is derived from the change string.
    pub fn new(value: impl Into<String>, change: impl Into<String>, label: impl Into<String>) -> Self {
        let change = change.into();
        Self {
            value: value.into(),
            trend: Trend::from_change(&change),
            change,
            label: label.into(),
        }
    }
}

/// The four cards at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardCards {
    pub total_predictions: MetricCard,
    pub weekly_predictions: MetricCard,
    pub model_performance: MetricCard,
    pub high_demand_weeks: MetricCard,
}

/// One week on the demand trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrendPoint {
    /// Week label, e.g. "W14"
    pub week: String,
    pub demand_level: DemandLevel,
    /// Demand on a 1-3 scale
    pub demand_value: u8,
    pub rainfall: f64,
    pub temperature: f64,
}

/// Count of weeks per demand level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DemandDistribution {
    #[serde(rename = "High")]
    pub high: usize,
    #[serde(rename = "Medium")]
    pub medium: usize,
    #[serde(rename = "Low")]
    pub low: usize,
}

impl DemandDistribution {
    pub fn record(&mut self, level: DemandLevel) {
        match level {
            DemandLevel::High => self.high += 1,
            DemandLevel::Medium => self.medium += 1,
            DemandLevel::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Payload for the dashboard charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartData {
    pub trend_data: Vec<TrendPoint>,
    pub demand_distribution: DemandDistribution,
    pub total_weeks: usize,
}
