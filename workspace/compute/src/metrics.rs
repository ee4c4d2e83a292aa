//! Dashboard metric cards computed over the prediction log.
//!
//! Window changes compare the current window `[now - n, ..)` with the
//! preceding one `[now - 2n, now - n)`.

use chrono::{DateTime, Duration, Utc};
use common::format::{percent_change, thousands};
use common::{DashboardCards, MetricCard};
use model::DemandLevel;
use model::entities::prediction;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};
use tracing::{debug, instrument};

use crate::error::Result;

/// Accuracy history is not tracked, so this delta is fixed.
pub const MODEL_PERFORMANCE_CHANGE: &str = "+2.6%";
/// High-demand history is not tracked, so this delta is fixed.
pub const HIGH_DEMAND_CHANGE: &str = "+5.8%";

/// Count of predictions and its change against the preceding window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowCount {
    pub current: u64,
    pub previous: u64,
    pub change: String,
}

/// Counts predictions made at or after `from` and, if given, before `until`.
pub async fn count_predictions(
    db: &DatabaseConnection,
    from: DateTime<Utc>,
    until: Option<DateTime<Utc>>,
) -> Result<u64> {
    let mut query = prediction::Entity::find().filter(prediction::Column::Timestamp.gte(from));
    if let Some(until) = until {
        query = query.filter(prediction::Column::Timestamp.lt(until));
    }
    Ok(query.count(db).await?)
}

/// Compares the last `days` days with the `days` before them.
#[instrument(skip(db))]
pub async fn window_count(db: &DatabaseConnection, now: DateTime<Utc>, days: i64) -> Result<WindowCount> {
    let boundary = now - Duration::days(days);
    let current = count_predictions(db, boundary, None).await?;
    let previous = count_predictions(db, boundary - Duration::days(days), Some(boundary)).await?;
    debug!(current, previous, days, "Window counts");
    Ok(WindowCount {
        current,
        previous,
        change: percent_change(current, previous),
    })
}

/// Mean confidence over all predictions; 0 when the log is empty.
pub async fn average_confidence(db: &DatabaseConnection) -> Result<f64> {
    let avg = prediction::Entity::find()
        .select_only()
        .column_as(Expr::expr(Func::avg(Expr::col(prediction::Column::ConfidenceScore))), "avg")
        .into_tuple::<Option<f64>>()
        .one(db)
        .await?;
    Ok(avg.flatten().unwrap_or(0.0))
}

/// Builds the four dashboard cards as of `now`.
#[instrument(skip(db))]
pub async fn dashboard_cards(db: &DatabaseConnection, now: DateTime<Utc>) -> Result<DashboardCards> {
    let total = prediction::Entity::find().count(db).await?;
    let monthly = window_count(db, now, 30).await?;
    let weekly = window_count(db, now, 7).await?;

    let performance_percent = (average_confidence(db).await? * 100.0) as i64;

    let high_demand = prediction::Entity::find()
        .filter(prediction::Column::PredictedDemand.eq(DemandLevel::High))
        .count(db)
        .await?;

    Ok(DashboardCards {
        total_predictions: MetricCard::new(thousands(total), monthly.change, "TOTAL PREDICTIONS"),
        weekly_predictions: MetricCard::new(thousands(weekly.current), weekly.change, "THIS WEEK"),
        model_performance: MetricCard::new(
            format!("{}%", performance_percent),
            MODEL_PERFORMANCE_CHANGE,
            "ACCURACY",
        ),
        high_demand_weeks: MetricCard::new(thousands(high_demand), HIGH_DEMAND_CHANGE, "HIGH DEMAND"),
    })
}
