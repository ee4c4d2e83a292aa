use common::{ChartData, DemandDistribution, TrendPoint};
use model::entities::market_data;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, QuerySelect};
use tracing::{debug, instrument};

use crate::error::Result;

/// Number of most recent market weeks shown on the dashboard charts.
pub const CHART_WEEKS: u64 = 12;

/// Trend points for the latest market weeks, oldest first, with the demand
/// distribution over the same weeks.
#[instrument(skip(db))]
pub async fn chart_data(db: &DatabaseConnection) -> Result<ChartData> {
    let mut rows = market_data::Entity::find()
        .order_by_desc(market_data::Column::Year)
        .order_by_desc(market_data::Column::Week)
        .limit(CHART_WEEKS)
        .all(db)
        .await?;
    rows.reverse();
    debug!("Building chart data from {} market weeks", rows.len());

    let mut demand_distribution = DemandDistribution::default();
    let trend_data: Vec<TrendPoint> = rows
        .into_iter()
        .map(|row| {
            demand_distribution.record(row.market_demand);
            TrendPoint {
                week: format!("W{}", row.week),
                demand_level: row.market_demand,
                demand_value: row.market_demand.scale(),
                rainfall: row.rainfall_mm,
                temperature: row.temperature_c,
            }
        })
        .collect();

    Ok(ChartData {
        total_weeks: trend_data.len(),
        trend_data,
        demand_distribution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{insert_market_week, setup_db};
    use model::DemandLevel;

    #[tokio::test]
    async fn test_empty_dataset() {
        let db = setup_db().await.unwrap();
        let data = chart_data(&db).await.unwrap();
        assert!(data.trend_data.is_empty());
        assert_eq!(data.total_weeks, 0);
        assert_eq!(data.demand_distribution.total(), 0);
    }

    #[tokio::test]
    async fn test_latest_twelve_weeks_in_chronological_order() {
        let db = setup_db().await.unwrap();
        // Weeks 45-52 of 2024 and 1-8 of 2025
        for week in 45..=52 {
            insert_market_week(&db, 2024, week, DemandLevel::Low).await;
        }
        for week in 1..=8 {
            let demand = if week % 2 == 0 { DemandLevel::High } else { DemandLevel::Medium };
            insert_market_week(&db, 2025, week, demand).await;
        }

        let data = chart_data(&db).await.unwrap();

        assert_eq!(data.total_weeks, 12);
        let labels: Vec<&str> = data.trend_data.iter().map(|p| p.week.as_str()).collect();
        assert_eq!(
            labels,
            vec!["W49", "W50", "W51", "W52", "W1", "W2", "W3", "W4", "W5", "W6", "W7", "W8"]
        );
        assert_eq!(data.demand_distribution.low, 4);
        assert_eq!(data.demand_distribution.high, 4);
        assert_eq!(data.demand_distribution.medium, 4);
        assert_eq!(data.demand_distribution.total(), data.trend_data.len());
        assert_eq!(data.trend_data[0].demand_value, 1);
        assert_eq!(data.trend_data[5].demand_value, 3);
    }
}
