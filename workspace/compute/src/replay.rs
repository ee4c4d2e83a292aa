//! Historical replay: runs recorded market weeks back through the model and
//! compares each prediction with the demand that actually occurred.

use common::format::round2;
use common::{SimulationFrame, SimulationResponse};
use model::entities::market_data;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::predictor::{DemandPredictor, PredictionFeatures};

/// Inclusive range of weeks within one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekRange {
    pub start: i32,
    pub end: i32,
    pub year: i32,
}

impl Default for WeekRange {
    fn default() -> Self {
        Self {
            start: 1,
            end: 20,
            year: 2025,
        }
    }
}

/// Replays the weeks of `range` in ascending order.
///
/// A week the model cannot score is skipped and replay continues; skipped
/// weeks are listed in the response.
#[instrument(skip(db, predictor))]
pub async fn simulate(
    db: &DatabaseConnection,
    predictor: &dyn DemandPredictor,
    range: WeekRange,
) -> Result<SimulationResponse> {
    if range.start > range.end {
        debug!("Empty week range, nothing to replay");
        return Ok(SimulationResponse::new(Vec::new(), Vec::new()));
    }

    let rows = market_data::Entity::find()
        .filter(market_data::Column::Year.eq(range.year))
        .filter(market_data::Column::Week.gte(range.start))
        .filter(market_data::Column::Week.lte(range.end))
        .order_by_asc(market_data::Column::Week)
        .all(db)
        .await?;

    let mut frames = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();

    for row in &rows {
        let features = PredictionFeatures::from(row);
        match predictor.predict(&features) {
            Ok(prediction) => frames.push(SimulationFrame {
                week: row.week,
                month: row.month.clone(),
                predicted_demand: prediction.label,
                actual_demand: row.market_demand,
                confidence: round2(prediction.confidence),
                is_match: prediction.label == row.market_demand,
            }),
            Err(e) => {
                warn!("Skipping week {} of {}: {}", row.week, row.year, e);
                skipped.push(row.week);
            }
        }
    }

    let replayed = rows.len();
    let response = SimulationResponse::new(frames, skipped);
    info!(
        "Replayed {} of {} weeks with {}, match rate {:.2}",
        response.total_frames,
        replayed,
        predictor.name(),
        response.match_rate().unwrap_or(0.0)
    );
    Ok(response)
}
