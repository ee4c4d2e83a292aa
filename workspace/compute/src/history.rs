use common::{PredictionHistory, PredictionRecordDto};
use model::entities::prediction;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};
use tracing::instrument;

use crate::error::Result;

/// One page (1-based) of the prediction log, newest first.
#[instrument(skip(db))]
pub async fn prediction_history(db: &DatabaseConnection, page: u64, limit: u64) -> Result<PredictionHistory> {
    let page = page.max(1);
    let limit = limit.max(1);
    let paginator = prediction::Entity::find()
        .order_by_desc(prediction::Column::Timestamp)
        .order_by_desc(prediction::Column::Id)
        .paginate(db, limit);

    let total = paginator.num_items().await?;
    let predictions = paginator
        .fetch_page(page - 1)
        .await?
        .into_iter()
        .map(PredictionRecordDto::from)
        .collect();

    Ok(PredictionHistory {
        predictions,
        page,
        limit,
        total,
    })
}
