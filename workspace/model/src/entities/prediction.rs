use crate::demand::DemandLevel;
use sea_orm::entity::prelude::*;

/// One logged model prediction. Rows are append-only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "predictions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// When the prediction was made (UTC).
    pub timestamp: DateTimeUtc,
    pub predicted_demand: DemandLevel,
    /// Model certainty in its chosen label, in [0, 1].
    pub confidence_score: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
