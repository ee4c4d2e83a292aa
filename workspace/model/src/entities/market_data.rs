use crate::demand::{DemandLevel, DiseaseAlert};
use sea_orm::entity::prelude::*;

/// Observed conditions and actual demand for one market week.
/// Corresponds to the `MarketData` Django model; read-only for the service.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "market_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub year: i32,
    /// ISO week number (1-53).
    pub week: i32,
    pub rainfall_mm: f64,
    pub temperature_c: f64,
    pub market_day: bool,
    pub school_open: bool,
    pub disease_alert: DiseaseAlert,
    pub last_week_demand: DemandLevel,
    /// Actual demand recorded for the week.
    pub market_demand: DemandLevel,
    /// English month name, e.g. "March".
    pub month: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
