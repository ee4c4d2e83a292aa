//! Closed categorical domains of the market dataset.
//!
//! Both enums are stored as their string names, matching the values found in
//! the historical Django dataset (`"High"`, `"Absence"`, ...).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Weekly tomato demand level. Exactly three values exist; colors and the
/// numeric scale used by charts are defined over this set only.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum DemandLevel {
    #[sea_orm(string_value = "Low")]
    Low,
    #[sea_orm(string_value = "Medium")]
    Medium,
    #[sea_orm(string_value = "High")]
    High,
}

impl DemandLevel {
    /// All levels in ascending order.
    pub const ALL: [DemandLevel; 3] = [DemandLevel::Low, DemandLevel::Medium, DemandLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            DemandLevel::Low => "Low",
            DemandLevel::Medium => "Medium",
            DemandLevel::High => "High",
        }
    }

    /// Dashboard status color.
    pub fn status_color(&self) -> &'static str {
        match self {
            DemandLevel::High => "red",
            DemandLevel::Medium => "orange",
            DemandLevel::Low => "green",
        }
    }

    /// Numeric scale used for trend charts (Low=1, Medium=2, High=3).
    pub fn scale(&self) -> u8 {
        match self {
            DemandLevel::Low => 1,
            DemandLevel::Medium => 2,
            DemandLevel::High => 3,
        }
    }
}

impl fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a crop disease alert was active for the week.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum DiseaseAlert {
    #[sea_orm(string_value = "Presence")]
    Presence,
    #[sea_orm(string_value = "Absence")]
    Absence,
}

impl DiseaseAlert {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseAlert::Presence => "Presence",
            DiseaseAlert::Absence => "Absence",
        }
    }
}

impl fmt::Display for DiseaseAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
