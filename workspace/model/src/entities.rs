//! This file serves as the root for all SeaORM entity modules.
//! The tables mirror the Django `predictions` and `market_data` apps.

pub mod market_data;
pub mod prediction;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::market_data::Entity as MarketData;
    pub use super::prediction::Entity as Prediction;
}
