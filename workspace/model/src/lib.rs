pub mod demand;
pub mod entities;

pub use demand::{DemandLevel, DiseaseAlert};
