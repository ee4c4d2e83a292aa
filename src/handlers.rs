pub mod dashboard;
pub mod health;
pub mod predictions;
pub mod simulation;
