pub mod config;
pub mod cooking;
pub mod errors;
pub mod execution;
pub mod holdable;
pub mod kitchen;
pub mod orders;
pub mod payment;
pub mod plating;
pub mod stats;
pub mod types;
