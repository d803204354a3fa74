//! Core domain types and logic.

pub mod ohlcv;
pub mod schema;
pub mod rolling_window;
pub mod position;
pub mod agent;
pub mod simulation;
pub mod metrics;
pub mod config_validation;
pub mod error;
