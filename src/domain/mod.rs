//! Core domain types and logic.

pub mod ohlcv;
pub mod signal;
pub mod indicator;
pub mod position;
pub mod backtest;
pub mod strategy;
pub mod sweep;
pub mod report;
pub mod config_validation;
pub mod settings;
pub mod error;
