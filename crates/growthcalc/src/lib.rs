//! GrowthCalc-rs library: application logic for the growth calculator.

pub mod app;
pub mod config;
pub mod errors;
pub mod version;
