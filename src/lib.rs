//! Pawcare Strategic Optimizer: a scenario dashboard comparing
//! cluster-optimized and fragmented mobile pet-care routing.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod render;
pub mod scenario;
pub mod utils;
pub mod web;
