//! TCG Radar — cross-marketplace arbitrage signal engine.
//!
//! Watches Cardmarket (EUR, buy side) against TCGPlayer/eBay (USD, sell
//! side), runs every candidate through the ten-stage rules engine, and
//! delivers per-user signals on independent cadences.

pub mod api;
pub mod cascade;
pub mod config;
pub mod deep_link;
pub mod error;
pub mod generator;
pub mod middleware;
pub mod money;
pub mod notify;
pub mod orchestrator;
pub mod rotation_calendar;
pub mod rules;
pub mod sources;
pub mod store;
pub mod synergy;
pub mod trend_analyzer;

pub use config::Config;
pub use error::{RadarError, RadarResult};
