//! Data Model & Store (Section 4.E).

pub mod audit;
pub mod candidates;
pub mod market_price;
pub mod models;
pub mod signals;
pub mod tenancy;
pub mod users;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::{RadarError, RadarResult};

/// Creates the pool once at startup with a pre-use liveness check so a
/// dead connection is replaced before a caller ever sees it, rather than
/// surfacing as a mid-request failure.
pub async fn connect(database_url: &str) -> RadarResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .test_before_acquire(true)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .map_err(|e| RadarError::Fatal(format!("failed to connect to database: {e}")))
}

pub use tenancy::TenantId;
