//! Admin/health HTTP surface (Section A) — ops-facing, not a user-facing
//! web UI. Exposes liveness, Prometheus metrics, an admin signal read
//! path via the privileged bypass (Section 4.E), and the cadence-boost
//! hook (Section 4.F).

mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::middleware::{rate_limit_middleware, request_logging_simple, RateLimitConfig, RateLimitLayer};
use crate::orchestrator::CadenceHandle;

pub use routes::AppState;

pub fn build_router(pool: PgPool, config: Arc<Config>, cadence: CadenceHandle, metrics_handle: PrometheusHandle) -> Router {
    let state = AppState {
        pool,
        config,
        cadence,
        metrics_handle,
    };

    // The boost endpoint is the only write path on this surface — rate
    // limit it separately so an abusive caller can't starve legitimate
    // cadence boosts for every other card.
    let admin_writes = Router::new()
        .route("/admin/boost/:card_id", post(routes::boost_card))
        .layer(axum::middleware::from_fn_with_state(
            RateLimitLayer::new(RateLimitConfig {
                max_requests: 30,
                window: std::time::Duration::from_secs(60),
                burst: 10,
            }),
            rate_limit_middleware,
        ));

    Router::new()
        .route("/health", get(routes::health))
        .route("/metrics", get(routes::metrics))
        .route("/admin/signals", get(routes::admin_signals))
        .merge(admin_writes)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_logging_simple))
        .with_state(state)
}
