//! Admin/health route handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::orchestrator::CadenceHandle;
use crate::store::signals;
use crate::store::tenancy::TenantId;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub cadence: CadenceHandle,
    pub metrics_handle: PrometheusHandle,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub db_ok: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_ok = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    Json(HealthResponse {
        status: if db_ok { "ok" } else { "degraded" },
        db_ok,
    })
}

pub async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

#[derive(Debug, Deserialize)]
pub struct AdminSignalQuery {
    pub tenant_id: Uuid,
    pub limit: Option<i64>,
}

/// Privileged bypass read path (Section 4.E) — admin-only, still requires
/// an explicit tenant id rather than reading across all tenants at once.
pub async fn admin_signals(
    State(state): State<AppState>,
    Query(query): Query<AdminSignalQuery>,
) -> Result<Json<Vec<crate::store::models::Signal>>, StatusCode> {
    let tenant = TenantId::new(query.tenant_id);
    let limit = query.limit.unwrap_or(50).min(500);
    signals::recent_for_tenant(&state.pool, tenant, limit)
        .await
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

pub async fn boost_card(State(state): State<AppState>, Path(card_id): Path<String>) -> StatusCode {
    state.cadence.boost(&card_id);
    StatusCode::ACCEPTED
}
