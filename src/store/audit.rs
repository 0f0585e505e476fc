//! Signal audit trail (Section 4.E).
//!
//! No tenant predicate here — this table is admin-only, used to
//! reconstruct exactly which source prices and fee math produced a given
//! signal, for dispute resolution and debugging.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RadarResult;

use super::models::SignalAudit;

pub async fn insert(
    pool: &PgPool,
    signal_id: Uuid,
    source_prices: serde_json::Value,
    fee_calc: serde_json::Value,
    snapshot_data: serde_json::Value,
) -> RadarResult<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO signal_audit (id, signal_id, source_prices, fee_calc, snapshot_data, calculation_version, created_at)
        VALUES ($1, $2, $3, $4, $5, 'v1', now())
        "#,
    )
    .bind(id)
    .bind(signal_id)
    .bind(source_prices)
    .bind(fee_calc)
    .bind(snapshot_data)
    .execute(pool)
    .await?;
    Ok(id)
}

pub async fn for_signal(pool: &PgPool, signal_id: Uuid) -> RadarResult<Vec<SignalAudit>> {
    let rows = sqlx::query_as::<_, SignalAudit>("SELECT * FROM signal_audit WHERE signal_id = $1 ORDER BY created_at DESC")
        .bind(signal_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
