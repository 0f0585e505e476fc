//! Tenant-scoped signal reads and writes (Section 4.E).
//!
//! Every query in this module takes a `TenantId` and bakes it into the
//! `WHERE` clause — there is no function here that can read across
//! tenants. Admin-only cross-tenant access goes through `audit`/the
//! privileged bypass path instead, never through this module.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RadarResult;
use crate::rules::Evaluation;

use super::models::Signal;
use super::tenancy::TenantId;

#[allow(clippy::too_many_arguments)]
pub async fn insert_signal(
    pool: &PgPool,
    tenant: TenantId,
    card_id: &str,
    card_name: &str,
    price_eur: Decimal,
    price_usd: Decimal,
    condition: Option<&str>,
    evaluation: &Evaluation,
    tcgplayer_url: Option<&str>,
    cardmarket_url: Option<&str>,
    expires_at: DateTime<Utc>,
) -> RadarResult<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO signals (
            id, tenant_id, card_id, card_name, signal_type,
            price_eur, price_usd, net_profit, margin_pct,
            velocity_score, velocity_tier, headache_score, headache_tier,
            maturity_multiplier, condition, rotation_risk, trend_classification,
            bundle_tier, tcgplayer_url, cardmarket_url, cascade_count, acted_on,
            expires_at, created_at
        ) VALUES (
            $1, $2, $3, $4, 'arbitrage',
            $5, $6, $7, $8,
            $9, $10, $11, $12,
            $13, $14, $15, $16,
            $17, $18, $19, 0, false,
            $20, now()
        )
        "#,
    )
    .bind(id)
    .bind(tenant.0)
    .bind(card_id)
    .bind(card_name)
    .bind(price_eur)
    .bind(price_usd)
    .bind(evaluation.net_profit.net_profit)
    .bind(evaluation.net_profit.margin_pct)
    .bind(evaluation.velocity_score)
    .bind(evaluation.velocity_tier)
    .bind(evaluation.headache_score)
    .bind(evaluation.headache_tier)
    .bind(evaluation.maturity_multiplier)
    .bind(condition)
    .bind(evaluation.rotation_risk)
    .bind(evaluation.trend_classification)
    .bind(evaluation.bundle_tier)
    .bind(tcgplayer_url)
    .bind(cardmarket_url)
    .bind(expires_at)
    .execute(pool)
    .await?;
    Ok(id)
}

pub async fn recent_for_tenant(pool: &PgPool, tenant: TenantId, limit: i64) -> RadarResult<Vec<Signal>> {
    let rows = sqlx::query_as::<_, Signal>(
        r#"
        SELECT * FROM signals
        WHERE tenant_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(tenant.0)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn mark_acted_on(pool: &PgPool, tenant: TenantId, signal_id: Uuid) -> RadarResult<()> {
    sqlx::query("UPDATE signals SET acted_on = true WHERE id = $1 AND tenant_id = $2")
        .bind(signal_id)
        .bind(tenant.0)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn increment_cascade(pool: &PgPool, tenant: TenantId, signal_id: Uuid) -> RadarResult<i32> {
    let (count,): (i32,) = sqlx::query_as(
        "UPDATE signals SET cascade_count = cascade_count + 1 WHERE id = $1 AND tenant_id = $2 RETURNING cascade_count",
    )
    .bind(signal_id)
    .bind(tenant.0)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Cross-tenant read used only by the admin/health surface's privileged
/// bypass path (Section 4.E) — callers must be explicit about using it.
pub async fn all_cascade_eligible(pool: &PgPool, now: DateTime<Utc>) -> RadarResult<Vec<Signal>> {
    let rows = sqlx::query_as::<_, Signal>(
        r#"
        SELECT * FROM signals
        WHERE acted_on = false AND expires_at IS NOT NULL AND expires_at <= $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
