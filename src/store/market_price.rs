//! Market price upsert + history append (Section 4.E).
//!
//! A poll writes both the current snapshot (`market_prices`, upserted) and
//! an immutable history row (`price_history`, appended) in one
//! transaction, so the trend analyzer's window is never missing a point
//! the current-price read already reflects.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RadarResult;

#[allow(clippy::too_many_arguments)]
pub async fn record_price(
    pool: &PgPool,
    card_id: &str,
    source: &str,
    price_usd: Option<Decimal>,
    price_eur: Option<Decimal>,
    condition: Option<&str>,
    seller_id: Option<&str>,
    seller_rating: Option<Decimal>,
    seller_sales: Option<i32>,
) -> RadarResult<()> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO market_prices
            (card_id, source, price_usd, price_eur, condition, last_updated,
             seller_id, seller_rating, seller_sales)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (card_id, source) DO UPDATE SET
            price_usd = EXCLUDED.price_usd,
            price_eur = EXCLUDED.price_eur,
            condition = EXCLUDED.condition,
            last_updated = EXCLUDED.last_updated,
            seller_id = EXCLUDED.seller_id,
            seller_rating = EXCLUDED.seller_rating,
            seller_sales = EXCLUDED.seller_sales
        "#,
    )
    .bind(card_id)
    .bind(source)
    .bind(price_usd)
    .bind(price_eur)
    .bind(condition)
    .bind(now)
    .bind(seller_id)
    .bind(seller_rating)
    .bind(seller_sales)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO price_history (id, card_id, source, price_usd, price_eur, recorded_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(card_id)
    .bind(source)
    .bind(price_usd)
    .bind(price_eur)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

/// Last 7 days of history for a card/source pair, ascending, for the
/// trend analyzer.
pub async fn seven_day_history(
    pool: &PgPool,
    card_id: &str,
    source: &str,
) -> RadarResult<Vec<(chrono::NaiveDate, Option<Decimal>, Option<Decimal>)>> {
    let cutoff = Utc::now() - chrono::Duration::days(7);
    let rows: Vec<(chrono::DateTime<Utc>, Option<Decimal>, Option<Decimal>)> = sqlx::query_as(
        r#"
        SELECT recorded_at, price_usd, price_eur
        FROM price_history
        WHERE card_id = $1 AND source = $2 AND recorded_at >= $3
        ORDER BY recorded_at ASC
        "#,
    )
    .bind(card_id)
    .bind(source)
    .bind(cutoff)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(ts, usd, eur)| (ts.date_naive(), usd, eur))
        .collect())
}
