//! Assembles rules-engine `Candidate`s from raw store rows (Section 4.E
//! feeding Section 4.B). Joins the Cardmarket buy-side quote against the
//! TCGPlayer sell-side quote for the same card and attaches metadata and
//! 7-day price history.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::config::Config;
use crate::error::RadarResult;
use crate::money::condition::{map_condition, CardmarketGrade};
use crate::money::profit::{calculate_net_profit, ForwarderOptions};
use crate::rules::Candidate;
use crate::trend_analyzer::{build_points, seven_day_trend};

use super::market_price::seven_day_history;
use super::models::{CardMetadata, MarketPrice, UserProfile};

const CARDMARKET_SOURCE: &str = "cardmarket";
const TCGPLAYER_SOURCE: &str = "tcgplayer";

pub async fn cards_with_both_sides(pool: &PgPool) -> RadarResult<Vec<(CardMetadata, MarketPrice, MarketPrice)>> {
    let cards: Vec<CardMetadata> = sqlx::query_as("SELECT * FROM card_metadata").fetch_all(pool).await?;
    let mut out = Vec::new();
    for card in cards {
        let cm: Option<MarketPrice> = sqlx::query_as("SELECT * FROM market_prices WHERE card_id = $1 AND source = $2")
            .bind(&card.card_id)
            .bind(CARDMARKET_SOURCE)
            .fetch_optional(pool)
            .await?;
        let tcg: Option<MarketPrice> = sqlx::query_as("SELECT * FROM market_prices WHERE card_id = $1 AND source = $2")
            .bind(&card.card_id)
            .bind(TCGPLAYER_SOURCE)
            .fetch_optional(pool)
            .await?;
        if let (Some(cm), Some(tcg)) = (cm, tcg) {
            out.push((card, cm, tcg));
        }
    }
    Ok(out)
}

fn forwarder_for_profile(profile: &UserProfile) -> ForwarderOptions {
    if profile.use_forwarder {
        ForwarderOptions {
            use_forwarder: true,
            receiving_fee: profile.forwarder_receiving_fee,
            consolidation_fee: profile.forwarder_consolidation_fee,
            insurance_rate: profile.insurance_rate,
        }
    } else {
        ForwarderOptions::none()
    }
}

/// Seller-Density Score input (stage 10): counts, per Cardmarket seller,
/// how many cards in this scan are independently profitable under this
/// subscriber's forwarder settings. SDS is "count of profitable cards from
/// the same seller in a single scan" — a scan-wide aggregate the per-card
/// assembly in `build_candidate` can't see on its own, so the caller
/// computes it once per profile and feeds the count back in.
pub fn profitable_counts_by_seller(
    cards: &[(CardMetadata, MarketPrice, MarketPrice)],
    profile: &UserProfile,
    config: &Config,
) -> HashMap<String, i64> {
    let forwarder = forwarder_for_profile(profile);
    let mut counts = HashMap::new();

    for (_, cm, tcg) in cards {
        let Some(seller_id) = cm.seller_id.clone() else { continue };
        let Some(grade) = cm.condition.as_deref().and_then(|c| c.parse::<CardmarketGrade>().ok()) else {
            continue;
        };
        let Ok(condition) = map_condition(grade) else { continue };
        let breakdown = calculate_net_profit(
            cm.price_eur.unwrap_or_default(),
            tcg.price_usd.unwrap_or_default(),
            config.eur_usd_static_rate,
            &condition,
            config.customs_regime,
            &forwarder,
            config,
        );
        if matches!(breakdown, Ok(b) if b.net_profit > Decimal::ZERO) {
            *counts.entry(seller_id).or_insert(0i64) += 1;
        }
    }

    counts
}

pub async fn build_candidate(
    pool: &PgPool,
    card: &CardMetadata,
    cm: &MarketPrice,
    tcg: &MarketPrice,
    profile: &UserProfile,
    config: &Config,
    seller_card_count: i64,
) -> RadarResult<Candidate> {
    let history = seven_day_history(pool, &card.card_id, TCGPLAYER_SOURCE).await?;
    let points = build_points(&history);
    let price_trend_daily = seven_day_trend(&points);

    let forwarder = forwarder_for_profile(profile);

    // V = sales_30d / active_listings; falls back to 1.0 when either side
    // of the ratio is missing or the denominator isn't positive.
    let daily_sales = match (tcg.sales_30d, tcg.active_listings) {
        (Some(sales), Some(listings)) if listings > 0 => Decimal::from(sales) / Decimal::from(listings),
        _ => Decimal::ONE,
    };

    Ok(Candidate {
        card_id: card.card_id.clone(),
        tcgplayer_id: Some(card.card_id.clone()),
        cardmarket_id: Some(card.card_id.clone()),
        seller_rating: cm.seller_rating,
        seller_sales: cm.seller_sales.map(i64::from),
        cardmarket_condition: cm.condition.clone().unwrap_or_else(|| "NM".to_string()),
        cm_price_eur: cm.price_eur.unwrap_or_default(),
        tcg_price_usd: tcg.price_usd.unwrap_or_default(),
        forex_rate: config.eur_usd_static_rate,
        customs_regime: config.customs_regime,
        forwarder,
        daily_sales,
        price_trend_daily,
        set_release_date: card.set_release_date.unwrap_or_else(|| Utc::now().date_naive()),
        reprint_rumored: false,
        regulation_mark: card.regulation_mark.clone(),
        legality_standard: card.legality_standard,
        num_transactions: 1,
        seller_card_count: seller_card_count.max(1),
        reference_date: Utc::now().date_naive(),
    })
}
