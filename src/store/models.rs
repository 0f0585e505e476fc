//! Row types for the Data Model & Store (Section 4.E).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Shop,
    Pro,
    Trader,
    Free,
}

impl SubscriptionTier {
    /// Legacy labels still present in older profile rows.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "shop" => Self::Shop,
            "pro" => Self::Pro,
            "premium" => Self::Pro,
            "trader" => Self::Trader,
            "standard" => Self::Trader,
            _ => Self::Free,
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Self::Shop => 3,
            Self::Pro => 2,
            Self::Trader => 1,
            Self::Free => 0,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub telegram_chat_id: Option<i64>,
    pub discord_channel_id: Option<i64>,
    pub country: Option<String>,
    pub seller_level: Option<String>,
    pub preferred_platforms: Vec<String>,
    pub min_profit_threshold: Decimal,
    pub min_headache_score: i32,
    pub card_categories: Vec<String>,
    pub currency: String,
    pub import_duty_rate: Option<Decimal>,
    pub forwarder_receiving_fee: Decimal,
    pub forwarder_consolidation_fee: Decimal,
    pub insurance_rate: Decimal,
    pub use_forwarder: bool,
    pub subscription_tier: String,
    pub engagement_score: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CardMetadata {
    pub card_id: String,
    pub name: String,
    pub set_code: String,
    pub set_name: String,
    pub card_number: String,
    pub regulation_mark: Option<String>,
    pub set_release_date: Option<NaiveDate>,
    pub legality_standard: bool,
    pub legality_expanded: bool,
    pub tcgplayer_url: Option<String>,
    pub cardmarket_url: Option<String>,
    pub image_url: Option<String>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct MarketPrice {
    pub card_id: String,
    pub source: String,
    pub price_usd: Option<Decimal>,
    pub price_eur: Option<Decimal>,
    pub condition: Option<String>,
    pub last_updated: DateTime<Utc>,
    pub seller_id: Option<String>,
    pub seller_rating: Option<Decimal>,
    pub seller_sales: Option<i32>,
    pub sales_30d: Option<i32>,
    pub active_listings: Option<i32>,
}

#[derive(Debug, Clone, FromRow)]
pub struct PriceHistory {
    pub id: Uuid,
    pub card_id: String,
    pub source: String,
    pub price_usd: Option<Decimal>,
    pub price_eur: Option<Decimal>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Signal {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub card_id: String,
    pub card_name: String,
    pub signal_type: String,
    pub price_eur: Decimal,
    pub price_usd: Decimal,
    pub net_profit: Decimal,
    pub margin_pct: Decimal,
    pub velocity_score: Option<Decimal>,
    pub velocity_tier: Option<String>,
    pub headache_score: Option<Decimal>,
    pub headache_tier: Option<String>,
    pub maturity_multiplier: Option<Decimal>,
    pub condition: Option<String>,
    pub regulation_mark: Option<String>,
    pub rotation_risk: Option<String>,
    pub trend_classification: Option<String>,
    pub bundle_tier: Option<String>,
    pub tcgplayer_url: Option<String>,
    pub cardmarket_url: Option<String>,
    pub cascade_count: i32,
    pub acted_on: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// No tenant predicate — admin-only access (Section 4.E).
#[derive(Debug, Clone, FromRow)]
pub struct SignalAudit {
    pub id: Uuid,
    pub signal_id: Uuid,
    pub source_prices: serde_json::Value,
    pub fee_calc: serde_json::Value,
    pub snapshot_data: serde_json::Value,
    pub calculation_version: String,
    pub created_at: DateTime<Utc>,
}
