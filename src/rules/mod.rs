//! Rules Engine (Section 4.B).
//!
//! Ten stages run in strict order; the first stage to reject or suppress
//! stops the pipeline. Stages never raise for a normal rejection — they
//! return a tagged `Rejection` — only a genuine programming error (e.g. a
//! malformed condition grade) propagates as `RadarError`.

pub mod bundle;
pub mod headache;
pub mod maturity;
pub mod rotation;
pub mod seller_quality;
pub mod trend;
pub mod variant;
pub mod velocity;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{Config, CustomsRegime};
use crate::error::RadarResult;
use crate::money::condition::{map_condition, CardmarketGrade};
use crate::money::profit::{calculate_net_profit, ForwarderOptions, NetProfitBreakdown};
use crate::rotation_calendar::RotationRisk;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Variant,
    SellerQuality,
    Condition,
    Profit,
    Velocity,
    Trend,
    Maturity,
    Rotation,
    Headache,
    Bundle,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Variant => "variant",
            Self::SellerQuality => "seller_quality",
            Self::Condition => "condition",
            Self::Profit => "profit",
            Self::Velocity => "velocity",
            Self::Trend => "trend",
            Self::Maturity => "maturity",
            Self::Rotation => "rotation",
            Self::Headache => "headache",
            Self::Bundle => "bundle",
        }
    }
}

/// Tagged, non-error outcome of a rejected or suppressed candidate
/// (Section 7: stages 1-10 never raise for this).
#[derive(Debug, Clone)]
pub enum Rejection {
    CandidateRejected { stage: Stage, reason: String },
    ConditionSuppressed { reason: String },
}

impl Rejection {
    pub fn stage(&self) -> Stage {
        match self {
            Self::CandidateRejected { stage, .. } => *stage,
            Self::ConditionSuppressed { .. } => Stage::Condition,
        }
    }
}

/// Raw input gathered from the store before the pipeline runs.
pub struct Candidate {
    pub card_id: String,
    pub tcgplayer_id: Option<String>,
    pub cardmarket_id: Option<String>,
    pub seller_rating: Option<Decimal>,
    pub seller_sales: Option<i64>,
    pub cardmarket_condition: String,
    pub cm_price_eur: Decimal,
    pub tcg_price_usd: Decimal,
    pub forex_rate: Decimal,
    pub customs_regime: CustomsRegime,
    pub forwarder: ForwarderOptions,
    pub daily_sales: Decimal,
    pub price_trend_daily: Decimal,
    pub set_release_date: NaiveDate,
    pub reprint_rumored: bool,
    pub regulation_mark: Option<String>,
    pub legality_standard: bool,
    pub num_transactions: i64,
    pub seller_card_count: i64,
    pub reference_date: NaiveDate,
}

/// Everything a surviving candidate carries forward to the generator and
/// the audit snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub net_profit: NetProfitBreakdown,
    pub velocity_score: Decimal,
    pub velocity_tier: &'static str,
    pub trend_classification: &'static str,
    pub maturity_multiplier: Decimal,
    pub rotation_risk: &'static str,
    pub headache_score: Decimal,
    pub headache_tier: &'static str,
    pub bundle_sds: i64,
    pub bundle_tier: &'static str,
}

pub fn run_pipeline(candidate: &Candidate, config: &Config) -> RadarResult<Result<Evaluation, Rejection>> {
    if variant::validate_variant(
        candidate.tcgplayer_id.as_deref(),
        candidate.cardmarket_id.as_deref(),
    ) != variant::MATCH
    {
        return Ok(Err(Rejection::CandidateRejected {
            stage: Stage::Variant,
            reason: "variant mismatch".into(),
        }));
    }

    let (rating, sales) = match (candidate.seller_rating, candidate.seller_sales) {
        (Some(r), Some(s)) => (r, s),
        _ => match seller_quality::resolve_missing(config) {
            Some(pair) => pair,
            None => (config.min_seller_rating, config.min_seller_sales),
        },
    };
    if !seller_quality::check_seller_quality(rating, sales, config) {
        return Ok(Err(Rejection::CandidateRejected {
            stage: Stage::SellerQuality,
            reason: format!("seller below floor: rating={rating} sales={sales}"),
        }));
    }

    let grade: CardmarketGrade = match candidate.cardmarket_condition.parse() {
        Ok(g) => g,
        Err(_) => {
            return Ok(Err(Rejection::CandidateRejected {
                stage: Stage::Condition,
                reason: format!("unrecognized condition '{}'", candidate.cardmarket_condition),
            }))
        }
    };
    let condition = match map_condition(grade) {
        Ok(c) => c,
        Err(_) => {
            return Ok(Err(Rejection::ConditionSuppressed {
                reason: "PO has no TCGPlayer equivalent".into(),
            }))
        }
    };

    let net_profit = calculate_net_profit(
        candidate.cm_price_eur,
        candidate.tcg_price_usd,
        candidate.forex_rate,
        &condition,
        candidate.customs_regime,
        &candidate.forwarder,
        config,
    )?;
    if net_profit.net_profit <= Decimal::ZERO {
        return Ok(Err(Rejection::CandidateRejected {
            stage: Stage::Profit,
            reason: format!("net profit {} <= 0", net_profit.net_profit),
        }));
    }

    let (velocity_score, velocity_tier) = velocity::calculate_velocity_score(candidate.daily_sales, config)?;

    let (trend_classification, trend_suppress) =
        trend::classify_trend(velocity_score, candidate.price_trend_daily, config);
    if trend_suppress {
        return Ok(Err(Rejection::CandidateRejected {
            stage: Stage::Trend,
            reason: "falling knife: high velocity driven by price collapse".into(),
        }));
    }

    let base_decay = maturity::calculate_maturity_decay(candidate.set_release_date, candidate.reference_date, config);
    let maturity_multiplier = maturity::apply_reprint_penalty(
        base_decay,
        candidate.set_release_date,
        candidate.reprint_rumored,
        candidate.reference_date,
        config,
    );

    let (rotation_risk, rotation_reject) = rotation::evaluate(
        candidate.regulation_mark.as_deref(),
        candidate.legality_standard,
        candidate.reference_date,
    );
    if rotation_reject {
        return Ok(Err(Rejection::CandidateRejected {
            stage: Stage::Rotation,
            reason: format!("rotation risk {}", rotation_risk.as_str()),
        }));
    }

    let (headache_score, headache_tier) =
        headache::calculate_headache_score(net_profit.net_profit, candidate.num_transactions, config)?;

    let bundle = if config.enable_bundle_logic {
        bundle::calculate_seller_density_score(
            candidate.seller_card_count,
            candidate.tcg_price_usd,
            net_profit.net_profit,
            config,
        )
    } else {
        bundle::BundleResult {
            sds: candidate.seller_card_count,
            tier: bundle::BundleTier::SingleCard,
            suppress: false,
        }
    };
    if bundle.suppress {
        return Ok(Err(Rejection::CandidateRejected {
            stage: Stage::Bundle,
            reason: "single low-value listing not worth the trip".into(),
        }));
    }

    Ok(Ok(Evaluation {
        net_profit,
        velocity_score,
        velocity_tier: match velocity_tier {
            velocity::VelocityTier::Tier1 => "TIER_1",
            velocity::VelocityTier::Tier2 => "TIER_2",
            velocity::VelocityTier::Tier3 => "TIER_3",
        },
        trend_classification: trend_classification.as_str(),
        maturity_multiplier,
        rotation_risk: rotation_risk_label(rotation_risk),
        headache_score,
        headache_tier: match headache_tier {
            headache::HeadacheTier::Tier1 => "TIER_1",
            headache::HeadacheTier::Tier2 => "TIER_2",
            headache::HeadacheTier::Tier3 => "TIER_3",
        },
        bundle_sds: bundle.sds,
        bundle_tier: match bundle.tier {
            bundle::BundleTier::BundleAlert => "BUNDLE_ALERT",
            bundle::BundleTier::PartialBundle => "PARTIAL_BUNDLE",
            bundle::BundleTier::SingleCard => "SINGLE_CARD",
        },
    }))
}

fn rotation_risk_label(risk: RotationRisk) -> &'static str {
    risk.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cfg() -> Config {
        Config::from_env().expect("env config")
    }

    fn base_candidate() -> Candidate {
        Candidate {
            card_id: "sv1-25".into(),
            tcgplayer_id: Some("sv1-25".into()),
            cardmarket_id: Some("sv1-25".into()),
            seller_rating: Some(dec!(99.0)),
            seller_sales: Some(500),
            cardmarket_condition: "NM".into(),
            cm_price_eur: dec!(50.00),
            tcg_price_usd: dec!(120.00),
            forex_rate: dec!(1.08),
            customs_regime: CustomsRegime::PreJuly2026,
            forwarder: ForwarderOptions::none(),
            daily_sales: dec!(2.0),
            price_trend_daily: dec!(0.02),
            set_release_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            reprint_rumored: false,
            regulation_mark: Some("H".into()),
            legality_standard: true,
            num_transactions: 1,
            seller_card_count: 1,
            reference_date: NaiveDate::from_ymd_opt(2026, 2, 22).unwrap(),
        }
    }

    #[test]
    fn happy_path_survives_all_ten_stages() {
        let config = cfg();
        let result = run_pipeline(&base_candidate(), &config).unwrap();
        assert!(result.is_ok());
    }

    #[test]
    fn variant_mismatch_rejects_first() {
        let config = cfg();
        let mut candidate = base_candidate();
        candidate.cardmarket_id = Some("different".into());
        let result = run_pipeline(&candidate, &config).unwrap();
        let rejection = result.unwrap_err();
        assert_eq!(rejection.stage(), Stage::Variant);
    }

    #[test]
    fn poor_condition_is_suppressed_not_rejected() {
        let config = cfg();
        let mut candidate = base_candidate();
        candidate.cardmarket_condition = "PO".into();
        let result = run_pipeline(&candidate, &config).unwrap();
        assert!(matches!(result.unwrap_err(), Rejection::ConditionSuppressed { .. }));
    }

    #[test]
    fn danger_rotation_rejects() {
        let config = cfg();
        let mut candidate = base_candidate();
        candidate.regulation_mark = Some("G".into());
        candidate.reference_date = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        let result = run_pipeline(&candidate, &config).unwrap();
        let rejection = result.unwrap_err();
        assert_eq!(rejection.stage(), Stage::Rotation);
    }
}
