//! Stage 10: seller density score / bundle logic (Section 4.B).
//!
//! A seller with many matching listings is either a bulk-bundle
//! opportunity (buy several at once) or, for a single cheap low-profit
//! card, a reason to suppress — not worth the shipping round trip alone.

use rust_decimal::Decimal;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleTier {
    BundleAlert,
    PartialBundle,
    SingleCard,
}

#[derive(Debug, Clone, Copy)]
pub struct BundleResult {
    pub sds: i64,
    pub tier: BundleTier,
    pub suppress: bool,
}

pub fn calculate_seller_density_score(
    seller_card_count: i64,
    card_price_usd: Decimal,
    net_profit: Decimal,
    config: &Config,
) -> BundleResult {
    let sds = seller_card_count.max(0);

    let tier = if sds >= config.sds_bundle_alert {
        BundleTier::BundleAlert
    } else if sds >= config.sds_partial_min {
        BundleTier::PartialBundle
    } else {
        BundleTier::SingleCard
    };

    let suppress = sds <= config.sds_single
        && card_price_usd < config.bundle_single_card_threshold
        && net_profit <= Decimal::ZERO;

    BundleResult { sds, tier, suppress }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cfg() -> Config {
        Config::from_env().expect("env config")
    }

    #[test]
    fn many_listings_is_bundle_alert() {
        let config = cfg();
        let result = calculate_seller_density_score(6, dec!(10.00), dec!(5.00), &config);
        assert_eq!(result.tier, BundleTier::BundleAlert);
        assert!(!result.suppress);
    }

    #[test]
    fn single_cheap_unprofitable_card_is_suppressed() {
        let config = cfg();
        let result = calculate_seller_density_score(1, dec!(10.00), dec!(-1.00), &config);
        assert_eq!(result.tier, BundleTier::SingleCard);
        assert!(result.suppress);
    }

    #[test]
    fn single_card_above_threshold_price_is_not_suppressed() {
        let config = cfg();
        let result = calculate_seller_density_score(1, dec!(50.00), dec!(-1.00), &config);
        assert!(!result.suppress);
    }

    #[test]
    fn single_card_with_profit_is_not_suppressed() {
        let config = cfg();
        let result = calculate_seller_density_score(1, dec!(10.00), dec!(5.00), &config);
        assert!(!result.suppress);
    }
}
