//! Stage 6: trend classification (Section 4.B).
//!
//! Distinct from `trend_analyzer` (which computes the raw regression
//! slope): this stage classifies an already-computed slope plus the
//! velocity score into one of four regimes, and flags the "falling knife"
//! case for suppression.

use rust_decimal::Decimal;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendClassification {
    Momentum,
    Liquidation,
    Stable,
    Declining,
}

impl TrendClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Momentum => "MOMENTUM",
            Self::Liquidation => "LIQUIDATION",
            Self::Stable => "STABLE",
            Self::Declining => "DECLINING",
        }
    }
}

/// Returns `(classification, suppress)`. `suppress` is true only for the
/// falling-knife case: high velocity driven by a price collapse rather
/// than genuine demand.
pub fn classify_trend(velocity_score: Decimal, price_trend_daily: Decimal, config: &Config) -> (TrendClassification, bool) {
    let high_velocity = velocity_score >= config.velocity_tier1_floor;
    let falling_price = price_trend_daily <= config.falling_knife_threshold;

    match (high_velocity, falling_price) {
        (true, true) => (TrendClassification::Liquidation, true),
        (true, false) => (TrendClassification::Momentum, false),
        (false, true) => (TrendClassification::Declining, false),
        (false, false) => (TrendClassification::Stable, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cfg() -> Config {
        Config::from_env().expect("env config")
    }

    #[test]
    fn high_velocity_with_falling_price_is_suppressed_liquidation() {
        let config = cfg();
        let (class, suppress) = classify_trend(dec!(2.0), dec!(-0.15), &config);
        assert_eq!(class, TrendClassification::Liquidation);
        assert!(suppress);
    }

    #[test]
    fn high_velocity_with_rising_price_is_momentum() {
        let config = cfg();
        let (class, suppress) = classify_trend(dec!(2.0), dec!(0.05), &config);
        assert_eq!(class, TrendClassification::Momentum);
        assert!(!suppress);
    }

    #[test]
    fn low_velocity_with_falling_price_is_declining_not_suppressed() {
        let config = cfg();
        let (class, suppress) = classify_trend(dec!(0.1), dec!(-0.15), &config);
        assert_eq!(class, TrendClassification::Declining);
        assert!(!suppress);
    }

    #[test]
    fn low_velocity_flat_price_is_stable() {
        let config = cfg();
        let (class, suppress) = classify_trend(dec!(0.1), dec!(0.0), &config);
        assert_eq!(class, TrendClassification::Stable);
        assert!(!suppress);
    }
}
