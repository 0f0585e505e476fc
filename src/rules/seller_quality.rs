//! Stage 2: seller quality floor (Section 5).

use rust_decimal::Decimal;

use crate::config::{Config, SellerQualityDefaultPolicy};

pub fn check_seller_quality(rating: Decimal, sale_count: i64, config: &Config) -> bool {
    rating >= config.min_seller_rating && sale_count >= config.min_seller_sales
}

/// When scraped seller data is absent, apply the configured policy
/// (Section 9 open question) rather than guessing. Returns `None` when the
/// stage should be skipped entirely for this candidate.
pub fn resolve_missing(config: &Config) -> Option<(Decimal, i64)> {
    match config.seller_quality_default_policy {
        SellerQualityDefaultPolicy::UseDefault { rating, sales } => {
            let rating: Decimal = rating.parse().expect("static default parses");
            Some((rating, sales as i64))
        }
        SellerQualityDefaultPolicy::SkipStage => None,
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
    fn passes_at_exact_thresholds() {
        let config = cfg();
        assert!(check_seller_quality(dec!(97.0), 100, &config));
    }

    #[test]
    fn fails_below_rating_floor() {
        let config = cfg();
        assert!(!check_seller_quality(dec!(96.9), 500, &config));
    }

    #[test]
    fn fails_below_sales_floor() {
        let config = cfg();
        assert!(!check_seller_quality(dec!(99.0), 99, &config));
    }

    #[test]
    fn default_policy_resolves_to_a_passing_pair() {
        let config = cfg();
        if let Some((rating, sales)) = resolve_missing(&config) {
            assert!(check_seller_quality(rating, sales, &config));
        }
    }
}
