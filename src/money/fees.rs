//! Platform fee formulas (Section 4.A).

use rust_decimal::Decimal;

use crate::config::Config;
use crate::error::{RadarError, RadarResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    TcgPlayer,
    Ebay,
    Cardmarket,
}

/// `TCGPlayer`: `min(price * rate, fee_cap) + fixed` — the cap binds only
/// the percentage portion, so the true maximum fee is `fee_cap + fixed`.
/// `eBay`: flat `price * rate`.
/// `Cardmarket`: Pro seller flat `price * rate` (non-Pro sellers pay no
/// listing fee on Cardmarket and are out of scope for fee calculation).
pub fn calculate_platform_fees(price: Decimal, platform: Platform, config: &Config) -> RadarResult<Decimal> {
    if price < Decimal::ZERO {
        return Err(RadarError::invalid("price must be non-negative"));
    }
    let fee = match platform {
        Platform::TcgPlayer => {
            let pct = (price * config.tcgplayer_fee_rate).min(config.tcgplayer_fee_cap);
            pct + config.tcgplayer_fixed_fee
        }
        Platform::Ebay => price * config.ebay_fee_rate,
        Platform::Cardmarket => price * config.cardmarket_pro_fee_rate,
    };
    Ok(fee.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cfg() -> Config {
        Config::from_env().expect("env config")
    }

    #[test]
    fn tcgplayer_fee_is_rate_plus_fixed() {
        let config = cfg();
        let fee = calculate_platform_fees(dec!(100.00), Platform::TcgPlayer, &config).unwrap();
        assert_eq!(fee, dec!(11.05)); // 100*0.1075 + 0.30
    }

    #[test]
    fn tcgplayer_fee_caps_on_expensive_cards() {
        let config = cfg();
        let fee = calculate_platform_fees(dec!(5000.00), Platform::TcgPlayer, &config).unwrap();
        // Only the percentage portion is capped; the fixed fee still applies
        // on top, so the true ceiling is cap + fixed, not cap alone.
        assert_eq!(fee, config.tcgplayer_fee_cap + config.tcgplayer_fixed_fee);
    }

    #[test]
    fn negative_price_rejected() {
        let config = cfg();
        assert!(calculate_platform_fees(dec!(-1), Platform::Ebay, &config).is_err());
    }
}
