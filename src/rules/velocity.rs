//! Stage 5: velocity score (Section 4.B).

use rust_decimal::Decimal;

use crate::config::Config;
use crate::error::{RadarError, RadarResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelocityTier {
    Tier1,
    Tier2,
    Tier3,
}

pub fn calculate_velocity_score(daily_sales: Decimal, config: &Config) -> RadarResult<(Decimal, VelocityTier)> {
    if daily_sales < Decimal::ZERO {
        return Err(RadarError::invalid("daily_sales must be non-negative"));
    }
    if config.velocity_tier2_floor >= config.velocity_tier1_floor {
        return Err(RadarError::invalid("velocity tier floors misconfigured"));
    }

    let tier = if daily_sales > config.velocity_tier1_floor {
        VelocityTier::Tier1
    } else if daily_sales > config.velocity_tier2_floor {
        VelocityTier::Tier2
    } else {
        VelocityTier::Tier3
    };

    Ok((daily_sales, tier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cfg() -> Config {
        Config::from_env().expect("env config")
    }

    #[test]
    fn high_velocity_is_tier1() {
        let config = cfg();
        let (_, tier) = calculate_velocity_score(dec!(2.0), &config).unwrap();
        assert_eq!(tier, VelocityTier::Tier1);
    }

    #[test]
    fn mid_velocity_is_tier2() {
        let config = cfg();
        let (_, tier) = calculate_velocity_score(dec!(1.0), &config).unwrap();
        assert_eq!(tier, VelocityTier::Tier2);
    }

    #[test]
    fn low_velocity_is_tier3() {
        let config = cfg();
        let (_, tier) = calculate_velocity_score(dec!(0.1), &config).unwrap();
        assert_eq!(tier, VelocityTier::Tier3);
    }

    #[test]
    fn negative_sales_rejected() {
        let config = cfg();
        assert!(calculate_velocity_score(dec!(-1), &config).is_err());
    }
}
