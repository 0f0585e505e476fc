//! Customs/duty calculation per import regime (Section 4.A).

use rust_decimal::Decimal;

use crate::config::{Config, CustomsRegime};
use crate::error::{RadarError, RadarResult};

use super::forex::convert_eur_to_usd;

/// `cogs_usd` is the cost-of-goods-sold in USD (the buy-side price already
/// converted). `forex_rate` is needed because the EU/post-reform flat duty
/// is quoted in EUR and must be converted before it's added to a USD total.
/// Returns the duty/VAT cost to add to the cost stack; never negative.
pub fn calculate_customs(
    cogs_usd: Decimal,
    regime: CustomsRegime,
    forex_rate: Decimal,
    config: &Config,
) -> RadarResult<Decimal> {
    if cogs_usd < Decimal::ZERO {
        return Err(RadarError::invalid("cogs_usd must be non-negative"));
    }
    let duty = match regime {
        CustomsRegime::DeMinimis | CustomsRegime::PreJuly2026 => {
            if cogs_usd < config.us_de_minimis_usd {
                Decimal::ZERO
            } else {
                cogs_usd * config.us_customs_standard_rate
            }
        }
        CustomsRegime::IossEu | CustomsRegime::PostJuly2026 => {
            // De minimis repealed under the post-reform regime: same 21%
            // VAT + flat duty formula as the existing IOSS EU arrangement.
            let flat_duty_usd = convert_eur_to_usd(config.eu_customs_flat_duty_eur, forex_rate, config.default_forex_buffer)?;
            cogs_usd * config.eu_vat_rate + flat_duty_usd
        }
        CustomsRegime::UkLowValue => {
            if cogs_usd > config.uk_low_value_threshold_usd {
                cogs_usd * config.uk_vat_rate
            } else {
                Decimal::ZERO
            }
        }
    };
    Ok(duty.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cfg() -> Config {
        Config::from_env().expect("env config")
    }

    #[test]
    fn de_minimis_is_free_under_threshold() {
        let config = cfg();
        let duty = calculate_customs(dec!(700.00), CustomsRegime::DeMinimis, dec!(1.08), &config).unwrap();
        assert_eq!(duty, Decimal::ZERO);
    }

    #[test]
    fn de_minimis_charges_standard_rate_above_threshold() {
        let config = cfg();
        let duty = calculate_customs(dec!(900.00), CustomsRegime::DeMinimis, dec!(1.08), &config).unwrap();
        assert_eq!(duty, dec!(22.50));
    }

    #[test]
    fn de_minimis_boundary_is_strict_less_than() {
        let config = cfg();
        // Exactly at the threshold: spec boundary is strict `<`, so $800.00
        // itself already charges duty rather than sliding in free.
        let duty = calculate_customs(dec!(800.00), CustomsRegime::DeMinimis, dec!(1.08), &config).unwrap();
        assert_eq!(duty, dec!(20.00));
    }

    #[test]
    fn post_july_2026_charges_eu_vat_plus_converted_flat_duty() {
        let config = cfg();
        let duty = calculate_customs(dec!(10.00), CustomsRegime::PostJuly2026, dec!(1.08), &config).unwrap();
        // 10.00 * 0.21 = 2.10; flat duty EUR 3.00 -> USD at (1.08 * 1.02) = 3.30.
        assert_eq!(duty, dec!(5.40));
    }

    #[test]
    fn ioss_eu_matches_post_july_2026_formula() {
        let config = cfg();
        let duty = calculate_customs(dec!(10.00), CustomsRegime::IossEu, dec!(1.08), &config).unwrap();
        assert_eq!(duty, dec!(5.40));
    }

    #[test]
    fn uk_low_value_is_free_at_or_under_threshold() {
        let config = cfg();
        let duty = calculate_customs(dec!(135.00), CustomsRegime::UkLowValue, dec!(1.08), &config).unwrap();
        assert_eq!(duty, Decimal::ZERO);
    }

    #[test]
    fn uk_low_value_charges_vat_with_no_flat_duty_above_threshold() {
        let config = cfg();
        let duty = calculate_customs(dec!(200.00), CustomsRegime::UkLowValue, dec!(1.08), &config).unwrap();
        assert_eq!(duty, dec!(40.00));
    }

    #[test]
    fn negative_cogs_rejected() {
        let config = cfg();
        assert!(calculate_customs(dec!(-1), CustomsRegime::DeMinimis, dec!(1.08), &config).is_err());
    }
}
