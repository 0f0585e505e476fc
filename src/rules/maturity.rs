//! Stage 7: maturity decay (Section 4.B).
//!
//! Fresh sets carry hype premiums that fade on a predictable schedule;
//! older sets get discounted further if a reprint is rumored.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::Config;

pub fn calculate_maturity_decay(set_release_date: NaiveDate, reference_date: NaiveDate, config: &Config) -> Decimal {
    let age_days = (reference_date - set_release_date).num_days();
    if age_days < 0 {
        // Pre-release / data skew: treat as freshest band rather than error.
        return config.maturity_decay_30d;
    }
    if age_days < 30 {
        config.maturity_decay_30d
    } else if age_days < 60 {
        config.maturity_decay_60d
    } else if age_days < 90 {
        config.maturity_decay_90d
    } else {
        config.maturity_decay_old
    }
}

pub fn apply_reprint_penalty(
    base_decay: Decimal,
    set_release_date: NaiveDate,
    reprint_rumored: bool,
    reference_date: NaiveDate,
    config: &Config,
) -> Decimal {
    let age_days = (reference_date - set_release_date).num_days();
    if reprint_rumored && age_days > 60 {
        (base_decay * config.maturity_reprint_rumor_penalty).round_dp(2)
    } else {
        base_decay
    }
}
