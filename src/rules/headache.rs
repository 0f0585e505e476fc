//! Stage 9: headache score (Section 4.B).
//!
//! Converts net profit into a per-transaction effort score so a $500
//! profit split across 20 shipments doesn't outrank a $50 profit on one.

use rust_decimal::Decimal;

use crate::config::Config;
use crate::error::{RadarError, RadarResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadacheTier {
    Tier1,
    Tier2,
    Tier3,
}

pub fn calculate_headache_score(net_profit: Decimal, num_transactions: i64, config: &Config) -> RadarResult<(Decimal, HeadacheTier)> {
    if num_transactions <= 0 {
        return Err(RadarError::invalid("num_transactions must be positive"));
    }
    let per_transaction = (net_profit / Decimal::from(num_transactions)).round_dp(2);
    let tier = if per_transaction >= config.headache_tier1_floor {
        HeadacheTier::Tier1
    } else if per_transaction >= config.headache_tier2_floor {
        HeadacheTier::Tier2
    } else {
        HeadacheTier::Tier3
    };
    Ok((per_transaction, tier))
}
