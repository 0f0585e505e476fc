//! Net-profit composition (Section 4.A) — stage 4 of the rules engine.
//!
//! Pulls together forex, condition mapping, platform fees, customs and
//! (optionally) forwarder costs into a single breakdown. This is the
//! single source of truth for "what does this flip actually pay".

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{Config, CustomsRegime};
use crate::error::{RadarError, RadarResult};

use super::condition::ConditionMapping;
use super::fees::{calculate_platform_fees, Platform};
use super::forex::{convert_eur_to_usd, convert_usd_to_eur};
use super::customs::calculate_customs;

#[derive(Debug, Clone, Serialize)]
pub struct NetProfitBreakdown {
    pub revenue: Decimal,
    pub cogs_usd: Decimal,
    pub tcg_fees: Decimal,
    pub customs: Decimal,
    pub shipping: Decimal,
    pub forwarder_costs: Decimal,
    pub net_profit: Decimal,
    pub margin_pct: Decimal,
}

pub struct ForwarderOptions {
    pub use_forwarder: bool,
    pub receiving_fee: Decimal,
    pub consolidation_fee: Decimal,
    pub insurance_rate: Decimal,
}

impl ForwarderOptions {
    pub fn none() -> Self {
        Self {
            use_forwarder: false,
            receiving_fee: Decimal::ZERO,
            consolidation_fee: Decimal::ZERO,
            insurance_rate: Decimal::ZERO,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            use_forwarder: true,
            receiving_fee: config.default_forwarder_receiving_fee,
            consolidation_fee: config.default_forwarder_consolidation_fee,
            insurance_rate: config.default_insurance_rate,
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn calculate_net_profit(
    cm_price_eur: Decimal,
    tcg_price_usd: Decimal,
    forex_rate: Decimal,
    condition: &ConditionMapping,
    customs_regime: CustomsRegime,
    forwarder: &ForwarderOptions,
    config: &Config,
) -> RadarResult<NetProfitBreakdown> {
    if cm_price_eur < Decimal::ZERO || tcg_price_usd < Decimal::ZERO {
        return Err(RadarError::invalid("prices must be non-negative"));
    }

    let adjusted_sell = (tcg_price_usd * condition.multiplier).round_dp(2);
    let cogs_usd = convert_eur_to_usd(cm_price_eur, forex_rate, config.default_forex_buffer)?;
    let tcg_fees = calculate_platform_fees(adjusted_sell, Platform::TcgPlayer, config)?;
    let customs = calculate_customs(cogs_usd, customs_regime, forex_rate, config)?;
    let shipping = config.shipping_cost_usd;
    let revenue = (adjusted_sell - tcg_fees).round_dp(2);

    let forwarder_costs = if forwarder.use_forwarder {
        let insurance_eur = cm_price_eur * forwarder.insurance_rate;
        let insurance_usd = convert_eur_to_usd(insurance_eur, forex_rate, config.default_forex_buffer)?;
        (forwarder.receiving_fee + forwarder.consolidation_fee + insurance_usd).round_dp(2)
    } else {
        Decimal::ZERO
    };

    let net_profit = (revenue - cogs_usd - customs - shipping - forwarder_costs).round_dp(2);
    let margin_pct = if revenue > Decimal::ZERO {
        (net_profit / revenue * Decimal::ONE_HUNDRED).round_dp(2)
    } else {
        Decimal::ZERO
    };

    Ok(NetProfitBreakdown {
        revenue,
        cogs_usd,
        tcg_fees,
        customs,
        shipping,
        forwarder_costs,
        net_profit,
        margin_pct,
    })
}

/// Used by display/audit paths that need the cost side expressed in EUR.
pub fn cogs_eur_equivalent(cogs_usd: Decimal, forex_rate: Decimal, buffer: Decimal) -> RadarResult<Decimal> {
    convert_usd_to_eur(cogs_usd, forex_rate, buffer)
}
