//! EUR/USD conversion (Section 4.A).
//!
//! Conversion is deliberately pessimistic in both directions: a buffer is
//! applied against the caller regardless of which way money moves, so the
//! rules engine never overstates profit because of a favorable quote.

use parking_lot::RwLock;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::{Duration, Instant};

use crate::error::{RadarError, RadarResult};

/// Buffer the quoted rate against the caller: `rate * (1 + buffer)` when
/// converting EUR -> USD (we pay more USD per EUR than the mid rate), and
/// divide by the same buffered rate when converting USD -> EUR (we get
/// fewer EUR per USD). Both directions lean the same way: worse for us.
pub fn convert_eur_to_usd(amount_eur: Decimal, rate: Decimal, buffer: Decimal) -> RadarResult<Decimal> {
    if amount_eur < Decimal::ZERO {
        return Err(RadarError::invalid("amount_eur must be non-negative"));
    }
    if rate <= Decimal::ZERO {
        return Err(RadarError::invalid("rate must be positive"));
    }
    let buffered_rate = rate * (Decimal::ONE + buffer);
    Ok((amount_eur * buffered_rate).round_dp(2))
}

pub fn convert_usd_to_eur(amount_usd: Decimal, rate: Decimal, buffer: Decimal) -> RadarResult<Decimal> {
    if amount_usd < Decimal::ZERO {
        return Err(RadarError::invalid("amount_usd must be non-negative"));
    }
    if rate <= Decimal::ZERO {
        return Err(RadarError::invalid("rate must be positive"));
    }
    let buffered_rate = rate * (Decimal::ONE + buffer);
    Ok((amount_usd / buffered_rate).round_dp(2))
}

/// Live rate with a static fallback and a TTL, so a source outage degrades
/// to a slightly stale (or static) rate rather than blocking the pipeline.
pub struct ForexCache {
    static_rate: Decimal,
    ttl: Duration,
    inner: RwLock<Option<(Decimal, Instant)>>,
}

impl ForexCache {
    pub fn new(static_rate: Decimal, ttl: Duration) -> Self {
        Self {
            static_rate,
            ttl,
            inner: RwLock::new(None),
        }
    }

    /// Returns the cached rate if still fresh, else the static fallback.
    pub fn current_rate(&self) -> Decimal {
        if let Some((rate, fetched_at)) = *self.inner.read() {
            if fetched_at.elapsed() < self.ttl {
                return rate;
            }
        }
        self.static_rate
    }

    pub fn update(&self, rate: Decimal) {
        *self.inner.write() = Some((rate, Instant::now()));
    }
}

impl Default for ForexCache {
    fn default() -> Self {
        Self::new(dec!(1.08), Duration::from_secs(900))
    }
}
