//! Periodic Orchestrator (Section 4.F).
//!
//! A single top-level scheduler task drives per-source polls and the
//! signal scan on independent cadences, isolating one source's failure
//! from its siblings, with graceful shutdown on a cancellation signal.
//! Grounded in the distilled original's `Scheduler.run` loop: a 5-second
//! tick, `tokio::select!` standing in for `asyncio.wait_for`.

pub mod cadence;
pub mod sources;

use std::sync::Arc;

use parking_lot::Mutex;
use sqlx::PgPool;
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::generator::SignalGenerator;

use cadence::{CadenceOverrides, SourceClock};
use sources::{poll_with_backoff, PriceSource, SourceSlot};

/// Cloneable handle for triggering a cadence boost from outside the
/// orchestrator's own task — the admin router holds one of these rather
/// than the orchestrator itself, since `run` consumes `self`.
#[derive(Clone)]
pub struct CadenceHandle(Arc<Mutex<CadenceOverrides>>);

impl CadenceHandle {
    pub fn boost(&self, card_id: &str) {
        self.0.lock().boost(card_id);
        info!(card_id, "cadence_boosted");
    }
}

pub struct Orchestrator {
    pool: PgPool,
    config: Arc<Config>,
    generator: SignalGenerator,
    slots: Vec<(SourceSlot, SourceClock)>,
    cadence_overrides: Arc<Mutex<CadenceOverrides>>,
    signal_scan_clock: SourceClock,
    shutdown: Arc<Notify>,
}

impl Orchestrator {
    pub fn new(pool: PgPool, config: Arc<Config>, generator: SignalGenerator, slots: Vec<SourceSlot>) -> Self {
        let signal_scan_clock = SourceClock::new(config.signal_scan_interval);
        let cadence_overrides = Arc::new(Mutex::new(CadenceOverrides::new(
            config.cadence_override_duration,
            config.cadence_override_interval,
        )));
        let slots = slots
            .into_iter()
            .map(|slot| {
                let interval = match slot.tag() {
                    PriceSource::BuySide => config.buy_side_poll_interval,
                    PriceSource::SellSide => config.sell_side_poll_interval,
                    PriceSource::Velocity => config.velocity_poll_interval,
                    PriceSource::ExtraUs => config.metadata_poll_interval,
                };
                (slot, SourceClock::new(interval))
            })
            .collect();
        Self {
            pool,
            config,
            generator,
            slots,
            cadence_overrides,
            signal_scan_clock,
            shutdown: Arc::new(Notify::new()),
        }
    }

    pub fn shutdown_handle(&self) -> Arc<Notify> {
        self.shutdown.clone()
    }

    pub fn cadence_handle(&self) -> CadenceHandle {
        CadenceHandle(self.cadence_overrides.clone())
    }

    pub async fn run(mut self) {
        info!("orchestrator_started");
        let tick = self.config.orchestrator_tick_interval;
        loop {
            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("orchestrator_shutdown");
                    break;
                }
                _ = tokio::time::sleep(tick) => {
                    self.tick().await;
                }
            }
        }
    }

    async fn tick(&mut self) {
        for (slot, clock) in self.slots.iter_mut() {
            let effective = self.cadence_overrides.lock().effective_interval(clock.base_interval());
            if !clock.is_due(effective) {
                continue;
            }
            let label = slot.tag().label();
            // Job isolation: one source's failure never aborts siblings.
            match poll_with_backoff(slot).await {
                Ok(count) => debug!(source = label, count, "source_polled"),
                Err(e) => warn!(source = label, error = %e, "source_poll_failed"),
            }
            clock.mark_polled();
        }

        if self.signal_scan_clock.is_due(self.config.signal_scan_interval) {
            match self.generator.run_scan(&self.pool).await {
                Ok(delivered) => info!(delivered, "signal_scan_complete"),
                Err(e) => error!(error = %e, "signal_scan_failed"),
            }
            self.signal_scan_clock.mark_polled();
        }
    }
}
