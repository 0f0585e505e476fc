//! Per-source cadence tracking and cadence-override ("boost") map
//! (Section 4.F, supplemented from the distilled original's
//! `Scheduler._should_poll_justtcg`).
//!
//! A boost temporarily shortens a card's effective poll interval in
//! response to an external trigger (social spike, synergy event) and
//! reverts automatically after a fixed window. Expired boosts are pruned
//! lazily, on the next cadence check — exactly the original's behavior.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Tracks the last poll time for one source and answers "is it due".
pub struct SourceClock {
    interval: Duration,
    last_poll: Option<Instant>,
}

impl SourceClock {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_poll: None }
    }

    pub fn is_due(&self, effective_interval: Duration) -> bool {
        match self.last_poll {
            None => true,
            Some(last) => last.elapsed() >= effective_interval,
        }
    }

    pub fn mark_polled(&mut self) {
        self.last_poll = Some(Instant::now());
    }

    pub fn base_interval(&self) -> Duration {
        self.interval
    }
}

/// Cadence overrides keyed by card id, each with its own revert deadline.
#[derive(Default)]
pub struct CadenceOverrides {
    boosts: HashMap<String, Instant>,
    revert_after: Duration,
    boosted_interval: Duration,
}

impl CadenceOverrides {
    pub fn new(revert_after: Duration, boosted_interval: Duration) -> Self {
        Self {
            boosts: HashMap::new(),
            revert_after,
            boosted_interval,
        }
    }

    pub fn boost(&mut self, card_id: &str) {
        self.boosts.insert(card_id.to_string(), Instant::now() + self.revert_after);
    }

    /// Prunes expired boosts and returns whether any boost is currently
    /// active — used to shorten the whole source's effective interval
    /// exactly as the original scheduler does (a single active spike
    /// lowers the cadence for the whole poll, not per-card).
    pub fn prune_and_any_active(&mut self) -> bool {
        let now = Instant::now();
        self.boosts.retain(|_, revert_at| *revert_at > now);
        !self.boosts.is_empty()
    }

    pub fn effective_interval(&mut self, base: Duration) -> Duration {
        if self.prune_and_any_active() {
            self.boosted_interval.min(base)
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_due_on_first_check() {
        let clock = SourceClock::new(Duration::from_secs(60));
        assert!(clock.is_due(Duration::from_secs(60)));
    }

    #[test]
    fn clock_is_not_due_immediately_after_poll() {
        let mut clock = SourceClock::new(Duration::from_secs(60));
        clock.mark_polled();
        assert!(!clock.is_due(Duration::from_secs(60)));
    }

    #[test]
    fn boost_shortens_effective_interval_until_it_expires() {
        let mut overrides = CadenceOverrides::new(Duration::from_millis(20), Duration::from_secs(1));
        overrides.boost("sv1-25");
        assert_eq!(overrides.effective_interval(Duration::from_secs(600)), Duration::from_secs(1));
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(overrides.effective_interval(Duration::from_secs(600)), Duration::from_secs(600));
    }
}
