//! Synergy co-occurrence tracking (Section 9, supplemented).
//!
//! Full synergy-graph construction is out of scope (Section 1); this is
//! the narrow slice the design note calls for — an unordered-pair map
//! with counts, not a graph type, so two cards that are frequently bought
//! together can be looked up without building adjacency lists nobody
//! else needs.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct UnorderedPair(String, String);

impl UnorderedPair {
    fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }
}

#[derive(Debug, Default)]
pub struct SynergyCooccurrence {
    counts: HashMap<UnorderedPair, u64>,
}

impl SynergyCooccurrence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cooccurrence(&mut self, card_a: &str, card_b: &str) {
        if card_a == card_b {
            return;
        }
        *self.counts.entry(UnorderedPair::new(card_a, card_b)).or_insert(0) += 1;
    }

    pub fn get_count(&self, card_a: &str, card_b: &str) -> u64 {
        self.counts.get(&UnorderedPair::new(card_a, card_b)).copied().unwrap_or(0)
    }
}
