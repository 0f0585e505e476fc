//! Priority & Cascade Controller (Section 4.H).
//!
//! Orders subscribers for delivery priority and decides whether an
//! un-acted-on signal should be re-sent ("cascaded") after its cooldown,
//! up to a hard cascade limit, after which the subscriber is demoted to
//! the free tier rather than cascaded indefinitely.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rust_decimal::Decimal;
use std::time::Duration;

use crate::store::models::SubscriptionTier;

#[derive(Debug, Clone)]
pub struct SubscriberPriority {
    pub user_id: uuid::Uuid,
    pub tier: SubscriptionTier,
    pub engagement_score: Decimal,
    pub category_match: bool,
}

/// Descending sort key: tier rank, then engagement, then a category-match
/// bonus — shop > pro > trader > free, ties broken by engagement, then by
/// whether the candidate card falls in the subscriber's preferred
/// categories.
pub fn priority_rank(subscriber: &SubscriberPriority) -> (u8, Decimal, u8) {
    (
        subscriber.tier.rank(),
        subscriber.engagement_score,
        subscriber.category_match as u8,
    )
}

pub fn sort_by_priority(mut subscribers: Vec<SubscriberPriority>) -> Vec<SubscriberPriority> {
    subscribers.sort_by(|a, b| priority_rank(b).partial_cmp(&priority_rank(a)).expect("ranks are totally ordered"));
    subscribers
}

pub fn compute_cascade_available_at(expires_at: DateTime<Utc>, cooldown: Duration) -> DateTime<Utc> {
    expires_at + ChronoDuration::from_std(cooldown).unwrap_or_default()
}

/// Returns `(should_cascade, reason)`. A signal cascades only once it has
/// expired, sat through its cooldown, remains un-acted-on, and hasn't
/// already hit the cascade ceiling.
pub fn should_cascade(
    expires_at: DateTime<Utc>,
    acted_on: bool,
    cascade_count: i32,
    reference_time: DateTime<Utc>,
    cooldown: Duration,
    max_cascades: i32,
) -> (bool, &'static str) {
    if acted_on {
        return (false, "already acted on");
    }
    if cascade_count >= max_cascades {
        return (false, "cascade limit reached");
    }
    let available_at = compute_cascade_available_at(expires_at, cooldown);
    if reference_time < available_at {
        return (false, "cooldown not elapsed");
    }
    (true, "eligible")
}

/// Returns `(new_count, limit_reached)`.
pub fn increment_cascade_count(current_count: i32, max_cascades: i32) -> (i32, bool) {
    let new_count = current_count + 1;
    (new_count, new_count >= max_cascades)
}

/// A subscriber that has hit the cascade ceiling on a signal is demoted to
/// the free tier rather than cascaded indefinitely.
pub fn demote_if_limit_reached(tier: SubscriptionTier, limit_reached: bool) -> SubscriptionTier {
    if limit_reached {
        SubscriptionTier::Free
    } else {
        tier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn cascade_not_eligible_before_cooldown_elapses() {
        let expires_at = Utc::now();
        let cooldown = Duration::from_secs(10);
        let (eligible, _) = should_cascade(expires_at, false, 0, expires_at, cooldown, 5);
        assert!(!eligible);
    }

    #[test]
    fn cascade_eligible_after_cooldown_elapses() {
        let expires_at = Utc::now() - ChronoDuration::seconds(20);
        let cooldown = Duration::from_secs(10);
        let (eligible, _) = should_cascade(expires_at, false, 0, Utc::now(), cooldown, 5);
        assert!(eligible);
    }

    #[test]
    fn acted_on_signal_never_cascades() {
        let expires_at = Utc::now() - ChronoDuration::seconds(100);
        let cooldown = Duration::from_secs(10);
        let (eligible, reason) = should_cascade(expires_at, true, 0, Utc::now(), cooldown, 5);
        assert!(!eligible);
        assert_eq!(reason, "already acted on");
    }

    #[test]
    fn cascade_limit_stops_further_cascades() {
        let expires_at = Utc::now() - ChronoDuration::seconds(100);
        let cooldown = Duration::from_secs(10);
        let (eligible, reason) = should_cascade(expires_at, false, 5, Utc::now(), cooldown, 5);
        assert!(!eligible);
        assert_eq!(reason, "cascade limit reached");
    }

    #[test]
    fn demotes_to_free_tier_once_limit_hit() {
        let (_, limit_reached) = increment_cascade_count(4, 5);
        assert!(limit_reached);
        assert_eq!(demote_if_limit_reached(SubscriptionTier::Shop, limit_reached), SubscriptionTier::Free);
    }

    #[test]
    fn priority_sorts_shop_above_pro_above_trader_above_free() {
        let subs = vec![
            SubscriberPriority { user_id: uuid::Uuid::new_v4(), tier: SubscriptionTier::Free, engagement_score: dec!(9.0), category_match: true },
            SubscriberPriority { user_id: uuid::Uuid::new_v4(), tier: SubscriptionTier::Shop, engagement_score: dec!(1.0), category_match: false },
        ];
        let sorted = sort_by_priority(subs);
        assert_eq!(sorted[0].tier, SubscriptionTier::Shop);
    }
}
