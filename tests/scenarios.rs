//! Black-box scenarios exercising the rules engine, cascade controller,
//! and deep-link builder together the way a full signal scan would
//! chain them, without touching a live database.

use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;

use tcg_radar::cascade::{compute_cascade_available_at, should_cascade};
use tcg_radar::config::{Config, CustomsRegime};
use tcg_radar::deep_link::build_signal_urls;
use tcg_radar::money::profit::ForwarderOptions;
use tcg_radar::rules::{run_pipeline, Candidate, Rejection, Stage};

fn config() -> Config {
    Config::from_env().expect("default config loads from environment")
}

fn candidate(reference_date: NaiveDate) -> Candidate {
    Candidate {
        card_id: "sv3-125".into(),
        tcgplayer_id: Some("sv3-125".into()),
        cardmarket_id: Some("sv3-125".into()),
        seller_rating: Some(dec!(99.2)),
        seller_sales: Some(1200),
        cardmarket_condition: "NM".into(),
        cm_price_eur: dec!(45.00),
        tcg_price_usd: dec!(110.00),
        forex_rate: dec!(1.08),
        customs_regime: CustomsRegime::PreJuly2026,
        forwarder: ForwarderOptions::none(),
        daily_sales: dec!(2.5),
        price_trend_daily: dec!(0.01),
        set_release_date: NaiveDate::from_ymd_opt(2024, 3, 22).unwrap(),
        reprint_rumored: false,
        regulation_mark: Some("H".into()),
        legality_standard: true,
        num_transactions: 3,
        seller_card_count: 1,
        reference_date,
    }
}

#[test]
fn happy_path_produces_a_deliverable_signal_with_deep_links() {
    let config = config();
    let reference_date = NaiveDate::from_ymd_opt(2026, 2, 22).unwrap();
    let evaluation = run_pipeline(&candidate(reference_date), &config)
        .expect("pipeline runs without error")
        .expect("candidate survives all ten stages");

    assert!(evaluation.net_profit.net_profit > Decimal::ZERO);
    assert_eq!(evaluation.rotation_risk, "SAFE");

    let urls = build_signal_urls("Charizard ex", None, None);
    assert!(urls.tcgplayer_url.starts_with("https://www.tcgplayer.com/"));
    assert!(urls.cardmarket_url.starts_with("https://www.cardmarket.com/"));
}

#[test]
fn single_cheap_listing_with_no_profit_is_suppressed_by_bundle_stage() {
    let config = config();
    let reference_date = NaiveDate::from_ymd_opt(2026, 2, 22).unwrap();
    let mut c = candidate(reference_date);
    // Drive net profit to (near) zero via a deliberately thin spread so the
    // bundle stage's single-low-value-listing suppression actually fires.
    c.cm_price_eur = dec!(90.00);
    c.tcg_price_usd = dec!(95.00);
    c.seller_card_count = 1;

    let result = run_pipeline(&c, &config).expect("pipeline runs without error");
    // Either the profit stage rejects first (net_profit <= 0) or, if it
    // narrowly survives, the bundle stage suppresses a single cheap listing —
    // both are valid outcomes of a thin-margin single-card flip, and in
    // neither case does a signal get generated.
    assert!(result.is_err());
}

#[test]
fn rotation_danger_at_exactly_ninety_days_rejects_before_headache_or_bundle() {
    let config = config();
    // Mark "G" rotates 2026-04-10; reference date 90 days prior.
    let reference_date = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
    let mut c = candidate(reference_date);
    c.regulation_mark = Some("G".into());

    let rejection = run_pipeline(&c, &config)
        .expect("pipeline runs without error")
        .expect_err("a card 90 days from rotation should reject, not just warn");

    assert_eq!(rejection.stage(), Stage::Rotation);
    match rejection {
        Rejection::CandidateRejected { reason, .. } => assert!(reason.contains("DANGER")),
        other => panic!("expected CandidateRejected, got {other:?}"),
    }
}

#[test]
fn per_user_profit_threshold_filters_below_shop_tier_minimum() {
    let config = config();
    let reference_date = NaiveDate::from_ymd_opt(2026, 2, 22).unwrap();
    let evaluation = run_pipeline(&candidate(reference_date), &config)
        .expect("pipeline runs without error")
        .expect("candidate survives the pipeline");

    // A free-tier user's higher threshold should reject a signal a
    // shop-tier user (threshold $5) would happily see.
    let shop_tier_threshold = dec!(5.00);
    let demanding_free_tier_threshold = evaluation.net_profit.net_profit + dec!(1000.00);

    assert!(evaluation.net_profit.net_profit >= shop_tier_threshold);
    assert!(evaluation.net_profit.net_profit < demanding_free_tier_threshold);
}

#[test]
fn cascade_fires_once_cooldown_elapses_after_expiry() {
    let cooldown = Duration::from_secs(600);
    let expires_at = Utc::now() - ChronoDuration::seconds(601);
    let available_at = compute_cascade_available_at(expires_at, cooldown);
    assert!(available_at <= Utc::now());

    let (eligible, reason) = should_cascade(expires_at, false, 1, Utc::now(), cooldown, 5);
    assert!(eligible, "reason was: {reason}");
}

#[test]
fn cascade_does_not_fire_for_an_already_acted_on_signal_even_past_cooldown() {
    let cooldown = Duration::from_secs(600);
    let expires_at = Utc::now() - ChronoDuration::hours(2);
    let (eligible, reason) = should_cascade(expires_at, true, 0, Utc::now(), cooldown, 5);
    assert!(!eligible);
    assert_eq!(reason, "already acted on");
}
