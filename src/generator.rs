//! Signal Generator (Section 4.G).
//!
//! Runs a per-user scan: every user sees the same candidate pool pushed
//! through the same ten-stage pipeline, but with that user's own
//! thresholds and forwarder settings, so a shop-tier subscriber's
//! lower `min_profit_threshold` surfaces flips a free-tier user never
//! sees.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use metrics::counter;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::Config;
use crate::deep_link::build_signal_urls;
use crate::error::RadarResult;
use crate::notify::{Notifier, SignalMessage};
use crate::rules::{run_pipeline, Rejection};
use crate::store::candidates::{build_candidate, cards_with_both_sides, profitable_counts_by_seller};
use crate::store::signals::insert_signal;
use crate::store::tenancy::TenantId;
use crate::store::users::active_profiles;
use crate::store::{audit, signals};

pub struct SignalGenerator {
    config: Arc<Config>,
    notifier: Arc<dyn Notifier>,
}

struct ScoredSignal {
    card_id: String,
    card_name: String,
    cm_price_eur: Decimal,
    tcg_price_usd: Decimal,
    condition: String,
    net_profit: Decimal,
    tcgplayer_url: String,
    cardmarket_url: String,
    evaluation: crate::rules::Evaluation,
    source_prices: serde_json::Value,
}

impl SignalGenerator {
    pub fn new(config: Arc<Config>, notifier: Arc<dyn Notifier>) -> Self {
        Self { config, notifier }
    }

    /// Scans every user against the candidate pool, persists surviving
    /// signals, and delivers them. Returns the number of messages
    /// delivered across all users.
    pub async fn run_scan(&self, pool: &PgPool) -> RadarResult<usize> {
        let candidates = cards_with_both_sides(pool).await?;
        let profiles = active_profiles(pool).await?;
        info!(candidates = candidates.len(), users = profiles.len(), "signal_scan_started");

        let mut delivered = 0;
        for profile in &profiles {
            let tenant = TenantId::new(profile.user_id);
            let mut scored = Vec::new();
            let seller_counts = profitable_counts_by_seller(&candidates, profile, &self.config);

            for (card, cm, tcg) in &candidates {
                let seller_card_count = cm
                    .seller_id
                    .as_ref()
                    .and_then(|id| seller_counts.get(id))
                    .copied()
                    .unwrap_or(1);
                let candidate = match build_candidate(pool, card, cm, tcg, profile, &self.config, seller_card_count).await {
                    Ok(c) => c,
                    Err(e) => {
                        warn!(card_id = %card.card_id, error = %e, "candidate_assembly_failed");
                        continue;
                    }
                };

                match run_pipeline(&candidate, &self.config) {
                    Ok(Ok(evaluation)) => {
                        if evaluation.net_profit.net_profit < profile.min_profit_threshold {
                            counter!("rules_stage_rejected_total", "stage" => "user_threshold").increment(1);
                            continue;
                        }
                        let urls = build_signal_urls(&card.name, card.tcgplayer_url.as_deref(), card.cardmarket_url.as_deref());
                        scored.push(ScoredSignal {
                            card_id: card.card_id.clone(),
                            card_name: card.name.clone(),
                            cm_price_eur: candidate.cm_price_eur,
                            tcg_price_usd: candidate.tcg_price_usd,
                            condition: candidate.cardmarket_condition.clone(),
                            net_profit: evaluation.net_profit.net_profit,
                            tcgplayer_url: urls.tcgplayer_url,
                            cardmarket_url: urls.cardmarket_url,
                            source_prices: serde_json::json!({
                                "cardmarket_eur": candidate.cm_price_eur,
                                "tcgplayer_usd": candidate.tcg_price_usd,
                                "forex_rate": candidate.forex_rate,
                            }),
                            evaluation,
                        });
                    }
                    Ok(Err(rejection)) => {
                        let stage = match &rejection {
                            Rejection::CandidateRejected { stage, .. } => stage.label(),
                            Rejection::ConditionSuppressed { .. } => "condition",
                        };
                        counter!("rules_stage_rejected_total", "stage" => stage).increment(1);
                    }
                    Err(e) => warn!(card_id = %card.card_id, error = %e, "pipeline_error"),
                }
            }

            scored.sort_by(|a, b| b.net_profit.cmp(&a.net_profit));
            scored.truncate(self.config.max_signals_per_scan);

            let mut messages = Vec::new();
            for signal in &scored {
                let expires_at = Utc::now() + chrono::Duration::hours(24);
                let signal_id = match insert_signal(
                    pool,
                    tenant,
                    &signal.card_id,
                    &signal.card_name,
                    signal.cm_price_eur,
                    signal.tcg_price_usd,
                    Some(&signal.condition),
                    &signal.evaluation,
                    Some(&signal.tcgplayer_url),
                    Some(&signal.cardmarket_url),
                    expires_at,
                )
                .await
                {
                    Ok(id) => id,
                    Err(e) => {
                        warn!(error = %e, "signal_persist_failed");
                        continue;
                    }
                };

                let _ = audit::insert(
                    pool,
                    signal_id,
                    signal.source_prices.clone(),
                    serde_json::to_value(&signal.evaluation.net_profit).unwrap_or_default(),
                    serde_json::to_value(&signal.evaluation).unwrap_or_default(),
                )
                .await;

                messages.push(SignalMessage {
                    channel_id: profile
                        .telegram_chat_id
                        .map(|id| id.to_string())
                        .or_else(|| profile.discord_channel_id.map(|id| id.to_string()))
                        .unwrap_or_else(|| profile.user_id.to_string()),
                    card_name: signal.card_name.clone(),
                    net_profit: signal.net_profit,
                    tcgplayer_url: signal.tcgplayer_url.clone(),
                    cardmarket_url: signal.cardmarket_url.clone(),
                });
            }

            // Bounded-rate delivery: per-user failure never blocks the next user.
            delivered += self.notifier.send_batch(&messages).await;
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        Ok(delivered)
    }

    /// Used by the admin cascade sweep (Section 4.H) to re-send expired,
    /// un-acted-on signals.
    pub async fn cascade_sweep(&self, pool: &PgPool) -> RadarResult<usize> {
        let now = Utc::now();
        let candidates = signals::all_cascade_eligible(pool, now).await?;
        let mut cascaded = 0;
        for signal in candidates {
            let (eligible, _) = crate::cascade::should_cascade(
                signal.expires_at.unwrap_or(now),
                signal.acted_on,
                signal.cascade_count,
                now,
                self.config.cascade_cooldown,
                self.config.cascade_max_limit,
            );
            if !eligible {
                continue;
            }
            let message = SignalMessage {
                channel_id: signal.tenant_id.to_string(),
                card_name: signal.card_name.clone(),
                net_profit: signal.net_profit,
                tcgplayer_url: signal.tcgplayer_url.clone().unwrap_or_default(),
                cardmarket_url: signal.cardmarket_url.clone().unwrap_or_default(),
            };
            if self.notifier.send_one(&message).await {
                let _ = signals::increment_cascade(pool, TenantId::new(signal.tenant_id), signal.id).await;
                cascaded += 1;
            }
        }
        Ok(cascaded)
    }
}

