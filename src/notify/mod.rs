//! Notification delivery (Section 6).
//!
//! `Notifier` is the boundary the generator and cascade controller call
//! through. It must not throw — a delivery failure is counted and the
//! scan continues, per Section 7's `DeliveryFailed` handling — so every
//! method returns `bool` rather than a `Result`.

use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct SignalMessage {
    pub channel_id: String,
    pub card_name: String,
    pub net_profit: rust_decimal::Decimal,
    pub tcgplayer_url: String,
    pub cardmarket_url: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_one(&self, message: &SignalMessage) -> bool;

    /// Paced batch send — the generator calls this for per-user digests so
    /// one slow/rate-limited channel can't stall delivery to the rest.
    async fn send_batch(&self, messages: &[SignalMessage]) -> usize {
        let mut delivered = 0;
        for message in messages {
            if self.send_one(message).await {
                delivered += 1;
            }
        }
        delivered
    }

    async fn send_digest(&self, channel_id: &str, messages: &[SignalMessage]) -> bool;
}

pub struct HttpChatNotifier {
    client: reqwest::Client,
    webhook_base_url: String,
}

impl HttpChatNotifier {
    pub fn new(webhook_base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_base_url: webhook_base_url.into(),
        }
    }
}

#[async_trait]
impl Notifier for HttpChatNotifier {
    async fn send_one(&self, message: &SignalMessage) -> bool {
        let url = format!("{}/channels/{}/messages", self.webhook_base_url, message.channel_id);
        self.client
            .post(&url)
            .json(&serde_json::json!({
                "card_name": message.card_name,
                "net_profit": message.net_profit,
                "tcgplayer_url": message.tcgplayer_url,
                "cardmarket_url": message.cardmarket_url,
            }))
            .send()
            .await
            .map(|resp| resp.status().is_success())
            .unwrap_or(false)
    }

    async fn send_digest(&self, channel_id: &str, messages: &[SignalMessage]) -> bool {
        let url = format!("{}/channels/{}/digest", self.webhook_base_url, channel_id);
        let payload: Vec<_> = messages
            .iter()
            .map(|m| {
                serde_json::json!({
                    "card_name": m.card_name,
                    "net_profit": m.net_profit,
                    "tcgplayer_url": m.tcgplayer_url,
                    "cardmarket_url": m.cardmarket_url,
                })
            })
            .collect();
        self.client
            .post(&url)
            .json(&serde_json::json!({ "signals": payload }))
            .send()
            .await
            .map(|resp| resp.status().is_success())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingNotifier {
        sent: AtomicUsize,
        fail_after: usize,
    }

    #[async_trait]
    impl Notifier for CountingNotifier {
        async fn send_one(&self, _message: &SignalMessage) -> bool {
            let n = self.sent.fetch_add(1, Ordering::SeqCst);
            n < self.fail_after
        }

        async fn send_digest(&self, _channel_id: &str, _messages: &[SignalMessage]) -> bool {
            true
        }
    }

    fn msg(channel: &str) -> SignalMessage {
        SignalMessage {
            channel_id: channel.into(),
            card_name: "Pikachu ex".into(),
            net_profit: dec!(12.34),
            tcgplayer_url: "https://example.com/tcg".into(),
            cardmarket_url: "https://example.com/cm".into(),
        }
    }

    #[tokio::test]
    async fn batch_isolates_per_message_failures() {
        let notifier = CountingNotifier { sent: AtomicUsize::new(0), fail_after: 2 };
        let messages = vec![msg("a"), msg("b"), msg("c")];
        let delivered = notifier.send_batch(&messages).await;
        assert_eq!(delivered, 2);
    }
}
