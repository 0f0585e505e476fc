//! Buy-side / sell-side price feeds (Section 6).

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::{RadarError, RadarResult};

#[derive(Debug, Clone)]
pub struct PriceQuote {
    pub card_id: String,
    pub price_usd: Option<Decimal>,
    pub price_eur: Option<Decimal>,
    pub condition: Option<String>,
    pub seller_id: Option<String>,
    pub seller_rating: Option<Decimal>,
    pub seller_sales: Option<i32>,
}

#[async_trait]
pub trait PriceSourceClient: Send + Sync {
    /// Fetch current quotes for the given set codes. A transient upstream
    /// failure should surface as `RadarError::SourceTransient` so the
    /// orchestrator's backoff retries it; an unrecoverable failure as
    /// `SourceFailed`.
    async fn fetch_quotes(&self, set_codes: &[&str]) -> RadarResult<Vec<PriceQuote>>;
}

pub struct HttpPriceSource {
    client: reqwest::Client,
    base_url: String,
    source_name: String,
}

impl HttpPriceSource {
    pub fn new(base_url: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            source_name: source_name.into(),
        }
    }
}

#[async_trait]
impl PriceSourceClient for HttpPriceSource {
    async fn fetch_quotes(&self, set_codes: &[&str]) -> RadarResult<Vec<PriceQuote>> {
        let mut quotes = Vec::new();
        for set_code in set_codes {
            let url = format!("{}/sets/{}/prices", self.base_url, set_code);
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| RadarError::SourceTransient {
                    source_name: self.source_name.clone(),
                    message: e.to_string(),
                })?;
            if !response.status().is_success() {
                return Err(RadarError::SourceFailed {
                    source_name: self.source_name.clone(),
                    message: format!("status {}", response.status()),
                });
            }
            let body: Vec<PriceQuoteWire> = response.json().await.map_err(|e| RadarError::SourceFailed {
                source_name: self.source_name.clone(),
                message: format!("invalid response body: {e}"),
            })?;
            quotes.extend(body.into_iter().map(Into::into));
        }
        Ok(quotes)
    }
}

#[derive(serde::Deserialize)]
struct PriceQuoteWire {
    card_id: String,
    price_usd: Option<Decimal>,
    price_eur: Option<Decimal>,
    condition: Option<String>,
    seller_id: Option<String>,
    seller_rating: Option<Decimal>,
    seller_sales: Option<i32>,
}

impl From<PriceQuoteWire> for PriceQuote {
    fn from(w: PriceQuoteWire) -> Self {
        Self {
            card_id: w.card_id,
            price_usd: w.price_usd,
            price_eur: w.price_eur,
            condition: w.condition,
            seller_id: w.seller_id,
            seller_rating: w.seller_rating,
            seller_sales: w.seller_sales,
        }
    }
}
