//! Scraper capability (Section 6) — seller listing detail not exposed by
//! any structured API. Grounded in the distilled original's
//! `ScraperRunner` fallback chain (network intercept -> CSS -> vision);
//! gated behind `Config::enable_layer3_scraping` and never invoked unless
//! that flag is set.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::RadarResult;

#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub card_id: String,
    pub seller_id: String,
    pub seller_rating: Decimal,
    pub seller_sales: i32,
    pub listing_count: i32,
}

#[async_trait]
pub trait ScraperCapability: Send + Sync {
    async fn scrape_listing(&self, card_id: &str, listing_url: &str) -> RadarResult<ScrapeOutcome>;
}

/// No-op stub: Layer 3 scraping is feature-flagged off by default
/// (`ENABLE_LAYER_3_SCRAPING=false`), and the scrape implementation itself
/// (browser automation, anti-bot evasion) is out of scope here.
pub struct DisabledScraper;

#[async_trait]
impl ScraperCapability for DisabledScraper {
    async fn scrape_listing(&self, card_id: &str, _listing_url: &str) -> RadarResult<ScrapeOutcome> {
        Err(crate::error::RadarError::SourceFailed {
            source_name: "scraper".into(),
            message: format!("scraping disabled, no data for {card_id}"),
        })
    }
}
