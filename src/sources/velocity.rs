//! Sales velocity feed (Section 6) — active listings and 30-day sales
//! counts used by rules stage 5.

use async_trait::async_trait;

use crate::error::{RadarError, RadarResult};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct VelocityReading {
    pub card_id: String,
    pub sales_30d: Option<i32>,
    pub active_listings: Option<i32>,
}

#[async_trait]
pub trait VelocitySource: Send + Sync {
    async fn fetch_velocity(&self, card_ids: &[&str]) -> RadarResult<Vec<VelocityReading>>;
}

pub struct HttpVelocitySource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVelocitySource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl VelocitySource for HttpVelocitySource {
    async fn fetch_velocity(&self, card_ids: &[&str]) -> RadarResult<Vec<VelocityReading>> {
        let url = format!("{}/velocity", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("card_ids", card_ids.join(","))])
            .send()
            .await
            .map_err(|e| RadarError::SourceTransient {
                source_name: "velocity".into(),
                message: e.to_string(),
            })?;
        if !response.status().is_success() {
            return Err(RadarError::SourceFailed {
                source_name: "velocity".into(),
                message: format!("status {}", response.status()),
            });
        }
        response.json().await.map_err(|e| RadarError::SourceFailed {
            source_name: "velocity".into(),
            message: format!("invalid response body: {e}"),
        })
    }
}
