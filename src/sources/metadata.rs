//! Card metadata feed (Section 6) — set release dates, regulation marks,
//! legality, refreshed on a slow cadence (PokemonTCG.io in the distilled
//! original).

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{RadarError, RadarResult};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct MetadataUpdate {
    pub card_id: String,
    pub name: String,
    pub set_code: String,
    pub set_name: String,
    pub card_number: String,
    pub regulation_mark: Option<String>,
    pub set_release_date: Option<NaiveDate>,
    pub legality_standard: bool,
    pub legality_expanded: bool,
}

#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_metadata(&self, set_codes: &[&str]) -> RadarResult<Vec<MetadataUpdate>>;
}

pub struct HttpMetadataSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMetadataSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl MetadataSource for HttpMetadataSource {
    async fn fetch_metadata(&self, set_codes: &[&str]) -> RadarResult<Vec<MetadataUpdate>> {
        let mut updates = Vec::new();
        for set_code in set_codes {
            let url = format!("{}/sets/{}/cards", self.base_url, set_code);
            let response = self.client.get(&url).send().await.map_err(|e| RadarError::SourceTransient {
                source_name: "metadata".into(),
                message: e.to_string(),
            })?;
            if !response.status().is_success() {
                return Err(RadarError::SourceFailed {
                    source_name: "metadata".into(),
                    message: format!("status {}", response.status()),
                });
            }
            let body: Vec<MetadataUpdate> = response.json().await.map_err(|e| RadarError::SourceFailed {
                source_name: "metadata".into(),
                message: format!("invalid response body: {e}"),
            })?;
            updates.extend(body);
        }
        Ok(updates)
    }
}
