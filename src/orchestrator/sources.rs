//! Source dispatch (Section 4.F, Section 9 design note).
//!
//! `PriceSource` is a tagged enum, not a trait object — the design note
//! calls for avoiding dynamic dispatch where a fixed, small set of
//! variants suffices. Each variant wraps the matching trait from
//! `crate::sources`; the orchestrator iterates a homogeneous
//! `Vec<SourceSlot>` and dispatches on the tag.

use std::sync::Arc;

use crate::error::{RadarError, RadarResult};
use crate::sources::{MetadataSource, PriceSourceClient, VelocitySource};

const POPULAR_SETS: &[&str] = &["sv1", "sv1pt5", "sv2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceSource {
    BuySide,
    SellSide,
    Velocity,
    ExtraUs,
}

impl PriceSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::BuySide => "buy_side",
            Self::SellSide => "sell_side",
            Self::Velocity => "velocity",
            Self::ExtraUs => "extra_us",
        }
    }
}

/// One poll-able collaborator, tagged with which kind it is so the
/// orchestrator can apply the right cadence and call the right trait
/// method without a trait object for the call itself.
pub enum SourceSlot {
    Price(PriceSource, Arc<dyn PriceSourceClient>),
    Velocity(Arc<dyn VelocitySource>),
    Metadata(Arc<dyn MetadataSource>),
}

impl SourceSlot {
    pub fn tag(&self) -> PriceSource {
        match self {
            Self::Price(tag, _) => *tag,
            Self::Velocity(_) => PriceSource::Velocity,
            Self::Metadata(_) => PriceSource::ExtraUs,
        }
    }

    pub async fn poll(&self) -> RadarResult<usize> {
        match self {
            Self::Price(_, client) => Ok(client.fetch_quotes(POPULAR_SETS).await?.len()),
            Self::Velocity(client) => Ok(client.fetch_velocity(&[]).await?.len()),
            Self::Metadata(client) => Ok(client.fetch_metadata(POPULAR_SETS).await?.len()),
        }
    }
}

pub async fn poll_with_backoff(slot: &SourceSlot) -> Result<usize, RadarError> {
    let label = slot.tag().label();
    backoff::future::retry(backoff::ExponentialBackoff::default(), || async {
        slot.poll().await.map_err(|e| match e {
            RadarError::SourceTransient { .. } => backoff::Error::transient(e),
            other => backoff::Error::permanent(other),
        })
    })
    .await
    .map_err(|e| match e {
        backoff::Error::Permanent(inner) => inner,
        backoff::Error::Transient { err, .. } => RadarError::SourceFailed {
            source_name: label.into(),
            message: err.to_string(),
        },
    })
}
