//! External interfaces (Section 6).
//!
//! The core only depends on these trait boundaries — wire-format details
//! of specific upstream providers (JustTCG, PokemonTCG.io, PokeTrace,
//! eBay, Cardmarket scraping) are explicitly out of scope (Section 1).
//! Each trait has one thin `reqwest`-backed stub implementation so the
//! service runs end-to-end; swapping in a real provider means
//! implementing the trait, not touching the orchestrator or rules engine.

pub mod metadata;
pub mod price;
pub mod scraper;
pub mod velocity;

pub use metadata::{MetadataSource, MetadataUpdate};
pub use price::{PriceQuote, PriceSourceClient};
pub use scraper::{ScrapeOutcome, ScraperCapability};
pub use velocity::{VelocityReading, VelocitySource};
