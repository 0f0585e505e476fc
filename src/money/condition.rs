//! Condition mapping, Cardmarket -> TCGPlayer (Section 4.A).
//!
//! The table is a closed contract: seven Cardmarket grades map to five
//! TCGPlayer grades with a fixed multiplier, except `PO` (Poor), which has
//! no TCGPlayer equivalent and must suppress the candidate rather than
//! guess one.

use std::fmt;

use crate::error::{RadarError, RadarResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardmarketGrade {
    Mint,
    NearMint,
    Excellent,
    Good,
    LightPlayed,
    Played,
    Poor,
}

impl fmt::Display for CardmarketGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Mint => "MT",
            Self::NearMint => "NM",
            Self::Excellent => "EXC",
            Self::Good => "GD",
            Self::LightPlayed => "LP",
            Self::Played => "PL",
            Self::Poor => "PO",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for CardmarketGrade {
    type Err = RadarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "MT" => Ok(Self::Mint),
            "NM" => Ok(Self::NearMint),
            "EXC" => Ok(Self::Excellent),
            "GD" => Ok(Self::Good),
            "LP" => Ok(Self::LightPlayed),
            "PL" => Ok(Self::Played),
            "PO" => Ok(Self::Poor),
            other => Err(RadarError::invalid(format!("unknown cardmarket grade '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TcgPlayerGrade {
    NearMint,
    LightPlayed,
    ModeratePlayed,
    HeavyPlayed,
    Damaged,
}

impl fmt::Display for TcgPlayerGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NearMint => "NM",
            Self::LightPlayed => "LP",
            Self::ModeratePlayed => "MP",
            Self::HeavyPlayed => "HP",
            Self::Damaged => "DMG",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConditionMapping {
    pub cardmarket: CardmarketGrade,
    pub tcgplayer: TcgPlayerGrade,
    pub multiplier: rust_decimal::Decimal,
}

/// Synonym table (supplemented from the distilled original's
/// `_CONDITION_ALIASES`) normalized to the seven canonical codes before
/// lookup. Used only at ingestion boundaries — never changes the table.
pub fn normalize(raw: &str) -> String {
    let upper = raw.trim().to_ascii_uppercase();
    match upper.as_str() {
        "MINT" | "MT" => "MT",
        "NEAR MINT" | "NM" | "NEAR-MINT" => "NM",
        "EXCELLENT" | "EXC" | "EX" => "EXC",
        "GOOD" | "GD" => "GD",
        "LIGHT PLAYED" | "LIGHTLY PLAYED" | "LP" => "LP",
        "PLAYED" | "PL" => "PL",
        "POOR" | "PO" | "DAMAGED" => "PO",
        other => return other.to_string(),
    }
    .to_string()
}

/// Returns `Err` for `PO`, which the rules engine treats as a suppression
/// (stage 3, `ConditionSuppressed`) rather than a hard rejection.
pub fn map_condition(grade: CardmarketGrade) -> RadarResult<ConditionMapping> {
    use rust_decimal_macros::dec;
    let (tcgplayer, multiplier) = match grade {
        CardmarketGrade::Mint => (TcgPlayerGrade::NearMint, dec!(1.00)),
        CardmarketGrade::NearMint => (TcgPlayerGrade::NearMint, dec!(1.00)),
        CardmarketGrade::Excellent => (TcgPlayerGrade::LightPlayed, dec!(0.85)),
        CardmarketGrade::Good => (TcgPlayerGrade::ModeratePlayed, dec!(0.75)),
        CardmarketGrade::LightPlayed => (TcgPlayerGrade::ModeratePlayed, dec!(0.75)),
        CardmarketGrade::Played => (TcgPlayerGrade::HeavyPlayed, dec!(0.60)),
        CardmarketGrade::Poor => {
            return Err(RadarError::invalid("PO has no TCGPlayer equivalent"));
        }
    };
    Ok(ConditionMapping {
        cardmarket: grade,
        tcgplayer,
        multiplier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_and_near_mint_both_map_to_nm_at_full_multiplier() {
        let m1 = map_condition(CardmarketGrade::Mint).unwrap();
        let m2 = map_condition(CardmarketGrade::NearMint).unwrap();
        assert_eq!(m1.multiplier, rust_decimal_macros::dec!(1.00));
        assert_eq!(m2.multiplier, rust_decimal_macros::dec!(1.00));
    }

    #[test]
    fn poor_has_no_mapping() {
        assert!(map_condition(CardmarketGrade::Poor).is_err());
    }

    #[test]
    fn normalize_collapses_synonyms() {
        assert_eq!(normalize("Near Mint"), "NM");
        assert_eq!(normalize("mint"), "MT");
        assert_eq!(normalize("damaged"), "PO");
    }
}
