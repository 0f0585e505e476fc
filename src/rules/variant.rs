//! Stage 1: variant check (Section 4.B).
//!
//! Confirms the Cardmarket and TCGPlayer listings are actually the same
//! printing before any money math runs on them.

pub const MATCH: &str = "MATCH";
pub const VARIANT_MISMATCH: &str = "VARIANT_MISMATCH";

pub fn validate_variant(tcgplayer_id: Option<&str>, cardmarket_id: Option<&str>) -> &'static str {
    match (tcgplayer_id, cardmarket_id) {
        (Some(t), Some(c)) if !t.trim().is_empty() && !c.trim().is_empty() && t == c => MATCH,
        _ => VARIANT_MISMATCH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ids_pass() {
        assert_eq!(validate_variant(Some("sv1-25"), Some("sv1-25")), MATCH);
    }

    #[test]
    fn mismatched_ids_fail() {
        assert_eq!(validate_variant(Some("sv1-25"), Some("sv1-26")), VARIANT_MISMATCH);
    }

    #[test]
    fn missing_id_fails() {
        assert_eq!(validate_variant(None, Some("sv1-25")), VARIANT_MISMATCH);
        assert_eq!(validate_variant(Some(""), Some("sv1-25")), VARIANT_MISMATCH);
    }
}
