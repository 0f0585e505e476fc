//! Stage 8: rotation risk (Section 4.B).
//!
//! Thin wrapper over `rotation_calendar` that turns the classification into
//! a stage outcome: `Danger` and `Rotated` reject, `Safe`/`Watch`/`Unknown`
//! pass through with the risk label attached for display.

use chrono::NaiveDate;

use crate::rotation_calendar::{check_rotation_risk, RotationRisk};

pub fn evaluate(regulation_mark: Option<&str>, legality_standard: bool, reference_date: NaiveDate) -> (RotationRisk, bool) {
    let risk = check_rotation_risk(regulation_mark, legality_standard, reference_date);
    let reject = matches!(risk, RotationRisk::Danger | RotationRisk::Rotated);
    (risk, reject)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn danger_rejects() {
        let (_, reject) = evaluate(Some("G"), true, NaiveDate::from_ymd_opt(2026, 1, 20).unwrap());
        assert!(reject);
    }

    #[test]
    fn safe_passes() {
        let (_, reject) = evaluate(Some("H"), true, NaiveDate::from_ymd_opt(2026, 1, 20).unwrap());
        assert!(!reject);
    }
}
