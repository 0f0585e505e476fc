//! Trend Analyzer (Section 4.C).
//!
//! Ordinary-least-squares slope over the last 7 days of price history,
//! normalized by the mean price so a $1/day move on a $5 card and a $1/day
//! move on a $500 card are comparable. Returns a `Decimal` fraction
//! (0.0123 == "1.23% per day"), rounded to 6dp to match the distilled
//! original's `Decimal(str(round(x, 6)))` behavior.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One observed price point, day-offset from the oldest point in the
/// window (x) and the USD price used for regression (y).
#[derive(Debug, Clone, Copy)]
pub struct PricePoint {
    pub day_offset: f64,
    pub price_usd: f64,
}

/// Builds regression points from a source's price history rows, preferring
/// USD and falling back to a pre-converted EUR value; rows with neither are
/// dropped (mirrors the original's "both-null rows skipped" behavior).
pub fn build_points(rows: &[(chrono::NaiveDate, Option<Decimal>, Option<Decimal>)]) -> Vec<PricePoint> {
    if rows.is_empty() {
        return Vec::new();
    }
    let earliest = rows.iter().map(|(d, _, _)| *d).min().expect("non-empty");
    rows.iter()
        .filter_map(|(date, usd, eur_as_usd)| {
            let price = usd.or(*eur_as_usd)?;
            Some(PricePoint {
                day_offset: (*date - earliest).num_days() as f64,
                price_usd: price.to_f64().unwrap_or(0.0),
            })
        })
        .collect()
}

/// Returns `0.00` for fewer than two usable points, a zero denominator, or
/// a zero mean price — all degenerate cases the original treats as "no
/// signal" rather than an error.
pub fn seven_day_trend(points: &[PricePoint]) -> Decimal {
    if points.len() < 2 {
        return dec!(0.00);
    }

    let n = points.len() as f64;
    let mean_x: f64 = points.iter().map(|p| p.day_offset).sum::<f64>() / n;
    let mean_y: f64 = points.iter().map(|p| p.price_usd).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for p in points {
        let dx = p.day_offset - mean_x;
        let dy = p.price_usd - mean_y;
        numerator += dx * dy;
        denominator += dx * dx;
    }

    if denominator == 0.0 || mean_y == 0.0 {
        return dec!(0.00);
    }

    let slope = numerator / denominator;
    let daily_change_fraction = slope / mean_y;
    Decimal::from_f64_retain(daily_change_fraction)
        .unwrap_or(Decimal::ZERO)
        .round_dp(6)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| PricePoint {
                day_offset: i as f64,
                price_usd: *p,
            })
            .collect()
    }

    #[test]
    fn rising_price_series_gives_positive_trend() {
        let points = pts(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0]);
        let trend = seven_day_trend(&points);
        assert!(trend > Decimal::ZERO);
    }

    #[test]
    fn falling_knife_series_gives_strongly_negative_trend() {
        // ~15% drop over the window, well past the falling-knife threshold.
        let points = pts(&[100.0, 95.0, 90.0, 88.0, 86.0, 84.0, 82.0]);
        let trend = seven_day_trend(&points);
        assert!(trend < dec!(-0.10));
    }

    #[test]
    fn flat_series_gives_zero_trend() {
        let points = pts(&[50.0, 50.0, 50.0, 50.0]);
        let trend = seven_day_trend(&points);
        assert_eq!(trend, Decimal::ZERO);
    }

    #[test]
    fn fewer_than_two_points_is_zero() {
        let points = pts(&[50.0]);
        assert_eq!(seven_day_trend(&points), dec!(0.00));
        assert_eq!(seven_day_trend(&[]), dec!(0.00));
    }

    #[test]
    fn build_points_skips_rows_with_no_price() {
        let rows = vec![
            (chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), Some(dec!(10.00)), None),
            (chrono::NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(), None, None),
            (chrono::NaiveDate::from_ymd_opt(2026, 1, 3).unwrap(), None, Some(dec!(11.00))),
        ];
        let points = build_points(&rows);
        assert_eq!(points.len(), 2);
    }
}
