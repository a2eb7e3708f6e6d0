//! Prediction output formatting
//!
//! Turns the raw model scalar into a `SalaryEstimate` with the heuristic
//! low/high band, plus currency display helpers for the result surface.

use crate::models::SalaryEstimate;

/// Half-width of the displayed band (±15%)
///
/// A fixed heuristic, not a confidence interval.
pub const RANGE_MARGIN: f32 = 0.15;

/// Formats raw model outputs into a SalaryEstimate
pub struct EstimateFormatter {
    margin: f32,
}

impl EstimateFormatter {
    pub fn new() -> Self {
        Self {
            margin: RANGE_MARGIN,
        }
    }

    pub fn with_margin(margin: f32) -> Self {
        Self { margin }
    }

    /// Build the estimate from the raw model output
    pub fn format(&self, predicted_usd: f32, model_version: &str) -> SalaryEstimate {
        SalaryEstimate {
            predicted_usd,
            low_usd: predicted_usd * (1.0 - self.margin),
            high_usd: predicted_usd * (1.0 + self.margin),
            model_version: model_version.to_string(),
            generated_at: chrono::Utc::now().timestamp(),
        }
    }
}

impl Default for EstimateFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a dollar amount with thousands grouping, e.g. "$95,000"
pub fn format_usd(amount: f32) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_is_fifteen_percent() {
        let formatter = EstimateFormatter::new();
        let estimate = formatter.format(95_000.0, "v1.0.0");

        assert_eq!(estimate.predicted_usd, 95_000.0);
        assert_eq!(estimate.low_usd, 80_750.0);
        assert_eq!(estimate.high_usd, 109_250.0);
        assert_eq!(estimate.model_version, "v1.0.0");
    }

    #[test]
    fn test_custom_margin() {
        let formatter = EstimateFormatter::with_margin(0.10);
        let estimate = formatter.format(100_000.0, "v1.0.0");

        assert_eq!(estimate.low_usd, 90_000.0);
        assert_eq!(estimate.high_usd, 110_000.0);
    }

    #[test]
    fn test_format_usd_groups_thousands() {
        assert_eq!(format_usd(95_000.0), "$95,000");
        assert_eq!(format_usd(80_750.0), "$80,750");
        assert_eq!(format_usd(109_250.0), "$109,250");
        assert_eq!(format_usd(1_234_567.0), "$1,234,567");
    }

    #[test]
    fn test_format_usd_small_and_edge_amounts() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(999.0), "$999");
        assert_eq!(format_usd(1_000.0), "$1,000");
        assert_eq!(format_usd(999.6), "$1,000");
    }
}
