//! Risk score normalization and severity bucketing.
//!
//! Historical producers reported risk on three scales (0-1, 0-10, 0-100).
//! Everything downstream works on the canonical 0-10 scale. Normalization
//! clamps rather than errors: a score outside its declared scale still lands
//! inside [0, 10], and NaN clamps to 0.

use crate::canonical::Severity;
use serde::{Deserialize, Serialize};

/// Scale a raw risk score was reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskScale {
    #[serde(rename = "0-1")]
    Unit,
    #[serde(rename = "0-10")]
    Ten,
    #[serde(rename = "0-100")]
    Hundred,
}

impl RiskScale {
    /// Multiplier onto the canonical 0-10 scale.
    fn factor(&self) -> f64 {
        match self {
            RiskScale::Unit => 10.0,
            RiskScale::Ten => 1.0,
            RiskScale::Hundred => 0.1,
        }
    }
}

/// Normalize a score onto the canonical 0-10 scale, clamped.
///
/// Never errors: out-of-range and negative inputs clamp, NaN becomes 0.
pub fn normalize(score: f64, scale: RiskScale) -> f64 {
    let scaled = score * scale.factor();
    if scaled.is_nan() {
        return 0.0;
    }
    scaled.clamp(0.0, 10.0)
}

/// Severity bucket for a 0-10 risk score.
///
/// Intervals are half-open with inclusive lower bounds: [0,3) low,
/// [3,5) medium, [5,7) high, [7,10] critical.
pub fn severity_of(score: f64) -> Severity {
    let score = normalize(score, RiskScale::Ten);
    if score < 3.0 {
        Severity::Low
    } else if score < 5.0 {
        Severity::Medium
    } else if score < 7.0 {
        Severity::High
    } else {
        Severity::Critical
    }
}

/// Round to `precision` decimal places, half away from zero.
pub fn round_to(score: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (score * factor).round() / factor
}

/// Round to the default single decimal place.
pub fn round1(score: f64) -> f64 {
    round_to(score, 1)
}

/// Element-wise normalization of a batch of scores.
pub fn normalize_batch(scores: &[f64], scale: RiskScale) -> Vec<f64> {
    scores.iter().map(|s| normalize(*s, scale)).collect()
}
