//! Weighted score from skill and section coverage

use crate::processing::section_detector::SectionKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills_weight: f64,
    pub sections_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills_weight: 0.7,
            sections_weight: 0.3,
        }
    }
}

/// Coverage ratios rounded to 3 decimals and an integer score in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub skills_ratio: f64,
    pub sections_ratio: f64,
    pub final_score: u8,
}

/// Score a resume.
///
/// With a non-empty `required` set the skill ratio measures job fit
/// (`|found ∩ required| / |required|`); otherwise it is general coverage of the
/// catalog (`|found| / catalog_size`). Any zero denominator yields 0.0.
///
/// `final_score` is computed from the unrounded ratios and rounded half-up.
pub fn score(
    found: &[String],
    required: &[String],
    section_presence: &BTreeMap<SectionKind, bool>,
    catalog_size: usize,
    weights: &ScoringWeights,
) -> ScoreResult {
    let skills_ratio = if !required.is_empty() {
        let matched = required.iter().filter(|s| found.contains(s)).count();
        ratio(matched, required.len())
    } else {
        ratio(found.len(), catalog_size)
    };

    let present_sections = section_presence.values().filter(|&&v| v).count();
    let sections_ratio = ratio(present_sections, section_presence.len());

    let weighted = skills_ratio * weights.skills_weight + sections_ratio * weights.sections_weight;

    ScoreResult {
        skills_ratio: round_to(skills_ratio, 3),
        sections_ratio: round_to(sections_ratio, 3),
        final_score: round_half_up(weighted * 100.0).clamp(0.0, 100.0) as u8,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Decimal places kept before the final rounding step.
const TIE_PRECISION: i32 = 9;

/// Round half-up. The value is first snapped to [`TIE_PRECISION`] decimals so
/// that a tie reached through inexact products (52.4999999... for 52.5) still
/// rounds up. `f64::round` rounds half away from zero, which is half-up for
/// non-negative scores.
fn round_half_up(value: f64) -> f64 {
    round_to(value, TIE_PRECISION).round()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
