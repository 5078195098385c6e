//! INTENT FIT
//!
//! Each intent carries a small bonus vector. A positive saturation or contrast
//! bonus rewards stocks at or above the "high" threshold; a negative one
//! rewards stocks at or below the "low" threshold. Grain tolerance adds a flat
//! bonus and offsets the penalty for very grainy stocks.

use serde::Serialize;

use crate::catalog::FilmStock;
use crate::types::Intent;
use super::weights::*;

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct IntentFitResult {
    pub score: f64,
    pub saturation: f64,
    pub contrast: f64,
    pub latitude: f64,
    pub grain: f64,
}

/// Signed trait bonus: positive bonuses want high values, negative want low
#[inline]
fn directional_bonus(bonus: f64, value: f64, unit: f64) -> f64 {
    if bonus > 0.0 && value >= TRAIT_HIGH_MIN {
        bonus * unit
    } else if bonus < 0.0 && value <= TRAIT_LOW_MAX {
        -bonus * unit
    } else {
        0.0
    }
}

/// Calculate the intent-fit term
pub fn calculate_intent_fit(
    film: &FilmStock,
    intent: Intent,
    weights: &ScoringWeights,
) -> IntentFitResult {
    let modifier = intent_modifier(intent);
    let unit = weights.intent_trait_unit;

    let saturation = directional_bonus(modifier.saturation_bonus, film.saturation, unit);
    let contrast = directional_bonus(modifier.contrast_bonus, film.contrast, unit);

    let latitude = if modifier.latitude_bonus > 0.0 && film.latitude >= HIGH_LATITUDE_MIN {
        modifier.latitude_bonus * unit
    } else {
        0.0
    };

    let tolerance = modifier.grain_tolerance * weights.grain_tolerance_unit;
    let mut grain = tolerance;
    if film.grain >= GRAINY_MIN {
        // Tolerance relieves the penalty but never turns it into a reward
        grain += (weights.high_grain_penalty + tolerance).min(0.0);
    }

    IntentFitResult {
        score: saturation + contrast + latitude + grain,
        saturation,
        contrast,
        latitude,
        grain,
    }
}
