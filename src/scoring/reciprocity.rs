//! RECIPROCITY
//!
//! In dim and dark light long exposures are likely, so stocks that hold
//! their speed past one second earn a bonus.

use crate::catalog::FilmStock;
use crate::types::LightCondition;
use super::weights::{ScoringWeights, RECIPROCITY_MODERATE_SECS, RECIPROCITY_TOLERANT_SECS};

pub fn calculate_reciprocity(film: &FilmStock, light: LightCondition, weights: &ScoringWeights) -> f64 {
    if !light.is_low_light() {
        return 0.0;
    }
    if film.reciprocity_start >= RECIPROCITY_TOLERANT_SECS {
        weights.reciprocity_tolerant
    } else if film.reciprocity_start >= RECIPROCITY_MODERATE_SECS {
        weights.reciprocity_moderate
    } else {
        0.0
    }
}
