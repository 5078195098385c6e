//! ENVIRONMENT FIT
//!
//! Scores a stock against what the shooting environment asks for:
//! - Listed ideal environments
//! - Grain and contrast buckets
//! - Skin-tone rendering (portraits)
//! - Sharpness and latitude, scaled by per-environment multipliers
//! - Preferred color bias (color stocks only)

use serde::Serialize;

use crate::catalog::FilmStock;
use crate::types::Environment;
use super::weights::*;

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EnvironmentFitResult {
    /// Sum of all components below
    pub score: f64,
    pub ideal_match: f64,
    pub grain: f64,
    pub contrast: f64,
    pub skin_tones: f64,
    pub sharpness: f64,
    pub latitude: f64,
    pub color_bias: f64,
}

/// Calculate the environment-fit term
pub fn calculate_environment_fit(
    film: &FilmStock,
    environment: Environment,
    weights: &ScoringWeights,
) -> EnvironmentFitResult {
    let profile = environment_profile(environment);
    let mut result = EnvironmentFitResult::default();

    if film.ideal_environment.contains(&environment) {
        result.ideal_match = weights.env_ideal_match;
    }

    result.grain = match profile.grain {
        Preference::Low if film.grain <= LOW_GRAIN_MAX => weights.grain_low_match,
        Preference::Low if film.grain >= HIGH_GRAIN_MIN => weights.grain_low_mismatch,
        Preference::Medium if film.grain >= MEDIUM_GRAIN_MIN && film.grain <= MEDIUM_GRAIN_MAX => {
            weights.grain_medium_match
        }
        Preference::High if film.grain >= HIGH_GRAIN_MIN => weights.grain_high_match,
        _ => 0.0,
    };

    result.contrast = match profile.contrast {
        Preference::Low if film.contrast <= LOW_CONTRAST_MAX => weights.contrast_low_match,
        Preference::Medium
            if film.contrast >= MEDIUM_CONTRAST_MIN && film.contrast <= MEDIUM_CONTRAST_MAX =>
        {
            weights.contrast_medium_match
        }
        Preference::High if film.contrast >= HIGH_CONTRAST_MIN => weights.contrast_high_match,
        _ => 0.0,
    };

    if profile.skin_tones && film.skin_tones >= SKIN_TONE_MIN {
        result.skin_tones = weights.skin_tone_match;
    }

    result.sharpness = film.sharpness * weights.sharpness_unit * profile.sharpness_weight;
    result.latitude = film.latitude * weights.latitude_unit * profile.latitude_weight;

    if film.is_color() && profile.preferred_bias.contains(&film.color_bias) {
        result.color_bias = weights.color_bias_match;
    }

    result.score = result.ideal_match
        + result.grain
        + result.contrast
        + result.skin_tones
        + result.sharpness
        + result.latitude
        + result.color_bias;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FilmCatalog;
    use approx::assert_relative_eq;

    fn film(key: &str) -> FilmStock {
        FilmCatalog::builtin().get(key).unwrap().clone()
    }

    #[test]
    fn test_portrait_components() {
        let result = calculate_environment_fit(&film("portra_160"), Environment::Portrait, &ScoringWeights::default());
        assert_eq!(result.ideal_match, ENV_IDEAL_MATCH);
        assert_eq!(result.grain, GRAIN_LOW_MATCH);
        assert_eq!(result.contrast, CONTRAST_MEDIUM_MATCH);
        assert_eq!(result.skin_tones, SKIN_TONE_MATCH);
        assert_relative_eq!(result.sharpness, 3.5);
        assert_relative_eq!(result.latitude, 8.0);
        assert_eq!(result.color_bias, COLOR_BIAS_MATCH);
        assert_relative_eq!(result.score, 64.5);
    }

    #[test]
    fn test_coarse_grain_penalized_where_fine_grain_wanted() {
        let weights = ScoringWeights::default();
        let lomo = calculate_environment_fit(&film("lomo_800"), Environment::Landscape, &weights);
        assert_eq!(lomo.grain, GRAIN_LOW_MISMATCH);
        let ektar = calculate_environment_fit(&film("ektar_100"), Environment::Landscape, &weights);
        assert!(ektar.score > lomo.score);
    }

    #[test]
    fn test_color_bias_ignored_for_monochrome() {
        // Neutral bias is preferred for architecture, but B&W never earns it
        let result = calculate_environment_fit(&film("delta_100"), Environment::Architecture, &ScoringWeights::default());
        assert_eq!(result.color_bias, 0.0);
    }

    #[test]
    fn test_street_prefers_contrast() {
        let weights = ScoringWeights::default();
        let tri_x = calculate_environment_fit(&film("tri_x_400"), Environment::Street, &weights);
        assert_eq!(tri_x.contrast, CONTRAST_HIGH_MATCH);
        let xp2 = calculate_environment_fit(&film("xp2_super"), Environment::Street, &weights);
        assert_eq!(xp2.contrast, 0.0);
    }
}
