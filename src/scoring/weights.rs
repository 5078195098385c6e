//! Canonical weight table
//!
//! Every scoring weight is a named constant. `ScoringWeights::default()` is built
//! from these constants; a JSON file can override any subset of them.
//!
//! Thresholds (what counts as "low grain", "heavy overcast", ...) are fixed
//! constants and are not part of the override table.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::types::{ColorBias, Environment, Intent, LightCondition, LightTag, SunPosition};

// ============================================================================
// WEIGHTS
// ============================================================================

/// Points per community-score unit
pub const COMMUNITY_WEIGHT: f64 = 2.0;

// --- ISO fit ---
pub const ISO_IN_BAND: f64 = 20.0;
pub const ISO_AT_IDEAL: f64 = 10.0;
/// Within one stop of the band's ideal (but not equal to it)
pub const ISO_NEAR_IDEAL: f64 = 5.0;
pub const ISO_PUSH_REACHABLE: f64 = 10.0;
pub const ISO_PUSH_UNREACHABLE: f64 = -25.0;
pub const ISO_PULL_REACHABLE: f64 = 5.0;
pub const ISO_PULL_UNREACHABLE: f64 = -10.0;

// --- Environment fit ---
pub const ENV_IDEAL_MATCH: f64 = 15.0;
pub const GRAIN_LOW_MATCH: f64 = 10.0;
pub const GRAIN_MEDIUM_MATCH: f64 = 5.0;
pub const GRAIN_HIGH_MATCH: f64 = 5.0;
/// Environment wants fine grain but the stock is coarse
pub const GRAIN_LOW_MISMATCH: f64 = -8.0;
pub const CONTRAST_LOW_MATCH: f64 = 5.0;
pub const CONTRAST_MEDIUM_MATCH: f64 = 5.0;
pub const CONTRAST_HIGH_MATCH: f64 = 10.0;
pub const SKIN_TONE_MATCH: f64 = 15.0;
/// Points per sharpness unit before the environment multiplier
pub const SHARPNESS_UNIT: f64 = 1.0;
/// Points per latitude unit before the environment multiplier
pub const LATITUDE_UNIT: f64 = 1.0;
pub const COLOR_BIAS_MATCH: f64 = 8.0;

// --- Intent fit ---
/// Points per unit of an intent's saturation/contrast/latitude bonus
pub const INTENT_TRAIT_UNIT: f64 = 5.0;
/// Points per unit of grain tolerance (flat bonus and penalty relief)
pub const GRAIN_TOLERANCE_UNIT: f64 = 3.0;
pub const HIGH_GRAIN_PENALTY: f64 = -6.0;

// --- Weather fit ---
pub const WEATHER_OVERCAST_LATITUDE: f64 = 8.0;
pub const WEATHER_CLEAR_CONTRAST: f64 = 5.0;
pub const WEATHER_CLEAR_SATURATION: f64 = 5.0;
pub const WEATHER_HAZE_LOW_CONTRAST: f64 = 5.0;
pub const WEATHER_CLEAR_AIR_SATURATION: f64 = 5.0;
pub const WEATHER_GOLDEN_WARM_BIAS: f64 = 8.0;
/// Per matching ideal-light tag
pub const WEATHER_LIGHT_TAG_MATCH: f64 = 4.0;

// --- Reciprocity (dim/dark only) ---
pub const RECIPROCITY_TOLERANT: f64 = 8.0;
pub const RECIPROCITY_MODERATE: f64 = 3.0;

// ============================================================================
// THRESHOLDS
// ============================================================================

pub const LOW_GRAIN_MAX: f64 = 3.0;
pub const MEDIUM_GRAIN_MIN: f64 = 3.0;
pub const MEDIUM_GRAIN_MAX: f64 = 6.0;
pub const HIGH_GRAIN_MIN: f64 = 6.0;

pub const LOW_CONTRAST_MAX: f64 = 5.0;
pub const MEDIUM_CONTRAST_MIN: f64 = 4.0;
pub const MEDIUM_CONTRAST_MAX: f64 = 6.0;
pub const HIGH_CONTRAST_MIN: f64 = 6.0;

pub const SKIN_TONE_MIN: f64 = 8.0;

/// Saturation/contrast at or above this reads as "high" for intent scoring
pub const TRAIT_HIGH_MIN: f64 = 6.0;
/// Saturation/contrast at or below this reads as "low" for intent scoring
pub const TRAIT_LOW_MAX: f64 = 5.0;
pub const HIGH_LATITUDE_MIN: f64 = 7.0;
pub const GRAINY_MIN: f64 = 7.0;

pub const OVERCAST_CLOUD_MIN: f64 = 70.0;
pub const CLEAR_CLOUD_MAX: f64 = 30.0;
pub const HAZE_VISIBILITY_MAX_KM: f64 = 5.0;
pub const CLEAR_AIR_VISIBILITY_MIN_KM: f64 = 20.0;
pub const WEATHER_HIGH_SATURATION_MIN: f64 = 7.0;

pub const RECIPROCITY_TOLERANT_SECS: f64 = 10.0;
pub const RECIPROCITY_MODERATE_SECS: f64 = 1.0;

// ============================================================================
// WEIGHT TABLE
// ============================================================================

/// Overridable weight table. Missing JSON fields fall back to the constants above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub community: f64,

    pub iso_in_band: f64,
    pub iso_at_ideal: f64,
    pub iso_near_ideal: f64,
    pub iso_push_reachable: f64,
    pub iso_push_unreachable: f64,
    pub iso_pull_reachable: f64,
    pub iso_pull_unreachable: f64,

    pub env_ideal_match: f64,
    pub grain_low_match: f64,
    pub grain_medium_match: f64,
    pub grain_high_match: f64,
    pub grain_low_mismatch: f64,
    pub contrast_low_match: f64,
    pub contrast_medium_match: f64,
    pub contrast_high_match: f64,
    pub skin_tone_match: f64,
    pub sharpness_unit: f64,
    pub latitude_unit: f64,
    pub color_bias_match: f64,

    pub intent_trait_unit: f64,
    pub grain_tolerance_unit: f64,
    pub high_grain_penalty: f64,

    pub weather_overcast_latitude: f64,
    pub weather_clear_contrast: f64,
    pub weather_clear_saturation: f64,
    pub weather_haze_low_contrast: f64,
    pub weather_clear_air_saturation: f64,
    pub weather_golden_warm_bias: f64,
    pub weather_light_tag_match: f64,

    pub reciprocity_tolerant: f64,
    pub reciprocity_moderate: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            community: COMMUNITY_WEIGHT,

            iso_in_band: ISO_IN_BAND,
            iso_at_ideal: ISO_AT_IDEAL,
            iso_near_ideal: ISO_NEAR_IDEAL,
            iso_push_reachable: ISO_PUSH_REACHABLE,
            iso_push_unreachable: ISO_PUSH_UNREACHABLE,
            iso_pull_reachable: ISO_PULL_REACHABLE,
            iso_pull_unreachable: ISO_PULL_UNREACHABLE,

            env_ideal_match: ENV_IDEAL_MATCH,
            grain_low_match: GRAIN_LOW_MATCH,
            grain_medium_match: GRAIN_MEDIUM_MATCH,
            grain_high_match: GRAIN_HIGH_MATCH,
            grain_low_mismatch: GRAIN_LOW_MISMATCH,
            contrast_low_match: CONTRAST_LOW_MATCH,
            contrast_medium_match: CONTRAST_MEDIUM_MATCH,
            contrast_high_match: CONTRAST_HIGH_MATCH,
            skin_tone_match: SKIN_TONE_MATCH,
            sharpness_unit: SHARPNESS_UNIT,
            latitude_unit: LATITUDE_UNIT,
            color_bias_match: COLOR_BIAS_MATCH,

            intent_trait_unit: INTENT_TRAIT_UNIT,
            grain_tolerance_unit: GRAIN_TOLERANCE_UNIT,
            high_grain_penalty: HIGH_GRAIN_PENALTY,

            weather_overcast_latitude: WEATHER_OVERCAST_LATITUDE,
            weather_clear_contrast: WEATHER_CLEAR_CONTRAST,
            weather_clear_saturation: WEATHER_CLEAR_SATURATION,
            weather_haze_low_contrast: WEATHER_HAZE_LOW_CONTRAST,
            weather_clear_air_saturation: WEATHER_CLEAR_AIR_SATURATION,
            weather_golden_warm_bias: WEATHER_GOLDEN_WARM_BIAS,
            weather_light_tag_match: WEATHER_LIGHT_TAG_MATCH,

            reciprocity_tolerant: RECIPROCITY_TOLERANT,
            reciprocity_moderate: RECIPROCITY_MODERATE,
        }
    }
}

impl ScoringWeights {
    /// Load a weight override table from JSON
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read weight table: {:?}", path))?;

        let weights: ScoringWeights = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse weight table JSON")?;

        if let Some(field) = weights.first_non_finite() {
            anyhow::bail!("Weight '{}' is not a finite number", field);
        }

        tracing::info!("Loaded scoring weights from {:?}", path);
        Ok(weights)
    }

    fn first_non_finite(&self) -> Option<String> {
        let value = serde_json::to_value(self).ok()?;
        value.as_object()?.iter().find_map(|(name, v)| {
            match v.as_f64() {
                Some(x) if x.is_finite() => None,
                _ => Some(name.clone()),
            }
        })
    }
}

// ============================================================================
// LOOKUP TABLES
// ============================================================================

/// ISO need for a light condition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightBand {
    pub min: f64,
    pub ideal: f64,
    pub max: f64,
}

impl LightBand {
    pub fn contains(&self, iso: f64) -> bool {
        iso >= self.min && iso <= self.max
    }
}

pub fn light_band(light: LightCondition) -> LightBand {
    let (min, ideal, max) = match light {
        LightCondition::Harsh => (50.0, 100.0, 400.0),
        LightCondition::Bright => (100.0, 200.0, 400.0),
        LightCondition::Mixed => (200.0, 400.0, 800.0),
        LightCondition::Flat => (200.0, 400.0, 800.0),
        LightCondition::Dim => (400.0, 800.0, 3200.0),
        LightCondition::Dark => (800.0, 1600.0, 3200.0),
    };
    LightBand { min, ideal, max }
}

/// Preferred bucket for grain or contrast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    Low,
    Medium,
    High,
    Any,
}

/// What an environment asks of a stock
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentProfile {
    pub grain: Preference,
    pub contrast: Preference,
    pub skin_tones: bool,
    pub sharpness_weight: f64,
    pub latitude_weight: f64,
    pub preferred_bias: &'static [ColorBias],
}

#[rustfmt::skip]
pub fn environment_profile(environment: Environment) -> EnvironmentProfile {
    use ColorBias::*;
    use Preference::*;
    match environment {
        Environment::Portrait => EnvironmentProfile {
            grain: Low, contrast: Medium, skin_tones: true,
            sharpness_weight: 0.5, latitude_weight: 1.0,
            preferred_bias: &[Warm, NeutralWarm],
        },
        Environment::Street => EnvironmentProfile {
            grain: Any, contrast: High, skin_tones: false,
            sharpness_weight: 0.5, latitude_weight: 1.5,
            preferred_bias: &[Neutral, NeutralWarm, Cool],
        },
        Environment::Architecture => EnvironmentProfile {
            grain: Low, contrast: Medium, skin_tones: false,
            sharpness_weight: 2.0, latitude_weight: 0.5,
            preferred_bias: &[Neutral, NeutralCool],
        },
        Environment::Interiors => EnvironmentProfile {
            grain: Medium, contrast: Low, skin_tones: false,
            sharpness_weight: 1.0, latitude_weight: 1.5,
            preferred_bias: &[Warm, NeutralWarm],
        },
        Environment::Landscape => EnvironmentProfile {
            grain: Low, contrast: Medium, skin_tones: false,
            sharpness_weight: 1.5, latitude_weight: 1.0,
            preferred_bias: &[Neutral, NeutralCool, Cool],
        },
        Environment::Nature => EnvironmentProfile {
            grain: Low, contrast: Medium, skin_tones: false,
            sharpness_weight: 1.5, latitude_weight: 1.0,
            preferred_bias: &[Neutral, GreenShift, NeutralWarm],
        },
    }
}

/// Small bonus vector carried by each intent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntentModifier {
    pub saturation_bonus: f64,
    pub contrast_bonus: f64,
    pub grain_tolerance: f64,
    pub latitude_bonus: f64,
}

pub fn intent_modifier(intent: Intent) -> IntentModifier {
    let (saturation_bonus, contrast_bonus, grain_tolerance, latitude_bonus) = match intent {
        Intent::Calm => (-1.0, -1.0, 0.0, 1.0),
        Intent::Graphic => (1.0, 2.0, 0.0, 0.0),
        Intent::Emotional => (0.0, 0.0, 2.0, 0.0),
        Intent::Documentary => (0.0, 0.0, 1.0, 1.0),
        Intent::Narrative => (1.0, 0.0, 1.0, 1.0),
        Intent::Abstract => (0.0, 1.0, 2.0, 0.0),
        Intent::Travel => (1.0, 0.0, 0.0, 2.0),
    };
    IntentModifier {
        saturation_bonus,
        contrast_bonus,
        grain_tolerance,
        latitude_bonus,
    }
}

/// Light tags a sun position favors
pub fn sun_light_tags(sun: SunPosition) -> &'static [LightTag] {
    match sun {
        SunPosition::Golden => &[LightTag::Golden],
        SunPosition::High => &[LightTag::Harsh],
        SunPosition::Low => &[LightTag::Golden, LightTag::Mixed],
        SunPosition::Twilight => &[LightTag::Flat, LightTag::Mixed],
        SunPosition::Night => &[LightTag::Flat],
    }
}
