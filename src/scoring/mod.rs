//! Scoring terms for ranking film stocks
//!
//! Each term lives in its own module and returns a small result struct.
//! `score_film` sums them into a `ScoreBreakdown`.

pub mod weights;
pub mod iso_fit;
pub mod environment_fit;
pub mod intent_fit;
pub mod weather_fit;
pub mod reciprocity;

pub use weights::{light_band, LightBand, ScoringWeights};
pub use iso_fit::{calculate_iso_fit, IsoFit, IsoFitResult};
pub use environment_fit::{calculate_environment_fit, EnvironmentFitResult};
pub use intent_fit::{calculate_intent_fit, IntentFitResult};
pub use weather_fit::{calculate_weather_fit, WeatherFitResult};
pub use reciprocity::calculate_reciprocity;

use serde::Serialize;

use crate::catalog::FilmStock;
use crate::types::{Environment, Intent, LightCondition, WeatherData};

/// Situational inputs shared by every scoring term
#[derive(Debug, Clone, Copy)]
pub struct Conditions<'a> {
    pub light: LightCondition,
    pub environment: Environment,
    pub intent: Intent,
    pub weather: Option<&'a WeatherData>,
}

/// Per-term contributions for one stock
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub community: f64,
    pub iso: f64,
    pub environment: f64,
    pub intent: f64,
    pub weather: f64,
    pub reciprocity: f64,
    pub total: f64,
}

/// Score one stock against the conditions
pub fn score_film(film: &FilmStock, conditions: &Conditions<'_>, weights: &ScoringWeights) -> ScoreBreakdown {
    let community = film.community_score * weights.community;
    let iso = calculate_iso_fit(film, conditions.light, weights).score;
    let environment = calculate_environment_fit(film, conditions.environment, weights).score;
    let intent = calculate_intent_fit(film, conditions.intent, weights).score;
    let weather = calculate_weather_fit(film, conditions.weather, weights).score;
    let reciprocity = calculate_reciprocity(film, conditions.light, weights);

    ScoreBreakdown {
        community,
        iso,
        environment,
        intent,
        weather,
        reciprocity,
        total: community + iso + environment + intent + weather + reciprocity,
    }
}
