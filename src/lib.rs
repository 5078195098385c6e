//! Roll Planner
//!
//! Film stock recommendation and exposure guidance for analog photography,
//! plus roll tracking and export.
//!
//! - `catalog/`: static film catalog and the film picker listing
//! - `scoring/`: weighted scoring terms (ISO, environment, intent, weather, reciprocity)
//! - `scorer`: ranks the catalog and assembles the recommendation
//! - `guidance/`: EI resolution, exposure settings, metering tips
//! - `weather/`: weather classification; with `api`, a cached Open-Meteo client
//! - `roll/`: frame-by-frame roll log and JSON/CSV export
//!
//! The recommendation path is pure: no I/O, no hidden state, identical
//! output for identical input.

pub mod types;
pub mod error;
pub mod utils;
pub mod catalog;
pub mod scoring;
pub mod guidance;
pub mod scorer;
pub mod weather;
pub mod roll;
pub mod config;

#[cfg(feature = "api")]
pub mod api_server;

use std::sync::OnceLock;

// Re-export commonly used types
pub use types::{
    Environment, ExposureGuidance, FilmFormat, FilmType, Intent, LightCondition, MeteringTips,
    Recommendation, SunPosition, WeatherData,
};
pub use error::{PlannerError, PlannerResult};
pub use catalog::{FilmCatalog, FilmStock};
pub use scoring::{ScoreBreakdown, ScoringWeights};
pub use guidance::{EiPolicy, EiResolution};
pub use scorer::{FilmScorer, RankedFilm, RecommendationRequest, ShootingPlan};
pub use roll::{RollConditions, RollSession};
pub use config::PlannerConfig;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};

/// Scorer over the built-in catalog and default weights, built on first use
pub fn default_scorer() -> &'static FilmScorer {
    static SCORER: OnceLock<FilmScorer> = OnceLock::new();
    SCORER.get_or_init(FilmScorer::default)
}

// ============================================================================
// Top-level entry points (built-in catalog)
// ============================================================================

pub fn get_recommendation(
    light: LightCondition,
    environment: Environment,
    intent: Intent,
    weather: Option<&WeatherData>,
    film_type: FilmType,
    film_format: FilmFormat,
) -> Recommendation {
    let request = RecommendationRequest {
        light,
        environment,
        intent,
        weather: weather.cloned(),
        film_type,
        film_format,
    };
    default_scorer().recommend(&request)
}

/// Guidance for a stock chosen by catalog key; unknown keys are an error
pub fn get_guidance_for_film(
    film_key: &str,
    light: Option<LightCondition>,
    weather: Option<&WeatherData>,
    film_type: FilmType,
) -> PlannerResult<Recommendation> {
    default_scorer().guidance_for_named_film(film_key, light, weather, film_type)
}

pub fn get_exposure_guidance(
    light: LightCondition,
    ei: u32,
    environment: Environment,
    weather: Option<&WeatherData>,
) -> ExposureGuidance {
    guidance::exposure_settings(light, ei, environment, weather)
}

pub fn get_metering_tips(
    light: LightCondition,
    environment: Environment,
    intent: Intent,
    weather: Option<&WeatherData>,
) -> MeteringTips {
    guidance::metering_tips(light, environment, intent, weather)
}
