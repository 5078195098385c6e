//! WEATHER FIT
//!
//! Only applies when a weather record is present; absent weather scores 0.

use serde::Serialize;

use crate::catalog::FilmStock;
use crate::types::{SunPosition, WeatherData};
use super::weights::*;

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct WeatherFitResult {
    pub score: f64,
    pub cloud: f64,
    pub visibility: f64,
    pub golden_bias: f64,
    /// Number of the stock's ideal-light tags favored by the sun position
    pub light_tag_matches: usize,
}

/// Calculate the weather-fit term
pub fn calculate_weather_fit(
    film: &FilmStock,
    weather: Option<&WeatherData>,
    weights: &ScoringWeights,
) -> WeatherFitResult {
    let Some(weather) = weather else {
        return WeatherFitResult::default();
    };

    let mut result = WeatherFitResult::default();

    if weather.cloud_cover > OVERCAST_CLOUD_MIN {
        if film.latitude >= HIGH_LATITUDE_MIN {
            result.cloud += weights.weather_overcast_latitude;
        }
    } else if weather.cloud_cover < CLEAR_CLOUD_MAX {
        if film.contrast >= HIGH_CONTRAST_MIN {
            result.cloud += weights.weather_clear_contrast;
        }
        if film.saturation >= TRAIT_HIGH_MIN {
            result.cloud += weights.weather_clear_saturation;
        }
    }

    if weather.visibility < HAZE_VISIBILITY_MAX_KM {
        if film.contrast <= LOW_CONTRAST_MAX {
            result.visibility += weights.weather_haze_low_contrast;
        }
    } else if weather.visibility > CLEAR_AIR_VISIBILITY_MIN_KM
        && film.saturation >= WEATHER_HIGH_SATURATION_MIN
    {
        result.visibility += weights.weather_clear_air_saturation;
    }

    if weather.sun_position == SunPosition::Golden && film.is_color() && film.color_bias.is_warm() {
        result.golden_bias = weights.weather_golden_warm_bias;
    }

    let favored = sun_light_tags(weather.sun_position);
    result.light_tag_matches = film
        .ideal_light
        .iter()
        .filter(|tag| favored.contains(tag))
        .count();

    result.score = result.cloud
        + result.visibility
        + result.golden_bias
        + result.light_tag_matches as f64 * weights.weather_light_tag_match;
    result
}
