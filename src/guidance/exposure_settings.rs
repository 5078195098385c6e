//! Exposure settings
//!
//! Sunny 16 variations snapped to standard camera increments. A base table
//! keyed by light gives the aperture and a shutter target derived from EI;
//! environment overrides adjust the settings or the note, and weather can
//! replace the note outright.

use crate::types::{Environment, ExposureGuidance, LightCondition, SunPosition, WeatherData};
use crate::scoring::weights::HAZE_VISIBILITY_MAX_KM;

/// Shutter denominators found on most film cameras (1/N seconds)
pub const STANDARD_SHUTTERS: [u32; 13] = [1, 2, 4, 8, 15, 30, 60, 125, 250, 500, 1000, 2000, 4000];

/// Full-stop apertures, widest first
pub const STANDARD_APERTURES: [&str; 9] =
    ["f/1.4", "f/2", "f/2.8", "f/4", "f/5.6", "f/8", "f/11", "f/16", "f/22"];

/// Shutter returned for targets that cannot be snapped
pub const DEFAULT_SHUTTER: &str = "1/60";

/// Cloud cover above which the heavy-overcast note applies
const HEAVY_OVERCAST_CLOUD: f64 = 80.0;

/// Widest aperture the portrait override opens to
const PORTRAIT_APERTURE: usize = 3; // f/4

/// Snap a shutter denominator to the nearest standard speed.
///
/// Non-positive or non-finite targets return `DEFAULT_SHUTTER`. Ties go to
/// the slower speed.
pub fn nearest_shutter(target: f64) -> String {
    if !target.is_finite() || target <= 0.0 {
        return DEFAULT_SHUTTER.to_string();
    }
    let mut nearest = STANDARD_SHUTTERS[0];
    for &speed in &STANDARD_SHUTTERS[1..] {
        if (speed as f64 - target).abs() < (nearest as f64 - target).abs() {
            nearest = speed;
        }
    }
    format!("1/{}", nearest)
}

/// Base aperture index, shutter target divisor and note for a light condition
fn base_settings(light: LightCondition) -> (usize, f64, &'static str) {
    match light {
        LightCondition::Harsh => (7, 1.0, "Bright sun. Watch for harsh shadows."),
        LightCondition::Bright => (6, 1.0, "Open shade or slight overcast."),
        LightCondition::Mixed => (5, 1.0, "Variable light. Bracket if unsure."),
        LightCondition::Flat => (4, 1.0, "Overcast sky. Even, soft light."),
        LightCondition::Dim => (3, 4.0, "Low light. Consider a tripod."),
        LightCondition::Dark => (2, 8.0, "Very low light. Steady hands or support."),
    }
}

/// Note that replaces everything else when weather calls for it
fn weather_note(weather: &WeatherData) -> Option<&'static str> {
    if weather.sun_position == SunPosition::Golden {
        Some("Golden hour. Meter for the highlights and keep the warmth.")
    } else if weather.sun_position == SunPosition::Twilight {
        Some("Blue hour. Light falls fast, so bracket and brace the camera.")
    } else if weather.visibility < HAZE_VISIBILITY_MAX_KM {
        Some("Haze flattens contrast. Add a stop if the scene reads grey.")
    } else if weather.cloud_cover > HEAVY_OVERCAST_CLOUD {
        Some("Heavy overcast. Open up a stop from the reading if unsure.")
    } else {
        None
    }
}

/// Aperture, shutter and note for a light condition, EI and environment
pub fn exposure_settings(
    light: LightCondition,
    ei: u32,
    environment: Environment,
    weather: Option<&WeatherData>,
) -> ExposureGuidance {
    let (mut aperture, divisor, base_note) = base_settings(light);
    let mut target = ei as f64 / divisor;
    let mut note = base_note;

    match environment {
        Environment::Interiors => {
            note = "Interior light. Meter for highlights you want to keep.";
            if matches!(light, LightCondition::Harsh | LightCondition::Bright) {
                aperture = 4; // f/5.6
                target = ei as f64 / 4.0;
            }
        }
        Environment::Portrait => {
            note = "Open up for shallow depth. Meter for skin.";
            if aperture > PORTRAIT_APERTURE {
                // Each stop opened doubles the shutter speed
                let stops = (aperture - PORTRAIT_APERTURE) as i32;
                target *= libm::pow(2.0, stops as f64);
                aperture = PORTRAIT_APERTURE;
            }
        }
        Environment::Landscape => note = "Stop down for depth. Meter for midtones.",
        Environment::Architecture => note = "Keep verticals true. Meter the facade, not the sky.",
        Environment::Nature => note = "Meter the greens as a midtone. Watch bright skies.",
        Environment::Street => {}
    }

    if let Some(override_note) = weather.and_then(weather_note) {
        note = override_note;
    }

    ExposureGuidance {
        aperture: STANDARD_APERTURES[aperture].to_string(),
        shutter: nearest_shutter(target),
        note: note.to_string(),
    }
}
