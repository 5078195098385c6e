//! Guidance for a chosen stock
//!
//! - `exposure_index`: push/pull rating for the light
//! - `approach`: exposure approach sentence and adjustment notes
//! - `exposure_settings`: aperture/shutter suggestion
//! - `metering`: metering tips

pub mod approach;
pub mod exposure_index;
pub mod exposure_settings;
pub mod metering;

pub use approach::{adjustment_notes, exposure_approach, BOX_SPEED_APPROACH};
pub use exposure_index::{resolve_ei, EiPolicy, EiResolution};
pub use exposure_settings::{exposure_settings, nearest_shutter, STANDARD_APERTURES, STANDARD_SHUTTERS};
pub use metering::metering_tips;

use crate::types::{LightCondition, SunPosition, WeatherData};

/// Cloud cover above which inferred light is flat
const INFER_FLAT_CLOUD: f64 = 80.0;
/// Cloud cover below which high sun reads as harsh
const INFER_HARSH_CLOUD: f64 = 30.0;

/// Best-guess light condition from a weather record
pub fn infer_light(weather: &WeatherData) -> LightCondition {
    match weather.sun_position {
        SunPosition::Night => LightCondition::Dark,
        SunPosition::Twilight => LightCondition::Dim,
        SunPosition::Golden => LightCondition::Mixed,
        _ if weather.cloud_cover > INFER_FLAT_CLOUD => LightCondition::Flat,
        SunPosition::High if weather.cloud_cover < INFER_HARSH_CLOUD => LightCondition::Harsh,
        _ => LightCondition::Bright,
    }
}
