//! Exposure approach text and adjustment notes

use crate::catalog::FilmStock;
use crate::types::{FilmType, LightCondition};
use super::exposure_index::EiResolution;

/// Exposure text when neither light nor weather is known
pub const BOX_SPEED_APPROACH: &str = "Rate at box speed and meter normally.";

pub const TRIPOD_NOTE: &str = "Consider a tripod for sharpness";

/// One-sentence exposure approach by film type and light
pub fn exposure_approach(film_type: FilmType, light: LightCondition) -> &'static str {
    use LightCondition::*;
    match (film_type, light) {
        (FilmType::Color, Harsh) => "Expose for shadows. Film latitude will hold highlights.",
        (FilmType::Color, Bright) => "Meter for midtones. Slight overexposure is safe.",
        (FilmType::Color, Mixed) => "Bracket if unsure. Expose for the most important tones.",
        (FilmType::Color, Flat) => "Trust your meter. Overcast light is forgiving.",
        (FilmType::Color, Dim) => "Open up and embrace the grain. Shadows can go.",
        (FilmType::Color, Dark) => "Push if needed. Rate at box speed minimum.",
        (FilmType::Bw, Harsh) => "Expose for shadows, develop for highlights.",
        (FilmType::Bw, Bright) => "Zone system: place shadows on Zone III.",
        (FilmType::Bw, Mixed) => "Meter for skin or main subject.",
        (FilmType::Bw, Flat) => "Even light needs even exposure. Trust your reading.",
        (FilmType::Bw, Dim) => "Shoot wide open. Push process if under EI 800.",
        (FilmType::Bw, Dark) => "Rate at EI 1600+. Push 2 stops in development.",
    }
}

/// Format a duration in seconds without a trailing ".0"
fn fmt_seconds(secs: f64) -> String {
    if secs.fract() == 0.0 {
        format!("{:.0}", secs)
    } else {
        format!("{}", secs)
    }
}

/// Development and handling notes for a resolved rating
pub fn adjustment_notes(film: &FilmStock, light: LightCondition, resolution: &EiResolution) -> Vec<String> {
    let mut notes = Vec::new();

    if resolution.push_stops > 0 {
        notes.push(format!("Push {} stop(s) in development", resolution.push_stops));
        if resolution.visibility_push {
            notes.push("Low visibility: one extra stop of push included".to_string());
        }
    }
    if resolution.pull_stops > 0 {
        notes.push(format!("Pull {} stop(s) in development", resolution.pull_stops));
    }

    if light.is_low_light() {
        notes.push(TRIPOD_NOTE.to_string());
        notes.push(format!(
            "Reciprocity failure past {}s: lengthen long exposures",
            fmt_seconds(film.reciprocity_start)
        ));
    }

    notes
}
