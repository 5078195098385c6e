//! Shared Types
//!
//! Situational inputs (light, environment, intent), film classification enums,
//! the external weather record, and the per-request output structures.
//!
//! Wire names match the UI vocabulary so the same values round-trip through
//! JSON requests, exports and persisted roll state.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Situational Inputs
// ============================================================================

/// Light condition, ordered roughly from brightest to darkest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightCondition {
    Harsh,
    Bright,
    Mixed,
    Flat,
    Dim,
    Dark,
}

impl LightCondition {
    pub const ALL: [LightCondition; 6] = [
        LightCondition::Harsh,
        LightCondition::Bright,
        LightCondition::Mixed,
        LightCondition::Flat,
        LightCondition::Dim,
        LightCondition::Dark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LightCondition::Harsh => "harsh",
            LightCondition::Bright => "bright",
            LightCondition::Mixed => "mixed",
            LightCondition::Flat => "flat",
            LightCondition::Dim => "dim",
            LightCondition::Dark => "dark",
        }
    }

    /// Dim and dark light both call for tripods and reciprocity awareness
    pub fn is_low_light(&self) -> bool {
        matches!(self, LightCondition::Dim | LightCondition::Dark)
    }
}

/// Shooting environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Portrait,
    Street,
    Architecture,
    Interiors,
    Landscape,
    Nature,
}

impl Environment {
    pub const ALL: [Environment; 6] = [
        Environment::Portrait,
        Environment::Street,
        Environment::Architecture,
        Environment::Interiors,
        Environment::Landscape,
        Environment::Nature,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Portrait => "portrait",
            Environment::Street => "street",
            Environment::Architecture => "architecture",
            Environment::Interiors => "interiors",
            Environment::Landscape => "landscape",
            Environment::Nature => "nature",
        }
    }
}

/// Creative intent. Each intent carries a small bonus vector in the weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Calm,
    Graphic,
    Emotional,
    Documentary,
    Narrative,
    Abstract,
    Travel,
}

impl Intent {
    pub const ALL: [Intent; 7] = [
        Intent::Calm,
        Intent::Graphic,
        Intent::Emotional,
        Intent::Documentary,
        Intent::Narrative,
        Intent::Abstract,
        Intent::Travel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Calm => "calm",
            Intent::Graphic => "graphic",
            Intent::Emotional => "emotional",
            Intent::Documentary => "documentary",
            Intent::Narrative => "narrative",
            Intent::Abstract => "abstract",
            Intent::Travel => "travel",
        }
    }

    /// One-line shooting discipline shown alongside a recommendation
    pub fn discipline(&self) -> &'static str {
        match self {
            Intent::Calm => "Slow down. Wait for stillness.",
            Intent::Graphic => "Find the geometry. Commit to the frame.",
            Intent::Emotional => "Follow the feeling, not the subject.",
            Intent::Documentary => "Stay present. Don't chase moments.",
            Intent::Narrative => "Shoot the sequence, not the single frame.",
            Intent::Abstract => "Look past the object. Shoot the shape.",
            Intent::Travel => "Carry less. See more.",
        }
    }
}

// ============================================================================
// Film Classification
// ============================================================================

/// Film type as selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilmType {
    Color,
    Bw,
}

impl FilmType {
    /// Catalog category this film type selects
    pub fn category(&self) -> FilmCategory {
        match self {
            FilmType::Color => FilmCategory::ColorNegative,
            FilmType::Bw => FilmCategory::BwNegative,
        }
    }

    /// Label used in exports
    pub fn display_text(&self) -> &'static str {
        match self {
            FilmType::Color => "Colour",
            FilmType::Bw => "B&W",
        }
    }
}

/// Physical film format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilmFormat {
    #[serde(rename = "35mm")]
    Mm35,
    #[serde(rename = "120")]
    Medium120,
}

impl FilmFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilmFormat::Mm35 => "35mm",
            FilmFormat::Medium120 => "120",
        }
    }
}

impl fmt::Display for FilmFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog category of a film stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilmCategory {
    ColorNegative,
    BwNegative,
}

impl FilmCategory {
    pub fn is_color(&self) -> bool {
        *self == FilmCategory::ColorNegative
    }
}

/// Color rendering bias (meaningless for monochrome stocks)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBias {
    Neutral,
    Warm,
    Cool,
    NeutralWarm,
    NeutralCool,
    VeryWarm,
    GreenShift,
}

impl ColorBias {
    /// Biases that flatter golden-hour light
    pub fn is_warm(&self) -> bool {
        matches!(self, ColorBias::Warm | ColorBias::VeryWarm | ColorBias::NeutralWarm)
    }
}

/// Informational price tier (not scored)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricePoint {
    Budget,
    Consumer,
    Professional,
    Premium,
}

/// Light descriptor used in a stock's ideal-light tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightTag {
    Harsh,
    Golden,
    Mixed,
    Flat,
}

// ============================================================================
// Weather (external, read-only)
// ============================================================================

/// Sun position category reported by the weather collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SunPosition {
    Golden,
    High,
    Low,
    Twilight,
    Night,
}

/// Weather record supplied by the weather/geocoding subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub conditions: String,
    #[serde(default)]
    pub description: String,
    /// Cloud cover percentage (0-100)
    pub cloud_cover: f64,
    /// Visibility in km
    pub visibility: f64,
    pub sun_position: SunPosition,
    #[serde(default)]
    pub light_quality: String,
    #[serde(default)]
    pub shooting_note: String,
    #[serde(default)]
    pub location_name: String,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub updated_at: i64,
}

// ============================================================================
// Outputs
// ============================================================================

/// Engine output for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub film: String,
    pub ei: u32,
    pub exposure: String,
    pub adjustments: Vec<String>,
}

impl Recommendation {
    pub const NO_FILM_AVAILABLE: &'static str = "No film available";

    /// Placeholder returned when no catalog stock matches the requested type and format
    pub fn no_film_available() -> Self {
        Self {
            film: Self::NO_FILM_AVAILABLE.to_string(),
            ei: 400,
            exposure: "Check your settings".to_string(),
            adjustments: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.film == Self::NO_FILM_AVAILABLE
    }
}

/// Aperture / shutter suggestion with an advisory note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureGuidance {
    pub aperture: String,
    pub shutter: String,
    pub note: String,
}

/// Two lines of metering advice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeteringTips {
    pub primary: String,
    pub secondary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&FilmFormat::Mm35).unwrap(), "\"35mm\"");
        assert_eq!(serde_json::to_string(&FilmFormat::Medium120).unwrap(), "\"120\"");
        assert_eq!(serde_json::to_string(&FilmCategory::BwNegative).unwrap(), "\"bw_negative\"");
        assert_eq!(serde_json::to_string(&ColorBias::GreenShift).unwrap(), "\"green_shift\"");
        let light: LightCondition = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(light, LightCondition::Dark);
    }

    #[test]
    fn test_weather_accepts_minimal_record() {
        let json = r#"{"conditions":"Overcast","cloudCover":90,"visibility":12.5,"sunPosition":"high"}"#;
        let weather: WeatherData = serde_json::from_str(json).unwrap();
        assert_eq!(weather.sun_position, SunPosition::High);
        assert_eq!(weather.cloud_cover, 90.0);
        assert!(weather.location_name.is_empty());
    }

    #[test]
    fn test_placeholder() {
        let rec = Recommendation::no_film_available();
        assert!(rec.is_placeholder());
        assert_eq!(rec.ei, 400);
        assert!(rec.adjustments.is_empty());
    }
}
