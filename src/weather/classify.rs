//! Weather classification
//!
//! Pure functions that turn a raw observation (cloud cover, visibility,
//! WMO weather code, day flag) plus sunrise/sunset into a `WeatherData`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{SunPosition, WeatherData};

// ============================================================================
// WMO WEATHER CODES
// ============================================================================

/// (code, condition, description)
static WEATHER_CODES: &[(u16, &str, &str)] = &[
    (0, "Clear", "Clear sky"),
    (1, "Mostly Clear", "Mainly clear"),
    (2, "Partly Cloudy", "Partly cloudy"),
    (3, "Overcast", "Overcast"),
    (45, "Foggy", "Fog"),
    (48, "Foggy", "Depositing rime fog"),
    (51, "Light Drizzle", "Light drizzle"),
    (53, "Drizzle", "Moderate drizzle"),
    (55, "Heavy Drizzle", "Dense drizzle"),
    (61, "Light Rain", "Slight rain"),
    (63, "Rain", "Moderate rain"),
    (65, "Heavy Rain", "Heavy rain"),
    (71, "Light Snow", "Slight snow"),
    (73, "Snow", "Moderate snow"),
    (75, "Heavy Snow", "Heavy snow"),
    (77, "Snow Grains", "Snow grains"),
    (80, "Light Showers", "Slight rain showers"),
    (81, "Showers", "Moderate rain showers"),
    (82, "Heavy Showers", "Violent rain showers"),
    (85, "Snow Showers", "Slight snow showers"),
    (86, "Heavy Snow", "Heavy snow showers"),
    (95, "Thunderstorm", "Thunderstorm"),
    (96, "Thunderstorm", "Thunderstorm with slight hail"),
    (99, "Thunderstorm", "Thunderstorm with heavy hail"),
];

/// Condition and description for a WMO code; unknown codes map to "Unknown"
pub fn describe_weather_code(code: u16) -> (&'static str, &'static str) {
    WEATHER_CODES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|&(_, condition, description)| (condition, description))
        .unwrap_or(("Unknown", "Unknown conditions"))
}

// ============================================================================
// SUN POSITION
// ============================================================================

/// Minutes either side of sunrise/sunset that count as twilight at night
const TWILIGHT_MINUTES: f64 = 30.0;
/// Fraction of daylight at each end that counts as golden
const GOLDEN_FRACTION: f64 = 0.1;
/// Fraction of daylight at each end that counts as low sun
const LOW_SUN_FRACTION: f64 = 0.2;

pub fn sun_position(
    now: DateTime<Utc>,
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
    is_day: bool,
) -> SunPosition {
    if !is_day {
        let minutes_to_sunrise = (sunrise - now).num_seconds() as f64 / 60.0;
        let minutes_from_sunset = (now - sunset).num_seconds() as f64 / 60.0;

        if minutes_to_sunrise > 0.0 && minutes_to_sunrise < TWILIGHT_MINUTES {
            return SunPosition::Twilight;
        }
        if minutes_from_sunset > 0.0 && minutes_from_sunset < TWILIGHT_MINUTES {
            return SunPosition::Twilight;
        }
        return SunPosition::Night;
    }

    let day_length = (sunset - sunrise).num_milliseconds() as f64;
    if day_length <= 0.0 {
        // Polar day/night data: no meaningful progress
        return SunPosition::High;
    }
    let progress = (now - sunrise).num_milliseconds() as f64 / day_length;

    if progress < GOLDEN_FRACTION || progress > 1.0 - GOLDEN_FRACTION {
        SunPosition::Golden
    } else if progress < LOW_SUN_FRACTION || progress > 1.0 - LOW_SUN_FRACTION {
        SunPosition::Low
    } else {
        SunPosition::High
    }
}

// ============================================================================
// LIGHT QUALITY & SHOOTING NOTES
// ============================================================================

pub fn light_quality(cloud_cover: f64, visibility_km: f64, sun: SunPosition) -> &'static str {
    if visibility_km < 2.0 {
        return "Diffused, atmospheric";
    }
    if visibility_km < 5.0 {
        return "Soft, hazy";
    }

    match sun {
        SunPosition::Night => return "Available light only",
        SunPosition::Twilight => return "Soft, directional twilight",
        SunPosition::Golden => {
            return if cloud_cover < 30.0 {
                "Warm, directional golden light"
            } else if cloud_cover < 60.0 {
                "Filtered golden light"
            } else {
                "Diffused warm light"
            };
        }
        _ => {}
    }

    if cloud_cover > 80.0 {
        "Even, shadowless"
    } else if cloud_cover > 50.0 {
        "Soft, diffused"
    } else if cloud_cover > 20.0 {
        "Mixed sun and clouds"
    } else if sun == SunPosition::High {
        "Harsh, high contrast"
    } else {
        "Directional with defined shadows"
    }
}

pub fn shooting_note(cloud_cover: f64, visibility_km: f64, sun: SunPosition, code: u16) -> &'static str {
    // Bad weather first
    if code >= 95 {
        return "Protect your gear. Dramatic light possible between storms.";
    }
    if code >= 61 {
        return "Overcast light is flattering for portraits. Watch for lens droplets.";
    }
    if code >= 45 {
        return "Fog creates depth and mood. Increase exposure +1 stop.";
    }

    match sun {
        SunPosition::Night => return "Use fast film or push. Tripod recommended for sharp images.",
        SunPosition::Twilight => return "Blue hour magic. Meter carefully, bracket if unsure.",
        SunPosition::Golden => {
            return if cloud_cover < 30.0 {
                "Prime shooting time. Side-light for texture, backlight for glow."
            } else {
                "Soft golden light. Great for any subject."
            };
        }
        _ => {}
    }

    if visibility_km < 5.0 {
        return "Atmospheric conditions. Use haze for depth in landscapes.";
    }

    if sun == SunPosition::High {
        return if cloud_cover > 60.0 {
            "Clouds taming harsh light. Good for outdoor portraits."
        } else if cloud_cover > 30.0 {
            "Watch for shifting light. Meter frequently."
        } else {
            "Seek open shade or use fill. Harsh shadows on faces."
        };
    }

    if cloud_cover > 50.0 {
        "Overcast is your softbox. Great for portraits and details."
    } else {
        "Good directional light. Use shadows creatively."
    }
}

// ============================================================================
// ASSEMBLY
// ============================================================================

/// Raw reading from the weather provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub cloud_cover: f64,
    /// Meters
    pub visibility_m: f64,
    pub weather_code: u16,
    pub is_day: bool,
}

/// Build the weather record consumed by the recommendation engine
pub fn build_weather_data(
    observation: &Observation,
    now: DateTime<Utc>,
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
    location_name: String,
) -> WeatherData {
    let (conditions, description) = describe_weather_code(observation.weather_code);
    let sun = sun_position(now, sunrise, sunset, observation.is_day);
    let visibility_km = observation.visibility_m.max(0.0) / 1000.0;
    let cloud_cover = observation.cloud_cover;

    WeatherData {
        conditions: conditions.to_string(),
        description: description.to_string(),
        cloud_cover,
        visibility: (visibility_km * 10.0).round() / 10.0,
        sun_position: sun,
        light_quality: light_quality(cloud_cover, visibility_km, sun).to_string(),
        shooting_note: shooting_note(cloud_cover, visibility_km, sun, observation.weather_code).to_string(),
        location_name,
        updated_at: Utc::now().timestamp_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day() -> (DateTime<Utc>, DateTime<Utc>) {
        let sunrise = Utc.with_ymd_and_hms(2024, 6, 1, 6, 0, 0).unwrap();
        let sunset = Utc.with_ymd_and_hms(2024, 6, 1, 16, 0, 0).unwrap();
        (sunrise, sunset)
    }

    #[test]
    fn test_weather_codes() {
        assert_eq!(describe_weather_code(3), ("Overcast", "Overcast"));
        assert_eq!(describe_weather_code(96), ("Thunderstorm", "Thunderstorm with slight hail"));
        assert_eq!(describe_weather_code(42), ("Unknown", "Unknown conditions"));
    }

    #[test]
    fn test_sun_position_by_day() {
        let (sunrise, sunset) = day();
        // 10 hour day: golden is the first/last hour, low the next hour in
        assert_eq!(sun_position(sunrise + Duration::minutes(30), sunrise, sunset, true), SunPosition::Golden);
        assert_eq!(sun_position(sunrise + Duration::minutes(90), sunrise, sunset, true), SunPosition::Low);
        assert_eq!(sun_position(sunrise + Duration::hours(5), sunrise, sunset, true), SunPosition::High);
        assert_eq!(sun_position(sunset - Duration::minutes(90), sunrise, sunset, true), SunPosition::Low);
        assert_eq!(sun_position(sunset - Duration::minutes(10), sunrise, sunset, true), SunPosition::Golden);
    }

    #[test]
    fn test_sun_position_at_night() {
        let (sunrise, sunset) = day();
        assert_eq!(sun_position(sunrise - Duration::minutes(20), sunrise, sunset, false), SunPosition::Twilight);
        assert_eq!(sun_position(sunset + Duration::minutes(20), sunrise, sunset, false), SunPosition::Twilight);
        assert_eq!(sun_position(sunset + Duration::minutes(45), sunrise, sunset, false), SunPosition::Night);
    }

    #[test]
    fn test_light_quality_order() {
        // Fog wins over everything
        assert_eq!(light_quality(0.0, 1.0, SunPosition::Golden), "Diffused, atmospheric");
        assert_eq!(light_quality(10.0, 20.0, SunPosition::Golden), "Warm, directional golden light");
        assert_eq!(light_quality(90.0, 20.0, SunPosition::High), "Even, shadowless");
        assert_eq!(light_quality(5.0, 20.0, SunPosition::High), "Harsh, high contrast");
        assert_eq!(light_quality(5.0, 20.0, SunPosition::Low), "Directional with defined shadows");
    }

    #[test]
    fn test_shooting_note_bad_weather_first() {
        assert!(shooting_note(0.0, 20.0, SunPosition::Golden, 95).starts_with("Protect your gear"));
        assert!(shooting_note(0.0, 20.0, SunPosition::Golden, 45).starts_with("Fog creates"));
        assert!(shooting_note(0.0, 20.0, SunPosition::Night, 0).starts_with("Use fast film"));
        assert!(shooting_note(10.0, 20.0, SunPosition::High, 1).starts_with("Seek open shade"));
        assert!(shooting_note(70.0, 20.0, SunPosition::Low, 3).starts_with("Overcast is your softbox"));
    }

    #[test]
    fn test_build_weather_data() {
        let (sunrise, sunset) = day();
        let obs = Observation {
            cloud_cover: 85.0,
            visibility_m: 12_345.0,
            weather_code: 3,
            is_day: true,
        };
        let data = build_weather_data(&obs, sunrise + Duration::hours(5), sunrise, sunset, "Lisbon".to_string());
        assert_eq!(data.conditions, "Overcast");
        assert_eq!(data.visibility, 12.3);
        assert_eq!(data.sun_position, SunPosition::High);
        assert_eq!(data.light_quality, "Even, shadowless");
        assert_eq!(data.location_name, "Lisbon");
        assert!(data.updated_at > 0);
    }
}
