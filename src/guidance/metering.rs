//! Metering tips
//!
//! Primary tip depends only on the environment. The secondary tip comes from
//! a light × intent decision table, unless golden or twilight sun overrides it.

use crate::types::{Environment, Intent, LightCondition, MeteringTips, SunPosition, WeatherData};

fn primary_tip(environment: Environment) -> &'static str {
    match environment {
        Environment::Portrait => "Meter off the subject's face or use incident metering.",
        Environment::Street => "Pre-meter for the light you expect. Zone V for pavement.",
        Environment::Architecture => "Meter a grey card or neutral surface in the same light.",
        Environment::Interiors => "Meter the brightest area you want detail in, then open 2 stops.",
        Environment::Landscape => "Meter the sky 1 stop above the ground reading.",
        Environment::Nature => "Meter the foliage as a midtone; bright skies will fool the meter.",
    }
}

fn secondary_tip(light: LightCondition, intent: Intent) -> &'static str {
    use LightCondition::*;
    match light {
        Harsh | Bright => match intent {
            Intent::Emotional | Intent::Narrative => {
                "Let shadows go deep for mood. Expose for highlights."
            }
            Intent::Graphic | Intent::Abstract => {
                "Meter the highlights and let shadows fall to black for shape."
            }
            _ => "Watch contrast. Expose for shadows on negative film.",
        },
        Flat => match intent {
            Intent::Calm => "Soft light suits stillness. Take one reading and keep it.",
            _ => "Even light is forgiving. Trust your meter reading.",
        },
        Dim | Dark => match intent {
            Intent::Documentary | Intent::Narrative => {
                "Push processing can recover 1-2 stops if needed."
            }
            _ => "Bracket exposures. Err on the side of overexposure.",
        },
        Mixed => "Take multiple readings. Expose for your subject.",
    }
}

fn weather_tip(weather: &WeatherData) -> Option<&'static str> {
    match weather.sun_position {
        SunPosition::Golden => Some("Low sun fools meters. Read the shadow side and add half a stop."),
        SunPosition::Twilight => Some("The sky holds light longest. Meter the sky and open one stop."),
        _ => None,
    }
}

/// Two lines of metering advice
pub fn metering_tips(
    light: LightCondition,
    environment: Environment,
    intent: Intent,
    weather: Option<&WeatherData>,
) -> MeteringTips {
    let secondary = weather
        .and_then(weather_tip)
        .unwrap_or_else(|| secondary_tip(light, intent));

    MeteringTips {
        primary: primary_tip(environment).to_string(),
        secondary: secondary.to_string(),
    }
}
