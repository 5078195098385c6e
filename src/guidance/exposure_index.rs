//! Exposure-index resolution
//!
//! Rates the chosen stock for the light: push when it is too slow for the
//! band, pull when it is too fast (policy permitting), otherwise box speed.

use serde::{Deserialize, Serialize};

use crate::catalog::FilmStock;
use crate::scoring::light_band;
use crate::types::{LightCondition, WeatherData};
use crate::utils::{apply_stops, whole_stops_up};

/// Visibility (km) below which an extra push stop is applied
pub const LOW_VISIBILITY_KM: f64 = 3.0;

/// Versioned EI behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EiPolicy {
    /// Rate fast stocks down when they overshoot the light band
    pub allow_pull: bool,
    /// Spend one spare push stop when visibility is very low
    pub low_visibility_push: bool,
}

impl EiPolicy {
    /// Push only
    pub const V1: EiPolicy = EiPolicy {
        allow_pull: false,
        low_visibility_push: false,
    };
    /// Push, pull and low-visibility push
    pub const V2: EiPolicy = EiPolicy {
        allow_pull: true,
        low_visibility_push: true,
    };
}

impl Default for EiPolicy {
    fn default() -> Self {
        Self::V2
    }
}

/// Resolved rating for one stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EiResolution {
    pub ei: u32,
    pub push_stops: u8,
    pub pull_stops: u8,
    /// One of `push_stops` came from the low-visibility rule
    pub visibility_push: bool,
}

impl EiResolution {
    pub fn box_speed(iso: u32) -> Self {
        Self {
            ei: iso,
            push_stops: 0,
            pull_stops: 0,
            visibility_push: false,
        }
    }
}

/// Resolve the exposure index for `film` in `light`
pub fn resolve_ei(
    film: &FilmStock,
    light: LightCondition,
    weather: Option<&WeatherData>,
    policy: EiPolicy,
) -> EiResolution {
    let band = light_band(light);
    let iso = film.iso as f64;

    let mut push = 0u8;
    let mut pull = 0u8;

    if iso < band.min && film.push_stops > 0 {
        push = whole_stops_up(iso, band.ideal).min(film.push_stops);
    } else if policy.allow_pull && iso > band.max && film.pull_stops > 0 {
        pull = whole_stops_up(band.ideal, iso).min(film.pull_stops);
    }

    // The extra stop never carries the rating past the top of the band
    let mut visibility_push = false;
    if policy.low_visibility_push
        && pull == 0
        && push < film.push_stops
        && apply_stops(film.iso, push as i32 + 1) as f64 <= band.max
    {
        if let Some(w) = weather {
            if w.visibility < LOW_VISIBILITY_KM {
                push += 1;
                visibility_push = true;
            }
        }
    }

    let stops = push as i32 - pull as i32;
    EiResolution {
        ei: apply_stops(film.iso, stops),
        push_stops: push,
        pull_stops: pull,
        visibility_push,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FilmCatalog;
    use crate::types::SunPosition;

    fn film(key: &str) -> FilmStock {
        FilmCatalog::builtin().get(key).unwrap().clone()
    }

    fn foggy() -> WeatherData {
        WeatherData {
            conditions: "Foggy".to_string(),
            description: "Fog".to_string(),
            cloud_cover: 100.0,
            visibility: 0.8,
            sun_position: SunPosition::High,
            light_quality: String::new(),
            shooting_note: String::new(),
            location_name: String::new(),
            updated_at: 0,
        }
    }

    #[test]
    fn test_push_to_ideal_capped_by_envelope() {
        // HP5 in dark: ideal 1600 is 2 stops up, HP5 tolerates 3
        let r = resolve_ei(&film("hp5_plus"), LightCondition::Dark, None, EiPolicy::V2);
        assert_eq!(r.push_stops, 2);
        assert_eq!(r.ei, 1600);

        // Portra 160 in dark: 4 stops to ideal, capped at 2
        let r = resolve_ei(&film("portra_160"), LightCondition::Dark, None, EiPolicy::V2);
        assert_eq!(r.push_stops, 2);
        assert_eq!(r.ei, 640);
    }

    #[test]
    fn test_in_band_stays_at_box_speed() {
        let r = resolve_ei(&film("portra_400"), LightCondition::Mixed, None, EiPolicy::V2);
        assert_eq!(r, EiResolution::box_speed(400));
    }

    #[test]
    fn test_pull_depends_on_policy() {
        // Delta 3200 in harsh light: ideal 100 is 5 stops down, capped at 2
        let v2 = resolve_ei(&film("delta_3200"), LightCondition::Harsh, None, EiPolicy::V2);
        assert_eq!(v2.pull_stops, 2);
        assert_eq!(v2.ei, 800);

        let v1 = resolve_ei(&film("delta_3200"), LightCondition::Harsh, None, EiPolicy::V1);
        assert_eq!(v1, EiResolution::box_speed(3200));
    }

    #[test]
    fn test_low_visibility_spends_spare_push() {
        let fog = foggy();
        // HP5 dark: 2 stops to ideal + 1 for fog (envelope is 3)
        let r = resolve_ei(&film("hp5_plus"), LightCondition::Dark, Some(&fog), EiPolicy::V2);
        assert_eq!(r.push_stops, 3);
        assert!(r.visibility_push);
        assert_eq!(r.ei, 3200);

        // Portra 160 dark is already at its envelope
        let r = resolve_ei(&film("portra_160"), LightCondition::Dark, Some(&fog), EiPolicy::V2);
        assert_eq!(r.push_stops, 2);
        assert!(!r.visibility_push);

        let r = resolve_ei(&film("hp5_plus"), LightCondition::Dark, Some(&fog), EiPolicy::V1);
        assert_eq!(r.push_stops, 2);
    }

    #[test]
    fn test_low_visibility_push_stays_inside_band() {
        let fog = foggy();
        // Portra 400 sits at the top of the harsh band already
        let r = resolve_ei(&film("portra_400"), LightCondition::Harsh, Some(&fog), EiPolicy::V2);
        assert_eq!(r, EiResolution::box_speed(400));

        // HP5 in flat light has room for one more stop
        let r = resolve_ei(&film("hp5_plus"), LightCondition::Flat, Some(&fog), EiPolicy::V2);
        assert!(r.visibility_push);
        assert_eq!(r.ei, 800);

        let catalog = FilmCatalog::builtin();
        for (_, stock) in catalog.iter() {
            for light in LightCondition::ALL {
                let r = resolve_ei(stock, light, Some(&fog), EiPolicy::V2);
                if r.visibility_push {
                    assert!(r.ei as f64 <= light_band(light).max, "{} in {:?}", stock.name, light);
                }
            }
        }
    }
}
