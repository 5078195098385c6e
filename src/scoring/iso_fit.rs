//! ISO FIT
//!
//! Rewards stocks whose nominal ISO sits inside the light condition's band,
//! with extra credit at or near the band's ideal. Stocks outside the band are
//! judged on whether their push (too slow) or pull (too fast) envelope can
//! reach the band edge.

use serde::Serialize;

use crate::catalog::FilmStock;
use crate::types::LightCondition;
use crate::utils::whole_stops_up;
use super::weights::{light_band, ScoringWeights};

/// How the nominal ISO relates to the light band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum IsoFit {
    InBand { at_ideal: bool, near_ideal: bool },
    /// Below the band but the push envelope reaches the minimum
    Pushable { stops_needed: u8 },
    /// Below the band and out of push range
    TooSlow { stops_needed: u8 },
    /// Above the band but the pull envelope reaches the maximum
    Pullable { stops_needed: u8 },
    /// Above the band and out of pull range
    TooFast { stops_needed: u8 },
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IsoFitResult {
    pub score: f64,
    pub fit: IsoFit,
}

/// Calculate the ISO-fit term
pub fn calculate_iso_fit(
    film: &FilmStock,
    light: LightCondition,
    weights: &ScoringWeights,
) -> IsoFitResult {
    let band = light_band(light);
    let iso = film.iso as f64;

    if band.contains(iso) {
        let at_ideal = iso == band.ideal;
        // Within one stop either side of ideal
        let near_ideal = !at_ideal && iso >= band.ideal / 2.0 && iso <= band.ideal * 2.0;

        let mut score = weights.iso_in_band;
        if at_ideal {
            score += weights.iso_at_ideal;
        } else if near_ideal {
            score += weights.iso_near_ideal;
        }
        return IsoFitResult {
            score,
            fit: IsoFit::InBand {
                at_ideal,
                near_ideal,
            },
        };
    }

    if iso < band.min {
        // Too slow - can we push?
        let stops_needed = whole_stops_up(iso, band.min);
        if film.push_stops >= stops_needed {
            IsoFitResult {
                score: weights.iso_push_reachable,
                fit: IsoFit::Pushable { stops_needed },
            }
        } else {
            IsoFitResult {
                score: weights.iso_push_unreachable,
                fit: IsoFit::TooSlow { stops_needed },
            }
        }
    } else {
        // Too fast - can we pull?
        let stops_needed = whole_stops_up(band.max, iso);
        if film.pull_stops >= stops_needed {
            IsoFitResult {
                score: weights.iso_pull_reachable,
                fit: IsoFit::Pullable { stops_needed },
            }
        } else {
            IsoFitResult {
                score: weights.iso_pull_unreachable,
                fit: IsoFit::TooFast { stops_needed },
            }
        }
    }
}
