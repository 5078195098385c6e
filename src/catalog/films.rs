//! Built-in film catalog
//!
//! Characteristics use a fixed 0-10 scale. Saturation is scored as 0 for
//! monochrome stocks and their color bias is recorded as neutral.
//!
//! Catalog order matters: it is the tie-break order for equal scores.

use smallvec::SmallVec;

use crate::types::{
    ColorBias, Environment, FilmCategory, FilmFormat, LightTag, PricePoint,
};
use super::FilmStock;

use ColorBias::*;
use Environment::*;
use FilmCategory::{BwNegative, ColorNegative};
use LightTag::{Flat as FlatLight, Golden, Harsh, Mixed};
use PricePoint::*;

const BOTH: &[FilmFormat] = &[FilmFormat::Mm35, FilmFormat::Medium120];
const ONLY_35: &[FilmFormat] = &[FilmFormat::Mm35];

/// Compact static row, expanded into a `FilmStock` at load time
struct FilmRow {
    key: &'static str,
    name: &'static str,
    brand: &'static str,
    category: FilmCategory,
    iso: u32,
    formats: &'static [FilmFormat],
    // grain, saturation, contrast, latitude, sharpness, skin tones
    traits: [f64; 6],
    color_bias: ColorBias,
    ideal_light: &'static [LightTag],
    ideal_environment: &'static [Environment],
    push_stops: u8,
    pull_stops: u8,
    reciprocity_start: f64,
    community_score: f64,
    price_point: PricePoint,
}

// ============================================================================
// EMBEDDED CATALOG DATA
// ============================================================================

#[rustfmt::skip]
static FILM_ROWS: &[FilmRow] = &[
    // --- Color negative ---
    FilmRow { key: "portra_160", name: "Kodak Portra 160", brand: "Kodak", category: ColorNegative, iso: 160, formats: BOTH,
        traits: [2.0, 4.0, 4.0, 8.0, 7.0, 10.0], color_bias: NeutralWarm, ideal_light: &[Golden, FlatLight],
        ideal_environment: &[Portrait, Landscape], push_stops: 2, pull_stops: 1, reciprocity_start: 1.0, community_score: 9.0, price_point: Professional },
    FilmRow { key: "portra_400", name: "Kodak Portra 400", brand: "Kodak", category: ColorNegative, iso: 400, formats: BOTH,
        traits: [3.0, 5.0, 5.0, 9.0, 7.0, 10.0], color_bias: NeutralWarm, ideal_light: &[Golden, Mixed, FlatLight],
        ideal_environment: &[Portrait, Street, Landscape], push_stops: 3, pull_stops: 2, reciprocity_start: 1.0, community_score: 9.5, price_point: Professional },
    FilmRow { key: "portra_800", name: "Kodak Portra 800", brand: "Kodak", category: ColorNegative, iso: 800, formats: BOTH,
        traits: [4.0, 6.0, 5.0, 8.0, 6.0, 9.0], color_bias: Warm, ideal_light: &[Mixed, FlatLight],
        ideal_environment: &[Portrait, Street, Interiors], push_stops: 2, pull_stops: 1, reciprocity_start: 1.0, community_score: 8.5, price_point: Premium },
    FilmRow { key: "ektar_100", name: "Kodak Ektar 100", brand: "Kodak", category: ColorNegative, iso: 100, formats: BOTH,
        traits: [1.0, 9.0, 7.0, 5.0, 9.0, 4.0], color_bias: NeutralCool, ideal_light: &[Harsh, Golden],
        ideal_environment: &[Landscape, Architecture, Nature], push_stops: 1, pull_stops: 1, reciprocity_start: 1.0, community_score: 8.5, price_point: Professional },
    FilmRow { key: "gold_200", name: "Kodak Gold 200", brand: "Kodak", category: ColorNegative, iso: 200, formats: BOTH,
        traits: [4.0, 7.0, 6.0, 7.0, 6.0, 7.0], color_bias: Warm, ideal_light: &[Harsh, Golden],
        ideal_environment: &[Street, Landscape], push_stops: 1, pull_stops: 1, reciprocity_start: 1.0, community_score: 7.5, price_point: Consumer },
    FilmRow { key: "ultramax_400", name: "Kodak UltraMax 400", brand: "Kodak", category: ColorNegative, iso: 400, formats: ONLY_35,
        traits: [5.0, 7.0, 6.0, 8.0, 5.0, 7.0], color_bias: Warm, ideal_light: &[Harsh, Mixed],
        ideal_environment: &[Street], push_stops: 2, pull_stops: 1, reciprocity_start: 1.0, community_score: 7.5, price_point: Consumer },
    FilmRow { key: "colorplus_200", name: "Kodak ColorPlus 200", brand: "Kodak", category: ColorNegative, iso: 200, formats: ONLY_35,
        traits: [5.0, 6.0, 5.0, 7.0, 5.0, 6.0], color_bias: VeryWarm, ideal_light: &[Harsh, Golden],
        ideal_environment: &[Street], push_stops: 1, pull_stops: 0, reciprocity_start: 1.0, community_score: 6.5, price_point: Budget },
    FilmRow { key: "fuji_c200", name: "Fujicolor C200", brand: "Fujifilm", category: ColorNegative, iso: 200, formats: ONLY_35,
        traits: [5.0, 6.0, 5.0, 7.0, 5.0, 6.0], color_bias: GreenShift, ideal_light: &[Harsh, FlatLight],
        ideal_environment: &[Nature, Landscape], push_stops: 1, pull_stops: 0, reciprocity_start: 1.0, community_score: 6.5, price_point: Budget },
    FilmRow { key: "superia_400", name: "Fujifilm Superia X-TRA 400", brand: "Fujifilm", category: ColorNegative, iso: 400, formats: ONLY_35,
        traits: [5.0, 7.0, 6.0, 8.0, 6.0, 6.0], color_bias: Cool, ideal_light: &[Mixed, FlatLight],
        ideal_environment: &[Street, Nature], push_stops: 2, pull_stops: 1, reciprocity_start: 1.0, community_score: 7.0, price_point: Consumer },
    FilmRow { key: "cinestill_50d", name: "CineStill 50D", brand: "CineStill", category: ColorNegative, iso: 50, formats: BOTH,
        traits: [1.0, 7.0, 6.0, 7.0, 9.0, 7.0], color_bias: Neutral, ideal_light: &[Harsh, Golden],
        ideal_environment: &[Landscape, Architecture], push_stops: 2, pull_stops: 1, reciprocity_start: 1.0, community_score: 8.0, price_point: Premium },
    FilmRow { key: "cinestill_400d", name: "CineStill 400D", brand: "CineStill", category: ColorNegative, iso: 400, formats: BOTH,
        traits: [4.0, 6.0, 5.0, 8.0, 6.0, 8.0], color_bias: NeutralWarm, ideal_light: &[Golden, Mixed],
        ideal_environment: &[Street, Portrait, Nature], push_stops: 2, pull_stops: 1, reciprocity_start: 1.0, community_score: 8.0, price_point: Premium },
    FilmRow { key: "cinestill_800t", name: "CineStill 800T", brand: "CineStill", category: ColorNegative, iso: 800, formats: BOTH,
        traits: [6.0, 6.0, 6.0, 7.0, 6.0, 7.0], color_bias: Cool, ideal_light: &[Mixed],
        ideal_environment: &[Street, Interiors], push_stops: 2, pull_stops: 1, reciprocity_start: 10.0, community_score: 8.5, price_point: Premium },
    FilmRow { key: "lomo_100", name: "Lomography Color Negative 100", brand: "Lomography", category: ColorNegative, iso: 100, formats: BOTH,
        traits: [3.0, 8.0, 7.0, 7.0, 7.0, 7.0], color_bias: Warm, ideal_light: &[Harsh, Golden],
        ideal_environment: &[Landscape, Nature], push_stops: 1, pull_stops: 1, reciprocity_start: 1.0, community_score: 7.0, price_point: Consumer },
    FilmRow { key: "lomo_800", name: "Lomography Color Negative 800", brand: "Lomography", category: ColorNegative, iso: 800, formats: BOTH,
        traits: [7.0, 8.0, 7.0, 7.0, 5.0, 6.0], color_bias: Warm, ideal_light: &[Mixed, FlatLight],
        ideal_environment: &[Street, Interiors], push_stops: 1, pull_stops: 1, reciprocity_start: 1.0, community_score: 7.0, price_point: Consumer },

    // --- Black & white negative ---
    FilmRow { key: "hp5_plus", name: "Ilford HP5 Plus 400", brand: "Ilford", category: BwNegative, iso: 400, formats: BOTH,
        traits: [5.0, 0.0, 6.0, 9.0, 6.0, 7.0], color_bias: Neutral, ideal_light: &[Mixed, FlatLight],
        ideal_environment: &[Street, Portrait, Interiors], push_stops: 3, pull_stops: 1, reciprocity_start: 1.0, community_score: 9.5, price_point: Consumer },
    FilmRow { key: "fp4_plus", name: "Ilford FP4 Plus 125", brand: "Ilford", category: BwNegative, iso: 125, formats: BOTH,
        traits: [2.0, 0.0, 6.0, 8.0, 8.0, 7.0], color_bias: Neutral, ideal_light: &[Harsh, Golden],
        ideal_environment: &[Landscape, Architecture, Portrait], push_stops: 2, pull_stops: 1, reciprocity_start: 1.0, community_score: 8.5, price_point: Consumer },
    FilmRow { key: "delta_100", name: "Ilford Delta 100", brand: "Ilford", category: BwNegative, iso: 100, formats: BOTH,
        traits: [1.0, 0.0, 6.0, 7.0, 9.0, 7.0], color_bias: Neutral, ideal_light: &[Harsh, FlatLight],
        ideal_environment: &[Architecture, Landscape], push_stops: 1, pull_stops: 1, reciprocity_start: 1.0, community_score: 8.0, price_point: Professional },
    FilmRow { key: "delta_400", name: "Ilford Delta 400", brand: "Ilford", category: BwNegative, iso: 400, formats: BOTH,
        traits: [3.0, 0.0, 6.0, 8.0, 8.0, 7.0], color_bias: Neutral, ideal_light: &[Mixed, FlatLight],
        ideal_environment: &[Street, Portrait], push_stops: 2, pull_stops: 1, reciprocity_start: 1.0, community_score: 8.0, price_point: Professional },
    FilmRow { key: "delta_3200", name: "Ilford Delta 3200", brand: "Ilford", category: BwNegative, iso: 3200, formats: BOTH,
        traits: [8.0, 0.0, 5.0, 7.0, 5.0, 6.0], color_bias: Neutral, ideal_light: &[FlatLight, Mixed],
        ideal_environment: &[Street, Interiors], push_stops: 1, pull_stops: 2, reciprocity_start: 1.0, community_score: 7.5, price_point: Professional },
    FilmRow { key: "pan_f_plus", name: "Ilford Pan F Plus 50", brand: "Ilford", category: BwNegative, iso: 50, formats: BOTH,
        traits: [1.0, 0.0, 8.0, 5.0, 10.0, 6.0], color_bias: Neutral, ideal_light: &[Harsh],
        ideal_environment: &[Architecture, Landscape], push_stops: 1, pull_stops: 0, reciprocity_start: 1.0, community_score: 7.5, price_point: Consumer },
    FilmRow { key: "xp2_super", name: "Ilford XP2 Super 400", brand: "Ilford", category: BwNegative, iso: 400, formats: BOTH,
        traits: [3.0, 0.0, 5.0, 10.0, 7.0, 8.0], color_bias: Neutral, ideal_light: &[Mixed, FlatLight],
        ideal_environment: &[Portrait, Street], push_stops: 1, pull_stops: 2, reciprocity_start: 1.0, community_score: 8.0, price_point: Consumer },
    FilmRow { key: "tri_x_400", name: "Kodak Tri-X 400", brand: "Kodak", category: BwNegative, iso: 400, formats: BOTH,
        traits: [5.0, 0.0, 7.0, 9.0, 7.0, 7.0], color_bias: Neutral, ideal_light: &[Harsh, Mixed],
        ideal_environment: &[Street, Portrait, Nature], push_stops: 3, pull_stops: 1, reciprocity_start: 1.0, community_score: 9.5, price_point: Professional },
    FilmRow { key: "tmax_100", name: "Kodak T-Max 100", brand: "Kodak", category: BwNegative, iso: 100, formats: BOTH,
        traits: [1.0, 0.0, 6.0, 7.0, 9.0, 7.0], color_bias: Neutral, ideal_light: &[Harsh, FlatLight],
        ideal_environment: &[Architecture, Landscape], push_stops: 2, pull_stops: 1, reciprocity_start: 10.0, community_score: 8.0, price_point: Professional },
    FilmRow { key: "tmax_p3200", name: "Kodak T-Max P3200", brand: "Kodak", category: BwNegative, iso: 3200, formats: ONLY_35,
        traits: [8.0, 0.0, 6.0, 7.0, 5.0, 6.0], color_bias: Neutral, ideal_light: &[Mixed, FlatLight],
        ideal_environment: &[Street, Interiors], push_stops: 1, pull_stops: 2, reciprocity_start: 1.0, community_score: 7.5, price_point: Professional },
    FilmRow { key: "acros_100", name: "Fujifilm Acros II 100", brand: "Fujifilm", category: BwNegative, iso: 100, formats: BOTH,
        traits: [1.0, 0.0, 6.0, 7.0, 9.0, 7.0], color_bias: Neutral, ideal_light: &[Harsh, FlatLight],
        ideal_environment: &[Architecture, Landscape, Nature], push_stops: 2, pull_stops: 1, reciprocity_start: 120.0, community_score: 9.0, price_point: Premium },
    FilmRow { key: "fomapan_100", name: "Fomapan 100 Classic", brand: "Foma", category: BwNegative, iso: 100, formats: BOTH,
        traits: [3.0, 0.0, 6.0, 6.0, 7.0, 6.0], color_bias: Neutral, ideal_light: &[Harsh, Golden],
        ideal_environment: &[Landscape, Architecture], push_stops: 1, pull_stops: 1, reciprocity_start: 0.5, community_score: 6.5, price_point: Budget },
    FilmRow { key: "fomapan_400", name: "Fomapan 400 Action", brand: "Foma", category: BwNegative, iso: 400, formats: BOTH,
        traits: [6.0, 0.0, 6.0, 7.0, 5.0, 6.0], color_bias: Neutral, ideal_light: &[Mixed],
        ideal_environment: &[Street], push_stops: 2, pull_stops: 1, reciprocity_start: 0.5, community_score: 6.0, price_point: Budget },
    FilmRow { key: "kentmere_400", name: "Kentmere Pan 400", brand: "Kentmere", category: BwNegative, iso: 400, formats: ONLY_35,
        traits: [6.0, 0.0, 7.0, 8.0, 5.0, 6.0], color_bias: Neutral, ideal_light: &[Mixed, Harsh],
        ideal_environment: &[Street], push_stops: 2, pull_stops: 1, reciprocity_start: 1.0, community_score: 7.0, price_point: Budget },
];

impl FilmRow {
    fn to_stock(&self) -> (String, FilmStock) {
        let [grain, saturation, contrast, latitude, sharpness, skin_tones] = self.traits;
        let stock = FilmStock {
            name: self.name.to_string(),
            brand: self.brand.to_string(),
            category: self.category,
            iso: self.iso,
            formats: SmallVec::from_slice(self.formats),
            grain,
            saturation,
            contrast,
            latitude,
            sharpness,
            color_bias: self.color_bias,
            skin_tones,
            ideal_light: self.ideal_light.to_vec(),
            ideal_environment: self.ideal_environment.to_vec(),
            push_stops: self.push_stops,
            pull_stops: self.pull_stops,
            reciprocity_start: self.reciprocity_start,
            community_score: self.community_score,
            price_point: self.price_point,
        };
        (self.key.to_string(), stock)
    }
}

/// Expand the embedded rows in catalog order
pub(super) fn builtin_entries() -> Vec<(String, FilmStock)> {
    FILM_ROWS.iter().map(FilmRow::to_stock).collect()
}
