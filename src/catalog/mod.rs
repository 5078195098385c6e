//! Film Catalog
//!
//! Read-only mapping from stable string key to `FilmStock`, loaded once at
//! startup either from the embedded table or from a JSON file.
//!
//! Entries keep their insertion order; scoring relies on it for tie-breaks.

mod films;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fs;
use std::path::Path;

use crate::error::{PlannerError, PlannerResult};
use crate::types::{
    ColorBias, Environment, FilmCategory, FilmFormat, FilmType, LightTag, PricePoint,
};

/// Immutable film stock record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmStock {
    pub name: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub category: FilmCategory,
    pub iso: u32,
    pub formats: SmallVec<[FilmFormat; 2]>,

    // Technical characteristics (0-10 scale)
    pub grain: f64,
    pub saturation: f64,
    pub contrast: f64,
    pub latitude: f64,
    pub sharpness: f64,

    // Color science
    pub color_bias: ColorBias,
    pub skin_tones: f64,

    // Best conditions
    pub ideal_light: Vec<LightTag>,
    pub ideal_environment: Vec<Environment>,

    // Push/pull envelope (stops)
    pub push_stops: u8,
    pub pull_stops: u8,

    /// Exposure time (seconds) beyond which reciprocity compensation is advised
    pub reciprocity_start: f64,

    pub community_score: f64,
    pub price_point: PricePoint,
}

impl FilmStock {
    pub fn supports(&self, format: FilmFormat) -> bool {
        self.formats.contains(&format)
    }

    pub fn is_color(&self) -> bool {
        self.category.is_color()
    }

    /// Check the record invariants: iso > 0, every scale field within [0, 10]
    pub fn validate(&self) -> PlannerResult<()> {
        if self.iso == 0 {
            return Err(PlannerError::Catalog(format!("{}: iso must be positive", self.name)));
        }
        if self.formats.is_empty() {
            return Err(PlannerError::Catalog(format!("{}: no formats listed", self.name)));
        }
        let scales = [
            ("grain", self.grain),
            ("saturation", self.saturation),
            ("contrast", self.contrast),
            ("latitude", self.latitude),
            ("sharpness", self.sharpness),
            ("skinTones", self.skin_tones),
            ("communityScore", self.community_score),
        ];
        for (field, value) in scales {
            if !(0.0..=10.0).contains(&value) {
                return Err(PlannerError::Catalog(format!(
                    "{}: {} = {} is outside 0-10",
                    self.name, field, value
                )));
            }
        }
        if !(self.reciprocity_start.is_finite() && self.reciprocity_start >= 0.0) {
            return Err(PlannerError::Catalog(format!(
                "{}: reciprocityStart must be a non-negative number",
                self.name
            )));
        }
        Ok(())
    }
}

/// JSON catalog row: the stock plus its stable key
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    key: String,
    #[serde(flatten)]
    film: FilmStock,
}

/// Stocks from one brand, as shown in the film picker
#[derive(Debug, Clone, Serialize)]
pub struct BrandGroup<'a> {
    pub brand: &'a str,
    pub films: Vec<(&'a str, &'a FilmStock)>,
}

/// Ordered, keyed film catalog
#[derive(Debug, Clone)]
pub struct FilmCatalog {
    entries: Vec<(String, FilmStock)>,
    index: FxHashMap<String, usize>,
}

impl FilmCatalog {
    /// Catalog embedded in the binary
    pub fn builtin() -> Self {
        let entries = films::builtin_entries();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (key, _))| (key.clone(), i))
            .collect();
        Self { entries, index }
    }

    /// Build a catalog from ordered entries, validating every stock
    pub fn from_entries(entries: Vec<(String, FilmStock)>) -> PlannerResult<Self> {
        let mut index = FxHashMap::default();
        for (i, (key, film)) in entries.iter().enumerate() {
            film.validate()?;
            if index.insert(key.clone(), i).is_some() {
                return Err(PlannerError::Catalog(format!("duplicate key '{}'", key)));
            }
        }
        Ok(Self { entries, index })
    }

    /// Load a catalog from a JSON array of `{ "key": ..., <FilmStock fields> }`
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read film catalog: {:?}", path))?;

        let rows: Vec<CatalogEntry> = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse film catalog JSON")?;

        let catalog = Self::from_entries(rows.into_iter().map(|r| (r.key, r.film)).collect())?;
        tracing::info!("Loaded {} film stocks from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&FilmStock> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// All entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilmStock)> {
        self.entries.iter().map(|(k, f)| (k.as_str(), f))
    }

    /// Stocks of the requested type that support the requested format, in catalog order
    pub fn eligible(
        &self,
        film_type: FilmType,
        format: FilmFormat,
    ) -> impl Iterator<Item = (&str, &FilmStock)> {
        let category = film_type.category();
        self.iter()
            .filter(move |(_, f)| f.category == category && f.supports(format))
    }

    /// Film picker listing: eligible stocks matching `search` (name or brand,
    /// case-insensitive), grouped by brand in first-seen order
    pub fn browse(
        &self,
        film_type: FilmType,
        format: FilmFormat,
        search: Option<&str>,
    ) -> Vec<BrandGroup<'_>> {
        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut groups: Vec<BrandGroup<'_>> = Vec::new();
        for (key, film) in self.eligible(film_type, format) {
            if let Some(ref needle) = needle {
                let hit = film.name.to_lowercase().contains(needle)
                    || film.brand.to_lowercase().contains(needle);
                if !hit {
                    continue;
                }
            }
            match groups.iter_mut().find(|g| g.brand == film.brand) {
                Some(group) => group.films.push((key, film)),
                None => groups.push(BrandGroup {
                    brand: &film.brand,
                    films: vec![(key, film)],
                }),
            }
        }
        groups
    }
}

impl Default for FilmCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
