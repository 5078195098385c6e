//! Location names
//!
//! Cleans geocoder place names for display and picks the most specific
//! name from a reverse-geocoded address.

use serde::{Deserialize, Serialize};

/// Fallback when reverse geocoding yields nothing usable
pub const CURRENT_LOCATION: &str = "Current Location";

/// Administrative words stripped from place names
const CLUTTER_WORDS: &[&str] = &[
    "municipality",
    "district",
    "prefecture",
    "province",
    "county",
    "region",
    "metropolitan",
    "urban",
];

/// Search result shown in the location picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResult {
    pub name: String,
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
}

/// One row of the forward-geocoding response
#[derive(Debug, Clone, Deserialize)]
pub struct GeoResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub admin1: Option<String>,
}

/// Reverse-geocoded address fields, most specific first
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    pub neighbourhood: Option<String>,
    pub suburb: Option<String>,
    pub city_district: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
}

impl Address {
    pub fn best_name(&self) -> Option<&str> {
        [
            &self.neighbourhood,
            &self.suburb,
            &self.city_district,
            &self.city,
            &self.town,
            &self.village,
        ]
        .into_iter()
        .flatten()
        .map(|s| s.as_str())
        .find(|s| !s.trim().is_empty())
    }
}

fn is_clutter(word: &str) -> bool {
    let bare = word.trim_end_matches(',');
    CLUTTER_WORDS.iter().any(|c| bare.eq_ignore_ascii_case(c))
}

/// Remove administrative clutter ("Municipality of", "Prefecture", ...)
pub fn clean_location_name(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let mut keep = vec![true; words.len()];

    for (i, word) in words.iter().enumerate() {
        if !is_clutter(word) {
            continue;
        }
        keep[i] = false;
        // "of" joined to a clutter word goes with it
        if i > 0 && words[i - 1].eq_ignore_ascii_case("of") {
            keep[i - 1] = false;
        }
        if i + 1 < words.len() && words[i + 1].eq_ignore_ascii_case("of") {
            keep[i + 1] = false;
        }
    }

    let cleaned = words
        .iter()
        .zip(keep.iter())
        .filter_map(|(w, &k)| k.then_some(*w))
        .collect::<Vec<_>>()
        .join(" ");

    cleaned.trim_end_matches(',').trim().to_string()
}

/// "City, Admin1, Country", skipping admin1 when it repeats the city
pub fn display_name(city: &str, admin1: Option<&str>, country: Option<&str>) -> String {
    let mut parts = vec![city.to_string()];
    if let Some(admin) = admin1.map(clean_location_name) {
        if !admin.is_empty() && admin != city {
            parts.push(admin);
        }
    }
    if let Some(country) = country.filter(|c| !c.is_empty()) {
        parts.push(country.to_string());
    }
    parts.join(", ")
}

impl From<GeoResult> for LocationResult {
    fn from(item: GeoResult) -> Self {
        let name = clean_location_name(&item.name);
        let display_name = display_name(&name, item.admin1.as_deref(), item.country.as_deref());
        LocationResult {
            name,
            display_name,
            lat: item.latitude,
            lon: item.longitude,
        }
    }
}
