//! TTL caches for weather and geocoding lookups
//!
//! One explicit object holding a `moka` cache per key space. It is created
//! by the caller and handed to the client; there is no global cache.

use chrono::NaiveDate;
use moka::future::Cache;
use std::time::Duration;

use crate::types::WeatherData;
use super::geocode::LocationResult;
use super::sun_times::SunTimes;

pub const LOCATIONS_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const REVERSE_GEO_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const SUN_TIMES_TTL: Duration = Duration::from_secs(12 * 60 * 60);
pub const FORECAST_TTL: Duration = Duration::from_secs(30 * 60);

const MAX_ENTRIES: u64 = 10_000;

#[derive(Clone)]
pub struct WeatherCache {
    pub locations: Cache<String, Vec<LocationResult>>,
    pub reverse_geo: Cache<String, String>,
    pub sun_times: Cache<String, SunTimes>,
    pub forecast: Cache<String, WeatherData>,
}

impl WeatherCache {
    pub fn new() -> Self {
        Self::with_ttls(LOCATIONS_TTL, REVERSE_GEO_TTL, SUN_TIMES_TTL, FORECAST_TTL)
    }

    pub fn with_ttls(locations: Duration, reverse_geo: Duration, sun_times: Duration, forecast: Duration) -> Self {
        Self {
            locations: build(locations),
            reverse_geo: build(reverse_geo),
            sun_times: build(sun_times),
            forecast: build(forecast),
        }
    }
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new()
    }
}

fn build<V: Clone + Send + Sync + 'static>(ttl: Duration) -> Cache<String, V> {
    Cache::builder()
        .max_capacity(MAX_ENTRIES)
        .time_to_live(ttl)
        .build()
}

// ============================================================================
// Key helpers
// ============================================================================

/// Search queries are cached case- and whitespace-insensitively
pub fn location_key(query: &str) -> String {
    query.trim().to_lowercase()
}

/// ~100 m grid
pub fn reverse_geo_key(lat: f64, lon: f64) -> String {
    format!("{:.3},{:.3}", lat, lon)
}

/// ~1 km grid per day
pub fn sun_times_key(lat: f64, lon: f64, date: NaiveDate) -> String {
    format!("{:.2},{:.2},{}", lat, lon, date.format("%Y-%m-%d"))
}

/// ~1 km grid per day and hour
pub fn forecast_key(lat: f64, lon: f64, date: NaiveDate, hour: u32) -> String {
    format!("{:.2},{:.2},{},{}", lat, lon, date.format("%Y-%m-%d"), hour)
}
