//! Weather and geocoding
//!
//! The recommendation engine only consumes `WeatherData`. This module builds
//! it: pure classification (`classify`, `sun_times`, `geocode`) plus, with the
//! `api` feature, a TTL cache and an Open-Meteo client.

pub mod classify;
pub mod geocode;
pub mod sun_times;

#[cfg(feature = "api")]
pub mod cache;
#[cfg(feature = "api")]
pub mod client;

pub use classify::{build_weather_data, describe_weather_code, light_quality, shooting_note, sun_position, Observation};
pub use geocode::{clean_location_name, display_name, LocationResult, CURRENT_LOCATION};
pub use sun_times::SunTimes;

#[cfg(feature = "api")]
pub use cache::WeatherCache;
#[cfg(feature = "api")]
pub use client::OpenMeteoClient;
