//! Open-Meteo weather and geocoding client
//!
//! Every lookup degrades to `None` / empty on failure with a `warn!` log.
//! Weather is optional input to the recommendation engine, so a failed
//! fetch must never surface as an error.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::types::WeatherData;
use super::cache::{forecast_key, location_key, reverse_geo_key, sun_times_key, WeatherCache};
use super::classify::{build_weather_data, Observation};
use super::geocode::{Address, GeoResult, LocationResult, CURRENT_LOCATION};
use super::sun_times::SunTimes;

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const REVERSE_GEOCODING_URL: &str = "https://nominatim.openstreetmap.org/reverse";

const USER_AGENT: &str = "RollPlanner/1.0";
const SEARCH_RESULT_COUNT: &str = "6";
const MIN_QUERY_CHARS: usize = 2;
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Visibility assumed when the hourly forecast has a gap (meters)
const DEFAULT_VISIBILITY_M: f64 = 10_000.0;

// ============================================================================
// Response shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct Daily {
    sunrise: Vec<String>,
    sunset: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    cloud_cover: f64,
    visibility: f64,
    weather_code: u16,
    is_day: u8,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    #[serde(default)]
    utc_offset_seconds: i64,
    current: CurrentBlock,
    daily: Daily,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    cloud_cover: Vec<Option<f64>>,
    visibility: Vec<Option<f64>>,
    weather_code: Vec<Option<u16>>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    utc_offset_seconds: i64,
    hourly: HourlyBlock,
    daily: Daily,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(default)]
    utc_offset_seconds: i64,
    daily: Daily,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Address>,
}

/// Open-Meteo reports local wall-clock times alongside the zone offset
fn parse_local(value: &str, utc_offset_seconds: i64) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .with_context(|| format!("Bad timestamp '{}'", value))?;
    Ok(Utc.from_utc_datetime(&(naive - Duration::seconds(utc_offset_seconds))))
}

fn sunrise_sunset(daily: &Daily, offset: i64) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let sunrise = daily.sunrise.first().context("Missing sunrise")?;
    let sunset = daily.sunset.first().context("Missing sunset")?;
    Ok((parse_local(sunrise, offset)?, parse_local(sunset, offset)?))
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone)]
pub struct OpenMeteoClient {
    http: Client,
    cache: WeatherCache,
    forecast_url: String,
    geocoding_url: String,
    reverse_url: String,
}

impl OpenMeteoClient {
    pub fn new(cache: WeatherCache) -> Result<Self> {
        Self::with_endpoints(cache, FORECAST_URL, GEOCODING_URL, REVERSE_GEOCODING_URL)
    }

    pub fn with_endpoints(
        cache: WeatherCache,
        forecast_url: &str,
        geocoding_url: &str,
        reverse_url: &str,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            cache,
            forecast_url: forecast_url.trim_end_matches('/').to_string(),
            geocoding_url: geocoding_url.trim_end_matches('/').to_string(),
            reverse_url: reverse_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn cache(&self) -> &WeatherCache {
        &self.cache
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    /// Current conditions at a point
    pub async fn current(&self, lat: f64, lon: f64) -> Option<WeatherData> {
        match self.fetch_current(lat, lon).await {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!("Weather fetch failed for {:.3},{:.3}: {:#}", lat, lon, e);
                None
            }
        }
    }

    async fn fetch_current(&self, lat: f64, lon: f64) -> Result<WeatherData> {
        let query = [
            ("latitude", lat.to_string()),
            ("longitude", lon.to_string()),
            ("current", "cloud_cover,visibility,weather_code,is_day".to_string()),
            ("daily", "sunrise,sunset".to_string()),
            ("timezone", "auto".to_string()),
        ];
        let data: CurrentResponse = self.get_json(&self.forecast_url, &query).await?;
        let (sunrise, sunset) = sunrise_sunset(&data.daily, data.utc_offset_seconds)?;

        let observation = Observation {
            cloud_cover: data.current.cloud_cover,
            visibility_m: data.current.visibility,
            weather_code: data.current.weather_code,
            is_day: data.current.is_day == 1,
        };
        let location = self.reverse_geocode(lat, lon).await;
        Ok(build_weather_data(&observation, Utc::now(), sunrise, sunset, location))
    }

    /// Forecast for a local date and hour (0-23)
    pub async fn forecast(&self, lat: f64, lon: f64, date: NaiveDate, hour: u32) -> Option<WeatherData> {
        let key = forecast_key(lat, lon, date, hour);
        if let Some(cached) = self.cache.forecast.get(&key).await {
            tracing::debug!("Cache hit for forecast {}", key);
            return Some(cached);
        }

        match self.fetch_forecast(lat, lon, date, hour).await {
            Ok(data) => {
                self.cache.forecast.insert(key, data.clone()).await;
                Some(data)
            }
            Err(e) => {
                tracing::warn!("Forecast fetch failed for {}: {:#}", key, e);
                None
            }
        }
    }

    async fn fetch_forecast(&self, lat: f64, lon: f64, date: NaiveDate, hour: u32) -> Result<WeatherData> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let query = [
            ("latitude", lat.to_string()),
            ("longitude", lon.to_string()),
            ("hourly", "cloud_cover,visibility,weather_code".to_string()),
            ("daily", "sunrise,sunset".to_string()),
            ("timezone", "auto".to_string()),
            ("start_date", date_str.clone()),
            ("end_date", date_str),
        ];
        let data: ForecastResponse = self.get_json(&self.forecast_url, &query).await?;
        let offset = data.utc_offset_seconds;
        let (sunrise, sunset) = sunrise_sunset(&data.daily, offset)?;

        let hourly = &data.hourly;
        if hourly.time.is_empty() {
            anyhow::bail!("Forecast has no hourly data");
        }
        let index = (hour as usize).min(hourly.time.len() - 1);
        let slot_time = parse_local(&hourly.time[index], offset)?;

        let observation = Observation {
            cloud_cover: hourly.cloud_cover.get(index).copied().flatten().unwrap_or(0.0),
            visibility_m: hourly
                .visibility
                .get(index)
                .copied()
                .flatten()
                .filter(|v| *v > 0.0)
                .unwrap_or(DEFAULT_VISIBILITY_M),
            weather_code: hourly.weather_code.get(index).copied().flatten().unwrap_or(0),
            is_day: slot_time >= sunrise && slot_time <= sunset,
        };

        let target = date
            .and_hms_opt(hour.min(23), 0, 0)
            .map(|naive| Utc.from_utc_datetime(&(naive - Duration::seconds(offset))))
            .unwrap_or(slot_time);

        let location = self.reverse_geocode(lat, lon).await;
        Ok(build_weather_data(&observation, target, sunrise, sunset, location))
    }

    /// Key times of day for a local date
    pub async fn sun_times(&self, lat: f64, lon: f64, date: NaiveDate) -> Option<SunTimes> {
        let key = sun_times_key(lat, lon, date);
        if let Some(cached) = self.cache.sun_times.get(&key).await {
            tracing::debug!("Cache hit for sun times {}", key);
            return Some(cached);
        }

        let date_str = date.format("%Y-%m-%d").to_string();
        let query = [
            ("latitude", lat.to_string()),
            ("longitude", lon.to_string()),
            ("daily", "sunrise,sunset".to_string()),
            ("timezone", "auto".to_string()),
            ("start_date", date_str.clone()),
            ("end_date", date_str),
        ];
        let result = async {
            let data: DailyResponse = self.get_json(&self.forecast_url, &query).await?;
            let (sunrise, sunset) = sunrise_sunset(&data.daily, data.utc_offset_seconds)?;
            Ok::<_, anyhow::Error>(SunTimes::from_sunrise_sunset(sunrise, sunset))
        }
        .await;

        match result {
            Ok(times) => {
                self.cache.sun_times.insert(key, times).await;
                Some(times)
            }
            Err(e) => {
                tracing::warn!("Sun times fetch failed for {}: {:#}", key, e);
                None
            }
        }
    }

    /// Forward geocoding; queries shorter than two characters return nothing
    pub async fn search_locations(&self, query: &str) -> Vec<LocationResult> {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        let key = location_key(trimmed);
        if let Some(cached) = self.cache.locations.get(&key).await {
            tracing::debug!("Cache hit for location search '{}'", key);
            return cached;
        }

        let params = [
            ("name", trimmed.to_string()),
            ("count", SEARCH_RESULT_COUNT.to_string()),
            ("language", "en".to_string()),
            ("format", "json".to_string()),
        ];
        match self.get_json::<GeocodingResponse>(&self.geocoding_url, &params).await {
            Ok(data) => {
                let results: Vec<LocationResult> = data
                    .results
                    .unwrap_or_default()
                    .into_iter()
                    .map(LocationResult::from)
                    .collect();
                self.cache.locations.insert(key, results.clone()).await;
                results
            }
            Err(e) => {
                tracing::warn!("Location search failed for '{}': {:#}", trimmed, e);
                Vec::new()
            }
        }
    }

    /// Most specific place name for a point, or "Current Location"
    pub async fn reverse_geocode(&self, lat: f64, lon: f64) -> String {
        let key = reverse_geo_key(lat, lon);
        if let Some(cached) = self.cache.reverse_geo.get(&key).await {
            return cached;
        }

        let params = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("format", "json".to_string()),
        ];
        match self.get_json::<ReverseResponse>(&self.reverse_url, &params).await {
            Ok(data) => {
                let name = data
                    .address
                    .as_ref()
                    .and_then(Address::best_name)
                    .unwrap_or(CURRENT_LOCATION)
                    .to_string();
                self.cache.reverse_geo.insert(key, name.clone()).await;
                name
            }
            Err(e) => {
                tracing::warn!("Reverse geocoding failed for {}: {:#}", key, e);
                CURRENT_LOCATION.to_string()
            }
        }
    }
}

/// Today's date and hour in UTC, the default forecast slot
pub fn current_hour_utc() -> (NaiveDate, u32) {
    let now = Utc::now();
    (now.date_naive(), now.hour())
}
