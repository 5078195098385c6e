// Axum API server module
//
// JSON endpoints for recommendations, guidance, the film picker, roll export
// and (optionally) weather lookups.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::guidance::{exposure_settings, metering_tips};
use crate::roll::{export_csv, export_filename, export_json, RollSession};
use crate::scorer::{FilmScorer, RecommendationRequest};
use crate::types::{Environment, FilmFormat, FilmType, Intent, LightCondition, WeatherData};
use crate::weather::client::current_hour_utc;
use crate::weather::{OpenMeteoClient, WeatherCache};

/// Upper bound on requests in one batch call
const MAX_BATCH: usize = 500;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<FilmScorer>,
    /// `None` when weather lookups are disabled
    pub weather: Option<Arc<OpenMeteoClient>>,
}

impl AppState {
    pub fn new(config: &PlannerConfig) -> anyhow::Result<Self> {
        tracing::info!("Initializing film scorer...");
        let scorer = Arc::new(config.build_scorer()?);
        tracing::info!("Film scorer ready ({} stocks)", scorer.catalog().len());

        let weather = if config.weather_enabled {
            tracing::info!("Initializing weather client and caches...");
            Some(Arc::new(OpenMeteoClient::new(WeatherCache::new())?))
        } else {
            tracing::info!("Weather lookups disabled");
            None
        };

        Ok(Self { scorer, weather })
    }

    pub fn from_parts(scorer: FilmScorer, weather: Option<OpenMeteoClient>) -> Self {
        Self {
            scorer: Arc::new(scorer),
            weather: weather.map(Arc::new),
        }
    }

    fn weather_client(&self) -> Result<&OpenMeteoClient, AppError> {
        self.weather
            .as_deref()
            .ok_or_else(|| AppError::Unavailable("Weather lookups are disabled".to_string()))
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Recommendation and guidance
        .route("/api/recommendation", post(recommend))
        .route("/api/recommendation/batch", post(recommend_batch))
        .route("/api/guidance", post(guidance_for_film))
        .route("/api/exposure", post(exposure))
        .route("/api/metering", post(metering))

        // Film picker
        .route("/api/films", get(browse_films))

        // Roll export
        .route("/api/roll/export", post(export_roll))

        // Weather and geocoding
        .route("/api/weather/current", get(current_weather))
        .route("/api/weather/forecast", get(forecast_weather))
        .route("/api/weather/sun-times", get(sun_times))
        .route("/api/locations", get(search_locations))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceRequest {
    pub film_key: String,
    #[serde(default)]
    pub light: Option<LightCondition>,
    #[serde(default)]
    pub environment: Option<Environment>,
    #[serde(default)]
    pub intent: Option<Intent>,
    #[serde(default)]
    pub weather: Option<WeatherData>,
    pub film_type: FilmType,
}

#[derive(Debug, Deserialize)]
pub struct ExposureRequest {
    pub light: LightCondition,
    pub ei: u32,
    pub environment: Environment,
    #[serde(default)]
    pub weather: Option<WeatherData>,
}

#[derive(Debug, Deserialize)]
pub struct MeteringRequest {
    pub light: LightCondition,
    pub environment: Environment,
    pub intent: Intent,
    #[serde(default)]
    pub weather: Option<WeatherData>,
}

#[derive(Debug, Deserialize)]
pub struct FilmsQuery {
    #[serde(rename = "type")]
    pub film_type: FilmType,
    pub format: FilmFormat,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PointQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub lat: f64,
    pub lon: f64,
    pub date: Option<NaiveDate>,
    pub hour: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SunTimesQuery {
    pub lat: f64,
    pub lon: f64,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub q: String,
}

fn check_point(lat: f64, lon: f64) -> Result<(), AppError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::BadRequest(format!("Invalid coordinates {},{}", lat, lon)));
    }
    Ok(())
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let plan = state.scorer.plan(&request);
    tracing::info!(film = %plan.recommendation.film, ei = plan.recommendation.ei, "Recommendation");
    Ok(Json(serde_json::to_value(plan).map_err(|e| AppError::Internal(e.to_string()))?))
}

async fn recommend_batch(
    State(state): State<AppState>,
    Json(requests): Json<Vec<RecommendationRequest>>,
) -> Result<Json<serde_json::Value>, AppError> {
    if requests.len() > MAX_BATCH {
        return Err(AppError::BadRequest(format!("At most {} requests per batch", MAX_BATCH)));
    }

    // CPU-bound work: run in blocking thread pool
    let scorer = state.scorer.clone();
    let count = requests.len();
    let results = tokio::task::spawn_blocking(move || scorer.recommend_batch(&requests))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    tracing::info!("Scored batch of {} requests", count);
    Ok(Json(serde_json::json!({
        "rows": results.len(),
        "data": results
    })))
}

async fn guidance_for_film(
    State(state): State<AppState>,
    Json(request): Json<GuidanceRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let weather = request.weather.as_ref();
    let recommendation = state
        .scorer
        .guidance_for_named_film(&request.film_key, request.light, weather, request.film_type)?;

    let mut body = serde_json::json!({ "recommendation": recommendation });

    // Settings and tips need a light; fall back to the one the guidance used
    let light = request.light.or_else(|| weather.map(crate::guidance::infer_light));
    if let (Some(light), Some(environment)) = (light, request.environment) {
        body["exposureGuidance"] =
            serde_json::to_value(exposure_settings(light, recommendation.ei, environment, weather))
                .map_err(|e| AppError::Internal(e.to_string()))?;
        if let Some(intent) = request.intent {
            body["meteringTips"] =
                serde_json::to_value(metering_tips(light, environment, intent, weather))
                    .map_err(|e| AppError::Internal(e.to_string()))?;
        }
    }

    Ok(Json(body))
}

async fn exposure(Json(request): Json<ExposureRequest>) -> impl IntoResponse {
    Json(exposure_settings(
        request.light,
        request.ei,
        request.environment,
        request.weather.as_ref(),
    ))
}

async fn metering(Json(request): Json<MeteringRequest>) -> impl IntoResponse {
    Json(metering_tips(
        request.light,
        request.environment,
        request.intent,
        request.weather.as_ref(),
    ))
}

async fn browse_films(
    State(state): State<AppState>,
    Query(query): Query<FilmsQuery>,
) -> Json<serde_json::Value> {
    let groups = state
        .scorer
        .catalog()
        .browse(query.film_type, query.format, query.search.as_deref());

    let total: usize = groups.iter().map(|g| g.films.len()).sum();
    let data: Vec<serde_json::Value> = groups
        .iter()
        .map(|g| {
            let films: Vec<serde_json::Value> = g
                .films
                .iter()
                .map(|(key, film)| {
                    serde_json::json!({
                        "key": key,
                        "name": film.name,
                        "iso": film.iso,
                        "formats": film.formats,
                        "pricePoint": film.price_point,
                    })
                })
                .collect();
            serde_json::json!({ "brand": g.brand, "films": films })
        })
        .collect();

    Json(serde_json::json!({
        "rows": total,
        "data": data
    }))
}

async fn export_roll(
    Query(query): Query<ExportQuery>,
    Json(session): Json<RollSession>,
) -> Result<Response, AppError> {
    let format = query.format.as_deref().unwrap_or("json").to_lowercase();
    let (content_type, body) = match format.as_str() {
        "json" => (
            "application/json",
            export_json(&session, Utc::now()).map_err(|e| AppError::Internal(e.to_string()))?,
        ),
        "csv" => ("text/csv; charset=utf-8", export_csv(&session)),
        other => return Err(AppError::BadRequest(format!("Unknown export format '{}'", other))),
    };

    let disposition = format!("attachment; filename=\"{}\"", export_filename(&session, &format));
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

async fn current_weather(
    State(state): State<AppState>,
    Query(query): Query<PointQuery>,
) -> Result<Json<WeatherData>, AppError> {
    check_point(query.lat, query.lon)?;
    let client = state.weather_client()?;
    client
        .current(query.lat, query.lon)
        .await
        .map(Json)
        .ok_or_else(|| AppError::Unavailable("Weather data unavailable".to_string()))
}

async fn forecast_weather(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<WeatherData>, AppError> {
    check_point(query.lat, query.lon)?;
    let (today, hour_now) = current_hour_utc();
    let hour = query.hour.unwrap_or(hour_now);
    if hour > 23 {
        return Err(AppError::BadRequest(format!("Invalid hour {}", hour)));
    }

    let client = state.weather_client()?;
    client
        .forecast(query.lat, query.lon, query.date.unwrap_or(today), hour)
        .await
        .map(Json)
        .ok_or_else(|| AppError::Unavailable("Forecast unavailable".to_string()))
}

async fn sun_times(
    State(state): State<AppState>,
    Query(query): Query<SunTimesQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_point(query.lat, query.lon)?;
    let client = state.weather_client()?;
    let date = query.date.unwrap_or_else(|| current_hour_utc().0);
    let times = client
        .sun_times(query.lat, query.lon, date)
        .await
        .ok_or_else(|| AppError::Unavailable("Sun times unavailable".to_string()))?;
    Ok(Json(serde_json::to_value(times).map_err(|e| AppError::Internal(e.to_string()))?))
}

async fn search_locations(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let client = state.weather_client()?;
    let results = client.search_locations(&query.q).await;
    Ok(Json(serde_json::json!({
        "rows": results.len(),
        "data": results
    })))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    Unavailable(String),
}

impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        match err {
            PlannerError::UnknownFilm(_) => AppError::NotFound(err.to_string()),
            PlannerError::Catalog(_) => AppError::Internal(err.to_string()),
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
