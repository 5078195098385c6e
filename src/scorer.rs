//! Film Scorer - main coordinator for recommendations
//!
//! Filters the catalog by type and format, scores every candidate with the
//! terms in `scoring`, ranks them, and hands the winner to the guidance
//! modules. Includes both sequential and parallel (Rayon) ranking.
//!
//! Ranking is a stable sort on total score, so equal scores keep catalog order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::catalog::{FilmCatalog, FilmStock};
use crate::error::{PlannerError, PlannerResult};
use crate::guidance::{
    adjustment_notes, exposure_approach, exposure_settings, infer_light, metering_tips, resolve_ei,
    EiPolicy, EiResolution, BOX_SPEED_APPROACH,
};
use crate::scoring::{score_film, Conditions, ScoreBreakdown, ScoringWeights};
use crate::types::{
    Environment, ExposureGuidance, FilmFormat, FilmType, Intent, LightCondition, MeteringTips,
    Recommendation, WeatherData,
};

/// Inputs for one recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub light: LightCondition,
    pub environment: Environment,
    pub intent: Intent,
    #[serde(default)]
    pub weather: Option<WeatherData>,
    pub film_type: FilmType,
    pub film_format: FilmFormat,
}

impl RecommendationRequest {
    fn conditions(&self) -> Conditions<'_> {
        Conditions {
            light: self.light,
            environment: self.environment,
            intent: self.intent,
            weather: self.weather.as_ref(),
        }
    }
}

/// One scored candidate
#[derive(Debug, Clone, Serialize)]
pub struct RankedFilm<'a> {
    pub key: &'a str,
    pub film: &'a FilmStock,
    pub score: ScoreBreakdown,
}

/// Recommendation plus the guidance shown beside it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootingPlan {
    pub recommendation: Recommendation,
    pub exposure_guidance: ExposureGuidance,
    pub metering_tips: MeteringTips,
    pub discipline: &'static str,
}

/// Main film scorer
#[derive(Debug, Clone)]
pub struct FilmScorer {
    catalog: FilmCatalog,
    weights: ScoringWeights,
    ei_policy: EiPolicy,
}

impl Default for FilmScorer {
    fn default() -> Self {
        Self::new(FilmCatalog::builtin(), ScoringWeights::default(), EiPolicy::default())
    }
}

impl FilmScorer {
    pub fn new(catalog: FilmCatalog, weights: ScoringWeights, ei_policy: EiPolicy) -> Self {
        tracing::debug!(
            films = catalog.len(),
            allow_pull = ei_policy.allow_pull,
            "Film scorer initialized"
        );
        Self {
            catalog,
            weights,
            ei_policy,
        }
    }

    pub fn catalog(&self) -> &FilmCatalog {
        &self.catalog
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn ei_policy(&self) -> EiPolicy {
        self.ei_policy
    }

    /// Score every eligible stock and rank by total, highest first
    pub fn score_and_rank(&self, request: &RecommendationRequest) -> Vec<RankedFilm<'_>> {
        let conditions = request.conditions();
        let mut ranked: Vec<RankedFilm<'_>> = self
            .catalog
            .eligible(request.film_type, request.film_format)
            .map(|(key, film)| RankedFilm {
                key,
                film,
                score: score_film(film, &conditions, &self.weights),
            })
            .collect();

        sort_ranked(&mut ranked);
        ranked
    }

    /// Same ranking as `score_and_rank`, scoring candidates IN PARALLEL
    pub fn score_and_rank_parallel(&self, request: &RecommendationRequest) -> Vec<RankedFilm<'_>> {
        let conditions = request.conditions();
        let candidates: Vec<(&str, &FilmStock)> = self
            .catalog
            .eligible(request.film_type, request.film_format)
            .collect();

        // Indexed collect keeps catalog order before the stable sort
        let mut ranked: Vec<RankedFilm<'_>> = candidates
            .into_par_iter()
            .map(|(key, film)| RankedFilm {
                key,
                film,
                score: score_film(film, &conditions, &self.weights),
            })
            .collect();

        sort_ranked(&mut ranked);
        ranked
    }

    /// Pick the best stock and rate it for the light
    pub fn recommend(&self, request: &RecommendationRequest) -> Recommendation {
        let ranked = self.score_and_rank(request);

        let Some(winner) = ranked.first() else {
            tracing::debug!(
                film_type = ?request.film_type,
                format = %request.film_format,
                "No eligible film stock"
            );
            return Recommendation::no_film_available();
        };

        tracing::debug!(
            winner = winner.key,
            score = winner.score.total,
            candidates = ranked.len(),
            "Ranked film stocks"
        );

        let resolution = resolve_ei(winner.film, request.light, request.weather.as_ref(), self.ei_policy);
        Recommendation {
            film: winner.film.name.clone(),
            ei: resolution.ei,
            exposure: exposure_approach(request.film_type, request.light).to_string(),
            adjustments: adjustment_notes(winner.film, request.light, &resolution),
        }
    }

    /// Recommendation with exposure settings, metering tips and discipline
    pub fn plan(&self, request: &RecommendationRequest) -> ShootingPlan {
        let recommendation = self.recommend(request);
        let weather = request.weather.as_ref();
        ShootingPlan {
            exposure_guidance: exposure_settings(request.light, recommendation.ei, request.environment, weather),
            metering_tips: metering_tips(request.light, request.environment, request.intent, weather),
            discipline: request.intent.discipline(),
            recommendation,
        }
    }

    /// Recommend for many independent requests IN PARALLEL
    pub fn recommend_batch(&self, requests: &[RecommendationRequest]) -> Vec<Recommendation> {
        requests.par_iter().map(|r| self.recommend(r)).collect()
    }

    /// Guidance for a stock the user already chose, without scoring.
    ///
    /// Missing light is inferred from weather; with neither, the stock is
    /// rated at box speed.
    pub fn guidance_for_named_film(
        &self,
        film_key: &str,
        light: Option<LightCondition>,
        weather: Option<&WeatherData>,
        film_type: FilmType,
    ) -> PlannerResult<Recommendation> {
        let film = self
            .catalog
            .get(film_key)
            .ok_or_else(|| PlannerError::UnknownFilm(film_key.to_string()))?;
        if film.category != film_type.category() {
            return Err(PlannerError::FilmTypeMismatch {
                film: film.name.clone(),
                requested: film_type,
            });
        }

        let Some(light) = light.or_else(|| weather.map(infer_light)) else {
            return Ok(Recommendation {
                film: film.name.clone(),
                ei: film.iso,
                exposure: BOX_SPEED_APPROACH.to_string(),
                adjustments: Vec::new(),
            });
        };

        let resolution: EiResolution = resolve_ei(film, light, weather, self.ei_policy);
        Ok(Recommendation {
            film: film.name.clone(),
            ei: resolution.ei,
            exposure: exposure_approach(film_type, light).to_string(),
            adjustments: adjustment_notes(film, light, &resolution),
        })
    }
}

/// Stable descending sort on total score
fn sort_ranked(ranked: &mut [RankedFilm<'_>]) {
    ranked.sort_by(|a, b| b.score.total.total_cmp(&a.score.total));
}
