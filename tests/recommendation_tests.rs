// Recommendation engine integration tests
//
// Run with: cargo test --test recommendation_tests

use approx::assert_relative_eq;
use roll_planner::catalog::{FilmCatalog, FilmStock};
use roll_planner::guidance::{
    adjustment_notes, exposure_settings, metering_tips, nearest_shutter, resolve_ei, EiPolicy,
    STANDARD_SHUTTERS,
};
use roll_planner::guidance::approach::TRIPOD_NOTE;
use roll_planner::scoring::{light_band, score_film, Conditions, ScoringWeights};
use roll_planner::{
    get_exposure_guidance, get_guidance_for_film, get_metering_tips, get_recommendation,
    Environment, FilmFormat, FilmScorer, FilmType, Intent, LightCondition, Recommendation,
    RecommendationRequest, SunPosition, WeatherData,
};

const TYPES: [FilmType; 2] = [FilmType::Color, FilmType::Bw];
const FORMATS: [FilmFormat; 2] = [FilmFormat::Mm35, FilmFormat::Medium120];

fn every_request() -> Vec<RecommendationRequest> {
    let mut out = Vec::new();
    for light in LightCondition::ALL {
        for environment in Environment::ALL {
            for intent in Intent::ALL {
                for film_type in TYPES {
                    for film_format in FORMATS {
                        out.push(RecommendationRequest {
                            light,
                            environment,
                            intent,
                            weather: None,
                            film_type,
                            film_format,
                        });
                    }
                }
            }
        }
    }
    out
}

fn weather(cloud_cover: f64, visibility: f64, sun_position: SunPosition) -> WeatherData {
    WeatherData {
        conditions: "Test".to_string(),
        description: String::new(),
        cloud_cover,
        visibility,
        sun_position,
        light_quality: String::new(),
        shooting_note: String::new(),
        location_name: "Testville".to_string(),
        updated_at: 1_700_000_000_000,
    }
}

fn stock_named<'a>(catalog: &'a FilmCatalog, name: &str) -> &'a FilmStock {
    catalog
        .iter()
        .map(|(_, f)| f)
        .find(|f| f.name == name)
        .unwrap_or_else(|| panic!("{} not in catalog", name))
}

// ============================================================================
// Determinism and filtering
// ============================================================================

#[test]
fn test_recommendations_are_deterministic() {
    let scorer = FilmScorer::default();
    let foggy = weather(95.0, 1.5, SunPosition::Low);
    for mut request in every_request() {
        let first = scorer.recommend(&request);
        assert_eq!(first, scorer.recommend(&request));

        request.weather = Some(foggy.clone());
        assert_eq!(scorer.recommend(&request), scorer.recommend(&request));
    }
}

#[test]
fn test_winner_matches_type_and_format() {
    let scorer = FilmScorer::default();
    for request in every_request() {
        let rec = scorer.recommend(&request);
        assert!(!rec.is_placeholder(), "no film for {:?}", request);

        let stock = stock_named(scorer.catalog(), &rec.film);
        assert_eq!(stock.category, request.film_type.category());
        assert!(stock.supports(request.film_format));
    }
}

#[test]
fn test_batch_matches_sequential() {
    let scorer = FilmScorer::default();
    let requests = every_request();
    let batch = scorer.recommend_batch(&requests);
    let sequential: Vec<Recommendation> = requests.iter().map(|r| scorer.recommend(r)).collect();
    assert_eq!(batch, sequential);
}

// ============================================================================
// Sentinel and tie-break
// ============================================================================

#[test]
fn test_no_matching_stock_returns_placeholder() {
    // Only 35mm-only color stocks: nothing for 120
    let builtin = FilmCatalog::builtin();
    let entries: Vec<(String, FilmStock)> = builtin
        .iter()
        .filter(|(_, f)| f.is_color() && !f.supports(FilmFormat::Medium120))
        .map(|(k, f)| (k.to_string(), f.clone()))
        .collect();
    assert!(!entries.is_empty());

    let scorer = FilmScorer::new(
        FilmCatalog::from_entries(entries).unwrap(),
        ScoringWeights::default(),
        EiPolicy::default(),
    );
    for light in LightCondition::ALL {
        let rec = scorer.recommend(&RecommendationRequest {
            light,
            environment: Environment::Landscape,
            intent: Intent::Travel,
            weather: None,
            film_type: FilmType::Color,
            film_format: FilmFormat::Medium120,
        });
        assert_eq!(rec, Recommendation::no_film_available());
        assert_eq!(rec.film, Recommendation::NO_FILM_AVAILABLE);
    }
}

#[test]
fn test_equal_scores_keep_catalog_order() {
    let base = FilmCatalog::builtin().get("portra_400").unwrap().clone();
    let twin = |name: &str| FilmStock { name: name.to_string(), ..base.clone() };

    let request = RecommendationRequest {
        light: LightCondition::Mixed,
        environment: Environment::Street,
        intent: Intent::Narrative,
        weather: None,
        film_type: FilmType::Color,
        film_format: FilmFormat::Mm35,
    };

    for (first, second) in [("Twin A", "Twin B"), ("Twin B", "Twin A")] {
        let catalog = FilmCatalog::from_entries(vec![
            ("first".to_string(), twin(first)),
            ("second".to_string(), twin(second)),
        ])
        .unwrap();
        let scorer = FilmScorer::new(catalog, ScoringWeights::default(), EiPolicy::default());

        let ranked = scorer.score_and_rank(&request);
        assert_eq!(ranked[0].score.total, ranked[1].score.total);
        assert_eq!(ranked[0].key, "first");
        assert_eq!(scorer.recommend(&request).film, first);

        let parallel = scorer.score_and_rank_parallel(&request);
        assert_eq!(parallel[0].key, "first");
    }
}

// ============================================================================
// Pinned scores and worked examples
// ============================================================================

#[test]
fn test_pinned_score_portra_160_harsh_portrait() {
    let catalog = FilmCatalog::builtin();
    let conditions = Conditions {
        light: LightCondition::Harsh,
        environment: Environment::Portrait,
        intent: Intent::Calm,
        weather: None,
    };
    let score = score_film(catalog.get("portra_160").unwrap(), &conditions, &ScoringWeights::default());
    assert_relative_eq!(score.total, 122.5);
    assert_relative_eq!(score.weather, 0.0);
    assert_relative_eq!(score.reciprocity, 0.0);
}

#[test]
fn test_harsh_portrait_calm_picks_fine_grain_portrait_stock() {
    let rec = get_recommendation(
        LightCondition::Harsh,
        Environment::Portrait,
        Intent::Calm,
        None,
        FilmType::Color,
        FilmFormat::Mm35,
    );
    assert_eq!(rec.film, "Kodak Portra 160");
    assert_eq!(rec.ei, 160);

    let catalog = FilmCatalog::builtin();
    let stock = stock_named(&catalog, &rec.film);
    assert!(light_band(LightCondition::Harsh).contains(stock.iso as f64));
    assert!(stock.grain <= 3.0);
    assert!(stock.skin_tones >= 8.0);

    // Portrait opens up to f/4; shutter compensates four stops from f/16
    let guidance = get_exposure_guidance(LightCondition::Harsh, rec.ei, Environment::Portrait, None);
    assert_eq!(guidance.aperture, "f/4");
    assert_eq!(guidance.shutter, "1/2000");
}

#[test]
fn test_dark_light_always_pushes_or_holds_and_suggests_tripod() {
    let scorer = FilmScorer::default();
    for request in every_request().into_iter().filter(|r| r.light == LightCondition::Dark) {
        let rec = scorer.recommend(&request);
        let stock = stock_named(scorer.catalog(), &rec.film);
        assert!(rec.ei >= stock.iso, "{} rated below box speed", rec.film);
        assert!(rec.adjustments.iter().any(|a| a == TRIPOD_NOTE));
    }
}

// ============================================================================
// EI resolution
// ============================================================================

#[test]
fn test_ei_monotonic_below_band() {
    let catalog = FilmCatalog::builtin();
    for (_, film) in catalog.iter() {
        for light in LightCondition::ALL {
            let band = light_band(light);
            if (film.iso as f64) >= band.min {
                continue;
            }
            let r = resolve_ei(film, light, None, EiPolicy::V1);
            let notes = adjustment_notes(film, light, &r);
            if film.push_stops > 0 {
                assert!(r.ei > film.iso, "{} in {:?}", film.name, light);
                assert!(notes.iter().any(|n| n.starts_with("Push ")));
            } else {
                assert_eq!(r.ei, film.iso);
            }
        }
    }
}

#[test]
fn test_no_push_envelope_keeps_box_speed() {
    let mut film = FilmCatalog::builtin().get("pan_f_plus").unwrap().clone();
    film.push_stops = 0;
    let foggy = weather(100.0, 0.5, SunPosition::High);
    for light in LightCondition::ALL {
        let r = resolve_ei(&film, light, Some(&foggy), EiPolicy::V2);
        assert_eq!(r.ei, 50);
        assert!(!adjustment_notes(&film, light, &r).iter().any(|n| n.starts_with("Push ")));
    }
}

#[test]
fn test_policy_versions_differ_on_pull_and_low_visibility() {
    let v1 = FilmScorer::new(FilmCatalog::builtin(), ScoringWeights::default(), EiPolicy::V1);
    let v2 = FilmScorer::new(FilmCatalog::builtin(), ScoringWeights::default(), EiPolicy::V2);

    // Delta 3200 in harsh sun: pulled two stops only under V2
    let pulled = v2
        .guidance_for_named_film("delta_3200", Some(LightCondition::Harsh), None, FilmType::Bw)
        .unwrap();
    assert_eq!(pulled.ei, 800);
    assert!(pulled.adjustments.iter().any(|a| a == "Pull 2 stop(s) in development"));
    let held = v1
        .guidance_for_named_film("delta_3200", Some(LightCondition::Harsh), None, FilmType::Bw)
        .unwrap();
    assert_eq!(held.ei, 3200);

    // HP5 in the dark and fog: one extra stop under V2
    let fog = weather(100.0, 1.0, SunPosition::Night);
    let extra = v2
        .guidance_for_named_film("hp5_plus", Some(LightCondition::Dark), Some(&fog), FilmType::Bw)
        .unwrap();
    assert_eq!(extra.ei, 3200);
    let plain = v1
        .guidance_for_named_film("hp5_plus", Some(LightCondition::Dark), Some(&fog), FilmType::Bw)
        .unwrap();
    assert_eq!(plain.ei, 1600);
}

// ============================================================================
// Exposure settings and metering
// ============================================================================

#[test]
fn test_shutter_snaps_to_standard_list() {
    let standard: Vec<String> = STANDARD_SHUTTERS.iter().map(|s| format!("1/{}", s)).collect();
    for target in [0.2, 1.0, 3.0, 11.5, 45.0, 60.0, 90.0, 160.0, 333.0, 999.0, 2560.0, 1e6] {
        let snapped = nearest_shutter(target);
        assert!(standard.contains(&snapped), "{} -> {}", target, snapped);
    }
    assert_eq!(nearest_shutter(0.0), "1/60");
    assert_eq!(nearest_shutter(-200.0), "1/60");
    assert_eq!(nearest_shutter(f64::NAN), "1/60");
}

#[test]
fn test_settings_always_use_standard_values() {
    let standard: Vec<String> = STANDARD_SHUTTERS.iter().map(|s| format!("1/{}", s)).collect();
    for light in LightCondition::ALL {
        for environment in Environment::ALL {
            for ei in [25, 100, 400, 1600, 6400] {
                let g = exposure_settings(light, ei, environment, None);
                assert!(standard.contains(&g.shutter));
                assert!(g.aperture.starts_with("f/"));
                assert!(!g.note.is_empty());
            }
        }
    }
}

#[test]
fn test_missing_weather_is_safe() {
    for light in LightCondition::ALL {
        for environment in Environment::ALL {
            let g = get_exposure_guidance(light, 400, environment, None);
            assert_eq!(g, exposure_settings(light, 400, environment, None));
            for intent in Intent::ALL {
                let tips = get_metering_tips(light, environment, intent, None);
                assert_eq!(tips, metering_tips(light, environment, intent, None));
                assert!(!tips.primary.is_empty());
                assert!(!tips.secondary.is_empty());
            }
        }
    }
}

#[test]
fn test_golden_weather_overrides_secondary_tip() {
    let golden = weather(10.0, 30.0, SunPosition::Golden);
    let plain = get_metering_tips(LightCondition::Harsh, Environment::Street, Intent::Graphic, None);
    let tips = get_metering_tips(LightCondition::Harsh, Environment::Street, Intent::Graphic, Some(&golden));
    assert_eq!(tips.primary, plain.primary);
    assert_ne!(tips.secondary, plain.secondary);
}

#[test]
fn test_guidance_by_name_unknown_key_is_an_error() {
    assert!(get_guidance_for_film("kodachrome_64", Some(LightCondition::Bright), None, FilmType::Color).is_err());
}
