use criterion::{black_box, criterion_group, criterion_main, Criterion};
use roll_planner::{
    Environment, FilmFormat, FilmScorer, FilmType, Intent, LightCondition, RecommendationRequest,
    SunPosition, WeatherData,
};

fn overcast() -> WeatherData {
    WeatherData {
        conditions: "Overcast".to_string(),
        description: "Overcast".to_string(),
        cloud_cover: 90.0,
        visibility: 12.0,
        sun_position: SunPosition::High,
        light_quality: "Soft, even light".to_string(),
        shooting_note: String::new(),
        location_name: "Bench".to_string(),
        updated_at: 0,
    }
}

fn grid() -> Vec<RecommendationRequest> {
    let mut requests = Vec::new();
    for light in LightCondition::ALL {
        for environment in Environment::ALL {
            for intent in Intent::ALL {
                requests.push(RecommendationRequest {
                    light,
                    environment,
                    intent,
                    weather: Some(overcast()),
                    film_type: FilmType::Color,
                    film_format: FilmFormat::Mm35,
                });
            }
        }
    }
    requests
}

fn bench_recommend(c: &mut Criterion) {
    let scorer = FilmScorer::default();
    let request = RecommendationRequest {
        light: LightCondition::Flat,
        environment: Environment::Street,
        intent: Intent::Documentary,
        weather: Some(overcast()),
        film_type: FilmType::Color,
        film_format: FilmFormat::Mm35,
    };

    c.bench_function("recommend_single", |b| {
        b.iter(|| scorer.recommend(black_box(&request)))
    });
    c.bench_function("plan_single", |b| b.iter(|| scorer.plan(black_box(&request))));
    c.bench_function("score_and_rank_parallel", |b| {
        b.iter(|| scorer.score_and_rank_parallel(black_box(&request)).len())
    });
}

fn bench_batch(c: &mut Criterion) {
    let scorer = FilmScorer::default();
    let requests = grid();

    let mut group = c.benchmark_group("condition_grid");
    group.bench_function("sequential", |b| {
        b.iter(|| {
            requests
                .iter()
                .map(|r| scorer.recommend(black_box(r)))
                .collect::<Vec<_>>()
        })
    });
    group.bench_function("rayon_batch", |b| {
        b.iter(|| scorer.recommend_batch(black_box(&requests)))
    });
    group.finish();
}

criterion_group!(benches, bench_recommend, bench_batch);
criterion_main!(benches);
