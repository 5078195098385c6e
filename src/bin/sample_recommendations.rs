//! Print recommendations for a grid of conditions
//!
//! Uses CATALOG_PATH / WEIGHTS_PATH / EI_POLICY when set. No network.
//!
//! Usage: cargo run --bin sample_recommendations [environment] [intent]

use anyhow::{bail, Result};
use roll_planner::{
    Environment, FilmFormat, FilmType, Intent, LightCondition, PlannerConfig, RecommendationRequest,
};
use std::time::Instant;

fn parse_environment(s: &str) -> Result<Environment> {
    match Environment::ALL.iter().find(|e| e.as_str() == s) {
        Some(e) => Ok(*e),
        None => bail!("Unknown environment '{}'", s),
    }
}

fn parse_intent(s: &str) -> Result<Intent> {
    match Intent::ALL.iter().find(|i| i.as_str() == s) {
        Some(i) => Ok(*i),
        None => bail!("Unknown intent '{}'", s),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let environment = match args.first() {
        Some(s) => parse_environment(s)?,
        None => Environment::Street,
    };
    let intent = match args.get(1) {
        Some(s) => parse_intent(s)?,
        None => Intent::Documentary,
    };

    let config = PlannerConfig::from_env()?;
    let scorer = config.build_scorer()?;

    println!("\n{}", "=".repeat(78));
    println!(
        "Recommendations: environment={}, intent={} ({} stocks, {:?})",
        environment.as_str(),
        intent.as_str(),
        scorer.catalog().len(),
        scorer.ei_policy()
    );
    println!("{}", "=".repeat(78));

    let start = Instant::now();
    let mut count = 0;
    for film_type in [FilmType::Color, FilmType::Bw] {
        for film_format in [FilmFormat::Mm35, FilmFormat::Medium120] {
            println!("\n{} {}", film_format, film_type.display_text());
            println!("{}", "-".repeat(78));
            for light in LightCondition::ALL {
                let plan = scorer.plan(&RecommendationRequest {
                    light,
                    environment,
                    intent,
                    weather: None,
                    film_type,
                    film_format,
                });
                count += 1;

                let rec = &plan.recommendation;
                println!(
                    "{:<7} {:<28} EI {:<5} {:>6} {:>7}",
                    light.as_str(),
                    rec.film,
                    rec.ei,
                    plan.exposure_guidance.aperture,
                    plan.exposure_guidance.shutter
                );
                for note in &rec.adjustments {
                    println!("        - {}", note);
                }
            }
        }
    }

    println!("\n{}", "=".repeat(78));
    println!("{} plans in {:.2?}", count, start.elapsed());
    Ok(())
}
