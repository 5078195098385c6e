//! Runtime configuration
//!
//! Read from environment variables by the binaries:
//! - `PORT` (default 3000)
//! - `CATALOG_PATH`: JSON film catalog replacing the built-in one
//! - `WEIGHTS_PATH`: JSON weight overrides
//! - `EI_POLICY`: `v1` (push only) or `v2` (default)
//! - `WEATHER_ENABLED`: `false`/`0` turns off the weather endpoints

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::catalog::FilmCatalog;
use crate::guidance::EiPolicy;
use crate::scorer::FilmScorer;
use crate::scoring::ScoringWeights;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub port: u16,
    pub catalog_path: Option<PathBuf>,
    pub weights_path: Option<PathBuf>,
    pub ei_policy: EiPolicy,
    pub weather_enabled: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            catalog_path: None,
            weights_path: None,
            ei_policy: EiPolicy::default(),
            weather_enabled: true,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(p) => match p.parse::<u16>() {
                Ok(port) => port,
                Err(_) => bail!("PORT must be a port number, got '{}'", p),
            },
            None => DEFAULT_PORT,
        };

        let ei_policy = match get("EI_POLICY").map(|v| v.to_lowercase()).as_deref() {
            None | Some("v2") => EiPolicy::V2,
            Some("v1") => EiPolicy::V1,
            Some(other) => bail!("EI_POLICY must be 'v1' or 'v2', got '{}'", other),
        };

        let weather_enabled = match get("WEATHER_ENABLED").map(|v| v.to_lowercase()).as_deref() {
            None | Some("1") | Some("true") | Some("yes") | Some("on") => true,
            Some("0") | Some("false") | Some("no") | Some("off") => false,
            Some(other) => bail!("WEATHER_ENABLED must be a boolean, got '{}'", other),
        };

        Ok(Self {
            port,
            catalog_path: get("CATALOG_PATH").map(PathBuf::from),
            weights_path: get("WEIGHTS_PATH").map(PathBuf::from),
            ei_policy,
            weather_enabled,
        })
    }

    /// Load the catalog and weights this configuration points at
    pub fn build_scorer(&self) -> Result<FilmScorer> {
        let catalog = match &self.catalog_path {
            Some(path) => FilmCatalog::load(path)?,
            None => FilmCatalog::builtin(),
        };
        let weights = match &self.weights_path {
            Some(path) => ScoringWeights::load(path)?,
            None => ScoringWeights::default(),
        };
        Ok(FilmScorer::new(catalog, weights, self.ei_policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<PlannerConfig> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        PlannerConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]).unwrap(), PlannerConfig::default());
    }

    #[test]
    fn test_overrides() {
        let c = config(&[
            ("PORT", "8080"),
            ("CATALOG_PATH", "/data/films.json"),
            ("EI_POLICY", "V1"),
            ("WEATHER_ENABLED", "false"),
        ])
        .unwrap();
        assert_eq!(c.port, 8080);
        assert_eq!(c.catalog_path, Some(PathBuf::from("/data/films.json")));
        assert_eq!(c.weights_path, None);
        assert_eq!(c.ei_policy, EiPolicy::V1);
        assert!(!c.weather_enabled);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(config(&[("PORT", "eighty")]).is_err());
        assert!(config(&[("EI_POLICY", "v3")]).is_err());
        assert!(config(&[("WEATHER_ENABLED", "maybe")]).is_err());
    }

    #[test]
    fn test_missing_catalog_file_is_an_error() {
        let c = config(&[("CATALOG_PATH", "/nonexistent/films.json")]).unwrap();
        assert!(c.build_scorer().is_err());
    }

    #[test]
    fn test_default_scorer_uses_builtin_catalog() {
        let scorer = PlannerConfig::default().build_scorer().unwrap();
        assert_eq!(scorer.catalog().len(), FilmCatalog::builtin().len());
    }
}
