//! Service and batch configuration, read from the environment.
//!
//! `main` loads a `.env` file first (dotenv), so every key can live there too.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::domain::oracle::{CatalogOracle, DurationOracle, JitterOracle};
use crate::domain::solver::SolveOptions;
use crate::domain::solver_factory::SolverType;

pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_JSON_LIMIT: usize = 2 * 1024 * 1024; // 2 MB

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which duration oracle estimates print times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OracleKind {
    #[default]
    Catalog,
    Jitter { seed: u64 },
}

impl OracleKind {
    pub fn build(self) -> Box<dyn DurationOracle> {
        match self {
            OracleKind::Catalog => Box::new(CatalogOracle),
            OracleKind::Jitter { seed } => Box::new(JitterOracle::new(seed)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub json_limit: usize,
    pub solver: SolverType,
    pub solve_options: SolveOptions,
    pub oracle: OracleKind,
    pub printers_path: PathBuf,
    pub models_path: PathBuf,
    pub tasks_path: PathBuf,
    pub result_path: PathBuf,
    pub sentry_dsn: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            json_limit: DEFAULT_JSON_LIMIT,
            solver: SolverType::default(),
            solve_options: SolveOptions::default(),
            oracle: OracleKind::default(),
            printers_path: PathBuf::from("printers.json"),
            models_path: PathBuf::from("models.json"),
            tasks_path: PathBuf::from("task.txt"),
            result_path: PathBuf::from("result.txt"),
            sentry_dsn: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let port = parse_or(&get, "PORT", defaults.port)?;
        let json_limit = parse_or(&get, "JSON_PAYLOAD_LIMIT", defaults.json_limit)?;

        let solver = match get("SOLVER") {
            Some(name) => SolverType::from_str(&name).ok_or_else(|| ConfigError::Invalid {
                key: "SOLVER",
                value: name.clone(),
                reason: format!("expected one of {}", SolverType::available().join(", ")),
            })?,
            None => defaults.solver,
        };

        let time_limit = match get("SOLVE_TIME_LIMIT_SECS") {
            Some(raw) => Some(parse_time_limit("SOLVE_TIME_LIMIT_SECS", &raw)?),
            None => None,
        };
        let presolve = parse_or(&get, "SOLVER_PRESOLVE", defaults.solve_options.presolve)?;

        let seed = parse_or(&get, "ORACLE_SEED", 0u64)?;
        let oracle = match get("DURATION_ORACLE").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("catalog") => OracleKind::Catalog,
            Some("jitter") => OracleKind::Jitter { seed },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "DURATION_ORACLE",
                    value: other.to_string(),
                    reason: "expected catalog or jitter".to_string(),
                })
            }
        };

        let path = |key: &str, default: PathBuf| get(key).map(PathBuf::from).unwrap_or(default);

        Ok(Config {
            port,
            json_limit,
            solver,
            solve_options: SolveOptions {
                time_limit,
                presolve,
            },
            oracle,
            printers_path: path("PRINTERS_PATH", defaults.printers_path),
            models_path: path("MODELS_PATH", defaults.models_path),
            tasks_path: path("TASKS_PATH", defaults.tasks_path),
            result_path: path("RESULT_PATH", defaults.result_path),
            sentry_dsn: get("SENTRY_DSN"),
        })
    }
}

pub fn parse_time_limit(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: f64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: "expected a number of seconds".to_string(),
    })?;
    seconds_to_duration(secs).ok_or_else(|| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: "time limit must be positive".to_string(),
    })
}

pub fn seconds_to_duration(secs: f64) -> Option<Duration> {
    if secs.is_finite() && secs > 0.0 {
        Some(Duration::from_secs_f64(secs))
    } else {
        None
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
