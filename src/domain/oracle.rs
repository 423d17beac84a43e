//! Print-time estimation.
//!
//! The scheduler only needs a strictly positive duration per job; where it
//! comes from is up to the oracle. The catalog oracle is deterministic and is
//! what the service uses unless configured otherwise.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::catalog::ModelSpec;

/// Lower bound on any heuristic estimate, in hours.
pub const MIN_ESTIMATE_HOURS: f64 = 0.5;
const HOURS_PER_NAME_CHAR: f64 = 0.2;
const JITTER_HOURS: f64 = 0.2;

/// Estimates how long a model takes to print, in hours.
pub trait DurationOracle: Send + Sync {
    fn estimate(&self, spec: &ModelSpec) -> f64;
}

impl<F> DurationOracle for F
where
    F: Fn(&ModelSpec) -> f64 + Send + Sync,
{
    fn estimate(&self, spec: &ModelSpec) -> f64 {
        self(spec)
    }
}

/// Uses the catalog's explicit print time, falling back to a name-length heuristic.
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogOracle;

impl CatalogOracle {
    pub fn heuristic(spec: &ModelSpec) -> f64 {
        (spec.model_name.chars().count() as f64 * HOURS_PER_NAME_CHAR).max(MIN_ESTIMATE_HOURS)
    }
}

impl DurationOracle for CatalogOracle {
    fn estimate(&self, spec: &ModelSpec) -> f64 {
        spec.print_time.unwrap_or_else(|| Self::heuristic(spec))
    }
}

/// Catalog estimate perturbed by seeded uniform noise; reproducible per seed.
pub struct JitterOracle {
    rng: Mutex<StdRng>,
}

impl JitterOracle {
    pub fn new(seed: u64) -> Self {
        JitterOracle {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl DurationOracle for JitterOracle {
    fn estimate(&self, spec: &ModelSpec) -> f64 {
        let noise = self.rng.lock().random_range(-JITTER_HOURS..=JITTER_HOURS);
        (CatalogOracle.estimate(spec) + noise).max(MIN_ESTIMATE_HOURS)
    }
}
