use std::time::Duration;

use crate::domain::error::SolverError;
use crate::domain::milp::MilpModel;

/// Budget and tuning passed through to a backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveOptions {
    /// Wall-clock budget; `None` solves to proven optimality.
    pub time_limit: Option<Duration>,
    pub presolve: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            time_limit: None,
            presolve: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    /// Budget exhausted; `values` hold the incumbent when one was found.
    TimeLimit,
    Infeasible,
    Unbounded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    pub status: SolveStatus,
    /// One value per model column, empty when the backend produced none.
    pub values: Vec<f64>,
    pub objective: Option<f64>,
}

impl SolverOutcome {
    pub fn without_values(status: SolveStatus) -> Self {
        SolverOutcome {
            status,
            values: Vec::new(),
            objective: None,
        }
    }

    pub fn with_values(status: SolveStatus, model: &MilpModel, values: Vec<f64>) -> Self {
        let objective = (values.len() == model.num_variables()).then(|| model.objective_value(&values));
        SolverOutcome {
            status,
            values,
            objective,
        }
    }
}

/// Common interface for MILP backends
pub trait Solver: Send + Sync {
    /// Solve a single model
    ///
    /// # Arguments
    /// * `model` - Variables, constraints and objective
    /// * `options` - Time budget and backend tuning
    ///
    /// # Returns
    /// The terminal status and, where available, one value per column.
    /// Infeasibility is a status, not an error; errors are backend faults.
    fn solve(&self, model: &MilpModel, options: &SolveOptions) -> Result<SolverOutcome, SolverError>;

    /// Get the solver name for logging/debugging
    fn name(&self) -> &str;
}
