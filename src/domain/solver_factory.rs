use crate::domain::solver::Solver;
use crate::domain::solvers::MicroLpSolver;

#[cfg(feature = "highs-solver")]
use crate::domain::solvers::HighsSolver;

/// Available solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverType {
    #[default]
    MicroLp,
    #[cfg(feature = "highs-solver")]
    Highs,
}

impl SolverType {
    /// Parse solver type from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "microlp" => Some(SolverType::MicroLp),
            #[cfg(feature = "highs-solver")]
            "highs" => Some(SolverType::Highs),
            _ => None,
        }
    }

    /// Names accepted by `from_str` in this build.
    pub fn available() -> Vec<&'static str> {
        #[cfg(feature = "highs-solver")]
        let names = vec!["microlp", "highs"];
        #[cfg(not(feature = "highs-solver"))]
        let names = vec!["microlp"];
        names
    }
}

/// Create a fresh solver instance; every scheduling session gets its own.
pub fn create_solver(solver_type: SolverType) -> Box<dyn Solver> {
    match solver_type {
        SolverType::MicroLp => Box::new(MicroLpSolver::new()),
        #[cfg(feature = "highs-solver")]
        SolverType::Highs => Box::new(HighsSolver::new()),
    }
}
