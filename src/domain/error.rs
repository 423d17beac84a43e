use thiserror::Error;

use crate::domain::eligibility::UnschedulableJob;

/// Faults in the input catalogs; raised before any model is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("job {job_id}: model {file_id} not found in model catalog")]
    UnknownModel { job_id: usize, file_id: String },

    #[error("duplicate printer name {0}")]
    DuplicatePrinter(String),

    #[error("model {file_id}: invalid print_time {value:?}, expected HH:MM:SS")]
    InvalidPrintTime { file_id: String, value: String },

    #[error("model {file_id}: duration estimate {value} is not a positive number of hours")]
    InvalidDuration { file_id: String, value: f64 },

    #[error("failed to read {path}: {details}")]
    Io { path: String, details: String },

    #[error("failed to parse {path}: {details}")]
    Parse { path: String, details: String },
}

/// Failures raised by a solver backend itself, as opposed to a status it reports.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("{solver}: {details}")]
    Backend { solver: String, details: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("{} job(s) have no eligible printer", .0.len())]
    NoEligiblePrinter(Vec<UnschedulableJob>),

    #[error("solver proved that no schedule satisfies all constraints")]
    SolverInfeasible,

    #[error("time limit reached before any feasible schedule was found")]
    TimedOut,

    #[error("solver failed: {0}")]
    SolverFailed(String),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("solver returned an inconsistent schedule: {0}")]
    InvalidSolution(String),
}
