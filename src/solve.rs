use crate::config::{seconds_to_duration, Config};
use crate::convert::to_schedule_response;
use crate::domain::catalog::{load_jobs, load_printers};
use crate::domain::solve::schedule_jobs;
use crate::domain::solver_factory::{create_solver, SolverType};
use crate::error::ServiceError;
use crate::models::{ScheduleRequest, ScheduleResponse};

/// Loads, schedules and converts one request. Runs on a blocking thread.
pub fn schedule_request(req: &ScheduleRequest, config: &Config) -> Result<ScheduleResponse, ServiceError> {
    let solver_type = match req.solver.as_deref() {
        Some(name) => {
            SolverType::from_str(name).ok_or_else(|| ServiceError::UnknownSolver(name.to_string()))?
        }
        None => config.solver,
    };

    let mut options = config.solve_options;
    if let Some(secs) = req.time_limit_secs {
        options.time_limit = Some(seconds_to_duration(secs).ok_or(ServiceError::InvalidTimeLimit(secs))?);
    }

    // Load everything before any optimization work.
    let oracle = config.oracle.build();
    let printers = load_printers(&req.printers)?;
    let jobs = load_jobs(&req.models, &req.tasks, oracle.as_ref())?;

    let solver = create_solver(solver_type);
    let schedule = schedule_jobs(&jobs, &printers, solver.as_ref(), &options)?;

    Ok(to_schedule_response(&schedule, solver.name()))
}
