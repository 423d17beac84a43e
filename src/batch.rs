//! File-driven scheduling: printers, models and task list in, report out.

use crate::config::Config;
use crate::domain::catalog::{load_jobs, load_printers};
use crate::domain::error::ScheduleError;
use crate::domain::schedule::Schedule;
use crate::domain::solve::schedule_jobs;
use crate::domain::solver_factory::create_solver;
use crate::error::ServiceError;
use crate::files::{read_models, read_printers, read_tasks, write_report};
use crate::report::render_report;

/// Process exit status for a failed batch: 2 for bad configuration or
/// input files, 3 when the jobs cannot be scheduled, 1 for anything else.
pub fn exit_code(err: &ServiceError) -> u8 {
    match err {
        ServiceError::Load(_) | ServiceError::Config(_) => 2,
        ServiceError::Schedule(
            ScheduleError::NoEligiblePrinter(_) | ScheduleError::SolverInfeasible | ScheduleError::TimedOut,
        ) => 3,
        _ => 1,
    }
}

/// Runs one batch. The report is written only when a schedule was produced.
pub fn run_files(config: &Config) -> Result<Schedule, ServiceError> {
    let printer_records = read_printers(&config.printers_path)?;
    let model_records = read_models(&config.models_path)?;
    let tasks = read_tasks(&config.tasks_path)?;

    let oracle = config.oracle.build();
    let printers = load_printers(&printer_records)?;
    let jobs = load_jobs(&model_records, &tasks, oracle.as_ref())?;
    log::info!(
        "Loaded {} printers, {} models, {} jobs",
        printers.len(),
        model_records.len(),
        jobs.len()
    );

    let solver = create_solver(config.solver);
    let schedule = schedule_jobs(&jobs, &printers, solver.as_ref(), &config.solve_options)?;

    write_report(&config.result_path, &render_report(&schedule))?;
    log::info!(
        "Wrote {} jobs to {} (makespan {:.3} h) using {}",
        schedule.job_count(),
        config.result_path.display(),
        schedule.makespan,
        solver.name()
    );
    Ok(schedule)
}
