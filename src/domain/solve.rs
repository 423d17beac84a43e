use crate::domain::builder::build_model;
use crate::domain::catalog::{Job, Printer};
use crate::domain::eligibility::Eligibility;
use crate::domain::error::ScheduleError;
use crate::domain::extract::extract_schedule;
use crate::domain::schedule::{Optimality, Schedule};
use crate::domain::solver::{SolveOptions, SolveStatus, Solver};

/// Assigns every job to a printer and sequences each printer's jobs so that
/// the last one finishes as early as possible.
///
/// Jobs without an eligible printer are reported before the solver runs.
pub fn schedule_jobs(
    jobs: &[Job],
    printers: &[Printer],
    solver: &dyn Solver,
    options: &SolveOptions,
) -> Result<Schedule, ScheduleError> {
    if jobs.is_empty() {
        return Ok(Schedule::empty(printers));
    }

    let eligibility = Eligibility::compute(jobs, printers);
    eligibility
        .check_coverage(jobs)
        .map_err(ScheduleError::NoEligiblePrinter)?;

    let model = build_model(jobs, printers, &eligibility);
    log::info!(
        "Solving {} jobs on {} printers with {}: {}",
        jobs.len(),
        printers.len(),
        solver.name(),
        model.stats
    );

    let outcome = solver.solve(&model.milp, options)?;
    log::debug!(
        "{} finished with {:?}, objective {:?}",
        solver.name(),
        outcome.status,
        outcome.objective
    );

    match outcome.status {
        SolveStatus::Optimal => {
            extract_schedule(&model, jobs, printers, &outcome.values, Optimality::Proven)
        }
        SolveStatus::TimeLimit => {
            if outcome.values.is_empty() {
                return Err(ScheduleError::TimedOut);
            }
            // The incumbent may be garbage when none was found in time.
            match extract_schedule(&model, jobs, printers, &outcome.values, Optimality::TimeLimited) {
                Ok(schedule) => {
                    log::warn!(
                        "Time limit reached, returning unproven schedule with makespan {:.3}h",
                        schedule.makespan
                    );
                    Ok(schedule)
                }
                Err(err) => {
                    log::warn!("Time limit reached without a usable incumbent: {}", err);
                    Err(ScheduleError::TimedOut)
                }
            }
        }
        SolveStatus::Infeasible => Err(ScheduleError::SolverInfeasible),
        SolveStatus::Unbounded => Err(ScheduleError::SolverFailed(format!(
            "{} reported an unbounded model",
            solver.name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{MaterialRequirement, ModelSpec};
    use crate::domain::error::SolverError;
    use crate::domain::milp::MilpModel;
    use crate::domain::solver::SolverOutcome;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Replays a canned outcome and counts calls.
    struct ScriptedSolver {
        status: SolveStatus,
        values: Option<Vec<f64>>,
        calls: Mutex<usize>,
    }

    impl ScriptedSolver {
        fn new(status: SolveStatus, values: Option<Vec<f64>>) -> Self {
            ScriptedSolver {
                status,
                values,
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock()
        }
    }

    impl Solver for ScriptedSolver {
        fn solve(&self, model: &MilpModel, _options: &SolveOptions) -> Result<SolverOutcome, SolverError> {
            *self.calls.lock() += 1;
            Ok(match &self.values {
                Some(values) => SolverOutcome::with_values(self.status, model, values.clone()),
                None => SolverOutcome::without_values(self.status),
            })
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn job(id: usize, duration: f64, compatible: &[&str]) -> Job {
        Job {
            id,
            model_id: format!("m{}", id),
            spec: Arc::new(ModelSpec {
                file_id: format!("m{}", id),
                model_name: "part".to_string(),
                material: MaterialRequirement::One("PLA".to_string()),
                compatible_printers: compatible.iter().map(|c| c.to_string()).collect(),
                print_time: None,
            }),
            duration,
        }
    }

    fn printer(name: &str, model: &str) -> Printer {
        Printer {
            name: name.to_string(),
            model_name: Some(model.to_string()),
            materials: vec!["PLA".to_string()],
        }
    }

    #[test]
    fn test_empty_job_list_skips_solver() {
        let solver = ScriptedSolver::new(SolveStatus::Infeasible, None);
        let schedule =
            schedule_jobs(&[], &[printer("p0", "A")], &solver, &SolveOptions::default()).unwrap();
        assert_eq!(solver.calls(), 0);
        assert_eq!(schedule.makespan, 0.0);
        assert_eq!(schedule.printers.len(), 1);
    }

    #[test]
    fn test_stranded_job_is_reported_without_solving() {
        let solver = ScriptedSolver::new(SolveStatus::Optimal, None);
        let jobs = vec![job(0, 1.0, &["A"]), job(1, 1.0, &["Z"])];
        let err = schedule_jobs(&jobs, &[printer("p0", "A")], &solver, &SolveOptions::default())
            .unwrap_err();

        assert_eq!(solver.calls(), 0);
        match err {
            ScheduleError::NoEligiblePrinter(missing) => {
                assert_eq!(missing.len(), 1);
                assert_eq!(missing[0].job_id, 1);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_infeasible_status_is_surfaced() {
        let solver = ScriptedSolver::new(SolveStatus::Infeasible, None);
        let err = schedule_jobs(
            &[job(0, 1.0, &["A"])],
            &[printer("p0", "A")],
            &solver,
            &SolveOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, ScheduleError::SolverInfeasible);
    }

    #[test]
    fn test_time_limit_with_incumbent_is_flagged() {
        // columns: x_0_0, s_0, cmax
        let solver = ScriptedSolver::new(SolveStatus::TimeLimit, Some(vec![1.0, 0.0, 2.0]));
        let schedule = schedule_jobs(
            &[job(0, 2.0, &["A"])],
            &[printer("p0", "A")],
            &solver,
            &SolveOptions::default(),
        )
        .unwrap();
        assert_eq!(schedule.optimality, Optimality::TimeLimited);
        assert!(!schedule.is_optimal());
        assert_eq!(schedule.makespan, 2.0);
    }

    #[test]
    fn test_time_limit_without_incumbent_times_out() {
        let jobs = [job(0, 2.0, &["A"])];
        let printers = [printer("p0", "A")];

        let empty = ScriptedSolver::new(SolveStatus::TimeLimit, None);
        let err = schedule_jobs(&jobs, &printers, &empty, &SolveOptions::default()).unwrap_err();
        assert_eq!(err, ScheduleError::TimedOut);

        // nothing assigned: not a usable incumbent
        let garbage = ScriptedSolver::new(SolveStatus::TimeLimit, Some(vec![0.0, 0.0, 0.0]));
        let err = schedule_jobs(&jobs, &printers, &garbage, &SolveOptions::default()).unwrap_err();
        assert_eq!(err, ScheduleError::TimedOut);
    }

    #[test]
    fn test_unbounded_is_a_solver_failure() {
        let solver = ScriptedSolver::new(SolveStatus::Unbounded, None);
        let err = schedule_jobs(
            &[job(0, 1.0, &["A"])],
            &[printer("p0", "A")],
            &solver,
            &SolveOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ScheduleError::SolverFailed(_)));
    }
}
