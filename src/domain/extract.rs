//! Reads a solved model back into per-printer job lists.
//!
//! The solver's answer is not trusted blindly. Every job must land on exactly
//! one printer, and jobs sharing a printer must not overlap; either failure
//! means the model or the solver misbehaved (an undersized big-M shows up
//! here) and is reported instead of producing a schedule.
//!
//! Each printer's jobs are ordered by solved start time. Once verified, the
//! sequence is compacted so that the first job starts at zero and each next
//! job starts when the previous one ends. Compaction keeps the solver's order
//! and never delays a completion.

use std::cmp::Ordering;

use crate::domain::builder::SchedulingModel;
use crate::domain::catalog::{Job, Printer};
use crate::domain::error::ScheduleError;
use crate::domain::schedule::{Optimality, PrinterSchedule, Schedule, ScheduledJob};

/// Binary values above this count as set; absorbs solver round-off.
pub const ASSIGNMENT_THRESHOLD: f64 = 0.5;
/// Slack allowed between consecutive jobs on one printer, in hours.
pub const OVERLAP_TOLERANCE: f64 = 1e-6;

pub fn extract_schedule(
    model: &SchedulingModel,
    jobs: &[Job],
    printers: &[Printer],
    values: &[f64],
    optimality: Optimality,
) -> Result<Schedule, ScheduleError> {
    if values.len() != model.milp.num_variables() {
        return Err(ScheduleError::InvalidSolution(format!(
            "expected {} variable values, got {}",
            model.milp.num_variables(),
            values.len()
        )));
    }

    let mut lanes: Vec<Vec<ScheduledJob>> = vec![Vec::new(); printers.len()];

    for (j, job) in jobs.iter().enumerate() {
        let assigned: Vec<usize> = model.assign[j]
            .iter()
            .filter(|&&(_, x)| values[x.index()] > ASSIGNMENT_THRESHOLD)
            .map(|&(p, _)| p)
            .collect();

        let printer = match assigned.as_slice() {
            [p] => *p,
            _ => {
                return Err(ScheduleError::InvalidSolution(format!(
                    "job {} ({}) is assigned to {} printers",
                    job.id,
                    job.model_id,
                    assigned.len()
                )))
            }
        };

        let start = values[model.start[j].index()];
        if !start.is_finite() {
            return Err(ScheduleError::InvalidSolution(format!(
                "job {} has start time {}",
                job.id, start
            )));
        }

        lanes[printer].push(ScheduledJob {
            job_id: job.id,
            model_id: job.model_id.clone(),
            start: start.max(0.0),
            duration: job.duration,
        });
    }

    let mut schedule = Vec::with_capacity(printers.len());
    for (printer, mut lane) in printers.iter().zip(lanes) {
        lane.sort_by(by_start);
        verify_no_overlap(&printer.name, &lane)?;
        compact(&mut lane);
        schedule.push(PrinterSchedule {
            printer: printer.name.clone(),
            jobs: lane,
        });
    }

    let makespan = schedule
        .iter()
        .flat_map(|p| p.jobs.iter().map(ScheduledJob::end))
        .fold(0.0, f64::max);

    Ok(Schedule {
        printers: schedule,
        makespan,
        optimality,
    })
}

fn by_start(a: &ScheduledJob, b: &ScheduledJob) -> Ordering {
    a.start
        .total_cmp(&b.start)
        .then_with(|| a.job_id.cmp(&b.job_id))
}

fn verify_no_overlap(printer: &str, lane: &[ScheduledJob]) -> Result<(), ScheduleError> {
    for pair in lane.windows(2) {
        let (first, next) = (&pair[0], &pair[1]);
        if first.end() > next.start + OVERLAP_TOLERANCE {
            return Err(ScheduleError::InvalidSolution(format!(
                "jobs {} and {} overlap on printer {} ([{:.4}, {:.4}) vs [{:.4}, {:.4}))",
                first.job_id,
                next.job_id,
                printer,
                first.start,
                first.end(),
                next.start,
                next.end()
            )));
        }
    }
    Ok(())
}

fn compact(lane: &mut [ScheduledJob]) {
    let mut cursor = 0.0;
    for job in lane {
        job.start = cursor;
        cursor += job.duration;
    }
}
