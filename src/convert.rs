use crate::domain::eligibility::UnschedulableJob;
use crate::domain::schedule::{Optimality, PrinterSchedule, Schedule, ScheduledJob};
use crate::models::{
    ApiPrinterSchedule, ApiScheduledJob, ApiStatus, ApiUnschedulableJob, ScheduleResponse,
};

impl From<Optimality> for ApiStatus {
    fn from(o: Optimality) -> Self {
        match o {
            Optimality::Proven => ApiStatus::Optimal,
            Optimality::TimeLimited => ApiStatus::TimeLimited,
        }
    }
}

impl From<&ScheduledJob> for ApiScheduledJob {
    fn from(job: &ScheduledJob) -> Self {
        ApiScheduledJob {
            job_id: job.job_id,
            model_id: job.model_id.clone(),
            start: job.start,
            end: job.end(),
        }
    }
}

impl From<&PrinterSchedule> for ApiPrinterSchedule {
    fn from(p: &PrinterSchedule) -> Self {
        ApiPrinterSchedule {
            printer: p.printer.clone(),
            jobs: p.jobs.iter().map(ApiScheduledJob::from).collect(),
        }
    }
}

impl From<&UnschedulableJob> for ApiUnschedulableJob {
    fn from(job: &UnschedulableJob) -> Self {
        ApiUnschedulableJob {
            job_id: job.job_id,
            model_id: job.model_id.clone(),
            material: job.material.clone(),
            compatible_printers: job.compatible_printers.clone(),
        }
    }
}

pub fn to_schedule_response(schedule: &Schedule, solver: &str) -> ScheduleResponse {
    ScheduleResponse {
        status: schedule.optimality.into(),
        solver: solver.to_string(),
        makespan: schedule.makespan,
        schedule: schedule.printers.iter().map(ApiPrinterSchedule::from).collect(),
    }
}
