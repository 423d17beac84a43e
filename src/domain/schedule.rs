use crate::domain::catalog::Printer;

/// Whether the schedule's makespan is proven minimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Optimality {
    Proven,
    /// The solver's budget ran out first; the schedule is valid but may be improvable.
    TimeLimited,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledJob {
    pub job_id: usize,
    pub model_id: String,
    /// Hours from the schedule origin.
    pub start: f64,
    pub duration: f64,
}

impl ScheduledJob {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrinterSchedule {
    pub printer: String,
    /// Ordered by start time.
    pub jobs: Vec<ScheduledJob>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// Every printer, in input order, idle ones included.
    pub printers: Vec<PrinterSchedule>,
    pub makespan: f64,
    pub optimality: Optimality,
}

impl Schedule {
    pub fn empty(printers: &[Printer]) -> Self {
        Schedule {
            printers: printers
                .iter()
                .map(|p| PrinterSchedule {
                    printer: p.name.clone(),
                    jobs: Vec::new(),
                })
                .collect(),
            makespan: 0.0,
            optimality: Optimality::Proven,
        }
    }

    /// Name of the printer a job runs on.
    pub fn printer_of(&self, job_id: usize) -> Option<&str> {
        self.printers
            .iter()
            .find(|p| p.jobs.iter().any(|j| j.job_id == job_id))
            .map(|p| p.printer.as_str())
    }

    pub fn job_count(&self) -> usize {
        self.printers.iter().map(|p| p.jobs.len()).sum()
    }

    pub fn is_optimal(&self) -> bool {
        self.optimality == Optimality::Proven
    }
}
