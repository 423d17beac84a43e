use std::fmt;

use crate::domain::schedule::Schedule;

/// Plain-text report: each printer on its own line, followed by the model
/// ids it prints, indented, in schedule order.
pub fn render_report(schedule: &Schedule) -> String {
    schedule.to_string()
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for printer in &self.printers {
            writeln!(f, "{}:", printer.printer)?;
            for job in &printer.jobs {
                writeln!(f, "  {}", job.model_id)?;
            }
        }
        Ok(())
    }
}
