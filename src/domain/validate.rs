use std::collections::{HashMap, HashSet};

use crate::domain::error::LoadError;
use crate::models::{ModelRecord, PrinterRecord};

pub fn validate_printers(printers: &[PrinterRecord]) -> Result<(), LoadError> {
    let mut names: HashSet<&str> = HashSet::with_capacity(printers.len());

    for printer in printers {
        if !names.insert(printer.name.as_str()) {
            return Err(LoadError::DuplicatePrinter(printer.name.clone()));
        }
    }

    Ok(())
}

/// Indexes the model catalog by file_id. On duplicates the first record wins.
pub fn index_models(models: &[ModelRecord]) -> HashMap<&str, &ModelRecord> {
    let mut index: HashMap<&str, &ModelRecord> = HashMap::with_capacity(models.len());

    for model in models {
        if index.contains_key(model.file_id.as_str()) {
            log::warn!(
                "Duplicate model file_id {} in catalog, keeping the first record",
                model.file_id
            );
            continue;
        }
        index.insert(model.file_id.as_str(), model);
    }

    index
}

pub fn validate_duration(file_id: &str, hours: f64) -> Result<f64, LoadError> {
    if hours.is_finite() && hours > 0.0 {
        Ok(hours)
    } else {
        Err(LoadError::InvalidDuration {
            file_id: file_id.to_string(),
            value: hours,
        })
    }
}
