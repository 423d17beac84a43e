//! Jobs and printers as the scheduler sees them.
//!
//! Catalog records arrive as loosely typed wire structs; this module turns
//! them into immutable domain values once, at load time. Every job is one
//! occurrence of a model file_id in the task list, so duplicates in the list
//! are distinct jobs sharing a single `ModelSpec`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::error::LoadError;
use crate::domain::oracle::DurationOracle;
use crate::domain::validate::{index_models, validate_duration, validate_printers};
use crate::models::{ModelRecord, PrinterRecord};

/// Material a model must be printed in: one type, or any of several.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum MaterialRequirement {
    One(String),
    AnyOf(Vec<String>),
}

impl MaterialRequirement {
    pub fn accepts(&self, material: &str) -> bool {
        match self {
            MaterialRequirement::One(required) => required == material,
            MaterialRequirement::AnyOf(accepted) => accepted.iter().any(|m| m == material),
        }
    }
}

impl fmt::Display for MaterialRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialRequirement::One(required) => write!(f, "{}", required),
            MaterialRequirement::AnyOf(accepted) => write!(f, "[{}]", accepted.join(", ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    pub file_id: String,
    pub model_name: String,
    pub material: MaterialRequirement,
    pub compatible_printers: Vec<String>,
    /// Explicit print time in hours, if the catalog carries one.
    pub print_time: Option<f64>,
}

impl ModelSpec {
    pub fn from_record(record: &ModelRecord) -> Result<Self, LoadError> {
        let print_time = match record.print_time.as_deref() {
            Some(raw) => Some(parse_print_time(raw).ok_or_else(|| LoadError::InvalidPrintTime {
                file_id: record.file_id.clone(),
                value: raw.to_string(),
            })?),
            None => None,
        };

        Ok(ModelSpec {
            file_id: record.file_id.clone(),
            model_name: record.model_name.clone(),
            material: record.material.clone(),
            compatible_printers: record.compatible_printers.clone(),
            print_time,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Printer {
    pub name: String,
    /// Printers without a declared model never match a compatibility list.
    pub model_name: Option<String>,
    pub materials: Vec<String>,
}

impl From<&PrinterRecord> for Printer {
    fn from(record: &PrinterRecord) -> Self {
        Printer {
            name: record.name.clone(),
            model_name: record.model_name.clone(),
            materials: record.materials.iter().map(|m| m.kind.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    /// Position in the task list.
    pub id: usize,
    pub model_id: String,
    pub spec: Arc<ModelSpec>,
    /// Processing time in hours, strictly positive.
    pub duration: f64,
}

/// Parses "H:M:S" into hours.
pub fn parse_print_time(value: &str) -> Option<f64> {
    let mut parts = value.trim().split(':');
    let hours: u32 = parts.next()?.trim().parse().ok()?;
    let minutes: u32 = parts.next()?.trim().parse().ok()?;
    let seconds: u32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(hours as f64 + minutes as f64 / 60.0 + seconds as f64 / 3600.0)
}

/// One model file_id per non-blank line.
pub fn parse_task_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn load_printers(records: &[PrinterRecord]) -> Result<Vec<Printer>, LoadError> {
    validate_printers(records)?;
    Ok(records.iter().map(Printer::from).collect())
}

/// Resolves every task against the model catalog and estimates its duration.
///
/// Fails on the first task whose file_id has no model; no partial job list
/// is ever returned.
pub fn load_jobs(
    models: &[ModelRecord],
    tasks: &[String],
    oracle: &dyn DurationOracle,
) -> Result<Vec<Job>, LoadError> {
    let records = index_models(models);
    let mut specs: HashMap<&str, Arc<ModelSpec>> = HashMap::with_capacity(records.len());
    let mut jobs = Vec::with_capacity(tasks.len());

    for (id, file_id) in tasks.iter().enumerate() {
        let spec = match specs.get(file_id.as_str()) {
            Some(spec) => Arc::clone(spec),
            None => {
                let record = records
                    .get(file_id.as_str())
                    .copied()
                    .ok_or_else(|| LoadError::UnknownModel {
                        job_id: id,
                        file_id: file_id.clone(),
                    })?;
                let spec = Arc::new(ModelSpec::from_record(record)?);
                specs.insert(record.file_id.as_str(), Arc::clone(&spec));
                spec
            }
        };

        let duration = validate_duration(&spec.file_id, oracle.estimate(&spec))?;
        jobs.push(Job {
            id,
            model_id: file_id.clone(),
            spec,
            duration,
        });
    }

    Ok(jobs)
}
