use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::domain::catalog::parse_task_list;
use crate::domain::error::LoadError;
use crate::models::{ModelRecord, PrinterRecord};

fn read_to_string(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| LoadError::Parse {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

pub fn read_printers(path: &Path) -> Result<Vec<PrinterRecord>, LoadError> {
    read_json(path)
}

pub fn read_models(path: &Path) -> Result<Vec<ModelRecord>, LoadError> {
    read_json(path)
}

pub fn read_tasks(path: &Path) -> Result<Vec<String>, LoadError> {
    Ok(parse_task_list(&read_to_string(path)?))
}

pub fn write_report(path: &Path, report: &str) -> Result<(), LoadError> {
    fs::write(path, report).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}
