use serde::{Deserialize, Serialize};

use crate::domain::catalog::MaterialRequirement;

// ---------- Catalog (wire) types: owned & serde-friendly ----------

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MaterialRecord {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PrinterRecord {
    pub name: String,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub materials: Vec<MaterialRecord>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModelRecord {
    pub file_id: String,
    #[serde(default)]
    pub model_name: String,
    pub material: MaterialRequirement,
    #[serde(default)]
    pub compatible_printers: Vec<String>,
    /// "HH:MM:SS"; when absent the duration oracle estimates it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_time: Option<String>,
}

// ---------- API request / response types ----------

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ScheduleRequest {
    pub printers: Vec<PrinterRecord>,
    pub models: Vec<ModelRecord>,
    /// Model file_ids, one job per entry, in arrival order.
    pub tasks: Vec<String>,
    #[serde(default)]
    pub solver: Option<String>,
    #[serde(default)]
    pub time_limit_secs: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApiStatus {
    Optimal,
    TimeLimited,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiScheduledJob {
    pub job_id: usize,
    pub model_id: String,
    pub start: f64,
    pub end: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiPrinterSchedule {
    pub printer: String,
    pub jobs: Vec<ApiScheduledJob>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ScheduleResponse {
    pub status: ApiStatus,
    pub solver: String,
    pub makespan: f64,
    pub schedule: Vec<ApiPrinterSchedule>,
}

/// One job that no printer can take, as reported to API clients.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiUnschedulableJob {
    pub job_id: usize,
    pub model_id: String,
    pub material: MaterialRequirement,
    pub compatible_printers: Vec<String>,
}
