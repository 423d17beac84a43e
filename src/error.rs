use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::error::{LoadError, ScheduleError};
use crate::domain::solver_factory::SolverType;
use crate::models::ApiUnschedulableJob;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("unknown solver {0:?}, available: {names}", names = SolverType::available().join(", "))]
    UnknownSolver(String),

    #[error("time_limit_secs must be a positive number of seconds, got {0}")]
    InvalidTimeLimit(f64),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("scheduling task failed: {0}")]
    Blocking(String),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::UnknownSolver(_) | ServiceError::InvalidTimeLimit(_) | ServiceError::Load(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::Schedule(
                ScheduleError::NoEligiblePrinter(_)
                | ScheduleError::SolverInfeasible
                | ScheduleError::TimedOut,
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = serde_json::json!({ "error": self.to_string() });
        if let ServiceError::Schedule(ScheduleError::NoEligiblePrinter(jobs)) = self {
            let jobs: Vec<ApiUnschedulableJob> = jobs.iter().map(ApiUnschedulableJob::from).collect();
            body["jobs"] = serde_json::json!(jobs);
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::MaterialRequirement;
    use crate::domain::eligibility::UnschedulableJob;

    #[test]
    fn test_status_codes() {
        let load = ServiceError::Load(LoadError::UnknownModel {
            job_id: 0,
            file_id: "x".to_string(),
        });
        assert_eq!(load.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ServiceError::UnknownSolver("cplex".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Schedule(ScheduleError::SolverInfeasible).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ServiceError::Schedule(ScheduleError::TimedOut).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ServiceError::Schedule(ScheduleError::InvalidSolution("overlap".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_no_eligible_printer_lists_jobs() {
        let err = ServiceError::Schedule(ScheduleError::NoEligiblePrinter(vec![UnschedulableJob {
            job_id: 2,
            model_id: "vase".to_string(),
            material: MaterialRequirement::One("TPU".to_string()),
            compatible_printers: vec!["MK4".to_string()],
        }]));
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
