use actix_web::{web, HttpResponse, Responder};

use crate::config::Config;
use crate::error::ServiceError;
use crate::models::ScheduleRequest;
use crate::solve::schedule_request;

pub struct AppState {
    pub config: Config,
}

/// POST /schedule
pub async fn schedule(
    state: web::Data<AppState>,
    req: web::Json<ScheduleRequest>,
) -> Result<HttpResponse, ServiceError> {
    let request = req.into_inner();
    let config = state.config.clone();

    // Solving blocks; keep it off the async workers
    let response = web::block(move || schedule_request(&request, &config))
        .await
        .map_err(|e| ServiceError::Blocking(e.to_string()))??;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// Malformed bodies answer 400 with `{"error": ...}`.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _| {
            let err_string = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(serde_json::json!({ "error": err_string })),
            )
            .into()
        })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/schedule", web::post().to(schedule))
        .route("/health", web::get().to(health_check));
}
