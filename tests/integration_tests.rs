use actix_web::{test, web, App};
use serde_json::{json, Value};

use printfarm_scheduler::config::Config;
use printfarm_scheduler::routes::{configure, json_config, AppState};

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState {
                    config: Config::default(),
                }))
                .app_data(json_config(2 * 1024 * 1024))
                .configure(configure),
        )
        .await
    };
}

fn farm() -> Value {
    json!({
        "printers": [
            {"name": "P1", "model_name": "MK4", "materials": [{"type": "PLA"}]},
            {"name": "P2", "model_name": "X1C", "materials": [{"type": "PETG"}, {"type": "PLA"}]}
        ],
        "models": [
            {"file_id": "gear", "material": "PLA", "compatible_printers": ["MK4", "X1C"], "print_time": "1:00:00"},
            {"file_id": "case", "material": ["PETG"], "compatible_printers": ["X1C"], "print_time": "2:30:00"},
            {"file_id": "clip", "material": "PLA", "compatible_printers": ["MK4"], "print_time": "0:30:00"}
        ],
        "tasks": ["gear", "case", "clip", "gear"]
    })
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = app!();
    let req = test::TestRequest::get().uri("/health").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "OK");
}

#[actix_web::test]
async fn test_schedule_valid_request() {
    let app = app!();
    let req = test::TestRequest::post().uri("/schedule").set_json(farm()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "optimal");
    assert_eq!(body["solver"], "MicroLP");

    let schedule = body["schedule"].as_array().unwrap();
    assert_eq!(schedule.len(), 2);
    assert_eq!(schedule[0]["printer"], "P1");
    assert_eq!(schedule[1]["printer"], "P2");

    let mut seen: Vec<u64> = schedule
        .iter()
        .flat_map(|p| p["jobs"].as_array().unwrap())
        .map(|j| j["job_id"].as_u64().unwrap())
        .collect();
    seen.sort();
    assert_eq!(seen, vec![0, 1, 2, 3]);

    // case (2.5h) must run on P2; the rest balances around it
    let makespan = body["makespan"].as_f64().unwrap();
    assert!((makespan - 2.5).abs() < 1e-6, "makespan was {}", makespan);
}

#[actix_web::test]
async fn test_schedule_empty_task_list() {
    let app = app!();
    let mut payload = farm();
    payload["tasks"] = json!([]);
    let req = test::TestRequest::post().uri("/schedule").set_json(payload).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["makespan"], 0.0);
    assert!(body["schedule"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["jobs"].as_array().unwrap().is_empty()));
}

#[actix_web::test]
async fn test_schedule_invalid_json() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/schedule")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"printers\": [")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_schedule_unknown_model() {
    let app = app!();
    let mut payload = farm();
    payload["tasks"] = json!(["gear", "widget"]);
    let req = test::TestRequest::post().uri("/schedule").set_json(payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("widget"));
}

#[actix_web::test]
async fn test_schedule_unknown_solver() {
    let app = app!();
    let mut payload = farm();
    payload["solver"] = json!("cplex");
    let req = test::TestRequest::post().uri("/schedule").set_json(payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_schedule_no_eligible_printer() {
    let app = app!();
    let mut payload = farm();
    payload["models"][2]["material"] = json!("TPU");
    let req = test::TestRequest::post().uri("/schedule").set_json(payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: Value = test::read_body_json(resp).await;
    let jobs = body["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["job_id"], 2);
    assert_eq!(jobs[0]["model_id"], "clip");
}

#[actix_web::test]
async fn test_nonexistent_endpoint() {
    let app = app!();
    let req = test::TestRequest::get().uri("/solve").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
