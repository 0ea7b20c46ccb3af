//! Task analysis endpoint.

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::controllers::default_session_id;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/analyze-task").route(web::post().to(analyze_task)));
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeTaskRequest {
    task_description: String,
    #[serde(default = "default_session_id")]
    session_id: String,
}

/// Analyze a task and store the resulting breakdown in the session.
///
/// A successful analysis replaces any prior breakdown for the session and
/// invalidates previously chosen known-indices; a failed one leaves the
/// session untouched.
async fn analyze_task(
    state: web::Data<AppState>,
    request: web::Json<AnalyzeTaskRequest>,
) -> impl Responder {
    let task_description = request.task_description.trim();
    if task_description.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "detail": "Task description cannot be empty."
        }));
    }

    match state.analyzer.analyze(task_description).await {
        Ok(breakdown) => {
            state
                .sessions
                .store_breakdown(&request.session_id, breakdown.clone());
            HttpResponse::Ok().json(breakdown)
        }
        Err(e) => {
            log::error!("[API] task analysis failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "detail": e }))
        }
    }
}
