//! Agent helper endpoints: project plan, code example and tutor Q&A.
//!
//! Each helper is a single request/response over current session data; the
//! model's markdown reply is passed through verbatim.

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::controllers::{default_session_id, NO_BREAKDOWN_DETAIL};
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/generate-plan").route(web::post().to(generate_plan)));
    cfg.service(web::resource("/api/get-code-example").route(web::post().to(get_code_example)));
    cfg.service(web::resource("/api/ask-tutor").route(web::post().to(ask_tutor)));
}

#[derive(Debug, Deserialize)]
pub struct GeneratePlanRequest {
    #[serde(default = "default_session_id")]
    session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GetCodeExampleRequest {
    concept: String,
    #[serde(default = "default_session_id")]
    session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AskTutorRequest {
    query: String,
    #[serde(default = "default_session_id")]
    session_id: String,
}

async fn generate_plan(
    state: web::Data<AppState>,
    request: web::Json<GeneratePlanRequest>,
) -> impl Responder {
    let Some(breakdown) = state.sessions.breakdown(&request.session_id) else {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "detail": NO_BREAKDOWN_DETAIL }));
    };

    match state.planner.generate_plan(&breakdown).await {
        Ok(plan) => HttpResponse::Ok().json(serde_json::json!({ "plan": plan })),
        Err(e) => {
            log::error!("[API] plan generation failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "detail": e }))
        }
    }
}

async fn get_code_example(
    state: web::Data<AppState>,
    request: web::Json<GetCodeExampleRequest>,
) -> impl Responder {
    let concept = request.concept.trim();
    if concept.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "detail": "Concept cannot be empty."
        }));
    }
    let Some(breakdown) = state.sessions.breakdown(&request.session_id) else {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "detail": NO_BREAKDOWN_DETAIL }));
    };

    match state
        .companion
        .code_example(concept, &breakdown.task_description)
        .await
    {
        Ok(code) => HttpResponse::Ok().json(serde_json::json!({ "code": code })),
        Err(e) => {
            log::error!("[API] code example failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "detail": e }))
        }
    }
}

async fn ask_tutor(
    state: web::Data<AppState>,
    request: web::Json<AskTutorRequest>,
) -> impl Responder {
    let query = request.query.trim();
    if query.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "detail": "Query cannot be empty."
        }));
    }
    let Some(breakdown) = state.sessions.breakdown(&request.session_id) else {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "detail": NO_BREAKDOWN_DETAIL }));
    };

    match state
        .tutor
        .respond(query, &breakdown.task_description)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(serde_json::json!({ "response": response })),
        Err(e) => {
            log::error!("[API] tutor response failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "detail": e }))
        }
    }
}
