//! Markdown export endpoint.

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::controllers::{default_session_id, NO_BREAKDOWN_DETAIL};
use crate::export::markdown;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/export-markdown").route(web::post().to(export_markdown)));
}

#[derive(Debug, Deserialize)]
pub struct ExportMarkdownRequest {
    #[serde(default = "default_session_id")]
    session_id: String,
}

async fn export_markdown(
    state: web::Data<AppState>,
    request: web::Json<ExportMarkdownRequest>,
) -> impl Responder {
    let Some(breakdown) = state.sessions.breakdown(&request.session_id) else {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "detail": NO_BREAKDOWN_DETAIL }));
    };

    let resources = state.sessions.resources(&request.session_id);
    let content = markdown::generate_markdown(&breakdown, &resources);

    HttpResponse::Ok().json(serde_json::json!({
        "markdown": content,
        "filename": markdown::EXPORT_FILENAME
    }))
}
