//! Resource discovery endpoint.

use std::collections::HashSet;

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::controllers::{default_session_id, NO_BREAKDOWN_DETAIL};
use crate::models::Prerequisite;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/find-resources").route(web::post().to(find_resources)));
}

#[derive(Debug, Deserialize)]
pub struct FindResourcesRequest {
    #[serde(default)]
    known_prerequisite_indices: Vec<usize>,
    #[serde(default = "default_session_id")]
    session_id: String,
}

/// Find learning resources for every prerequisite the user does not already
/// know. The known-set is the request's indices into the current breakdown;
/// resources are only ever searched for the complement.
async fn find_resources(
    state: web::Data<AppState>,
    request: web::Json<FindResourcesRequest>,
) -> impl Responder {
    let Some(breakdown) = state.sessions.breakdown(&request.session_id) else {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "detail": NO_BREAKDOWN_DETAIL }));
    };

    let known: HashSet<usize> = request.known_prerequisite_indices.iter().copied().collect();
    let unknown: Vec<Prerequisite> = breakdown
        .prerequisites
        .iter()
        .enumerate()
        .filter(|(i, _)| !known.contains(i))
        .map(|(_, p)| p.clone())
        .collect();

    let resources = state.finder.find_for_prerequisites(&unknown).await;
    state
        .sessions
        .store_resources(&request.session_id, known, resources.clone());

    HttpResponse::Ok().json(serde_json::json!({ "resources": resources }))
}
