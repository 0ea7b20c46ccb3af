//! Session lifecycle endpoint.

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::controllers::default_session_id;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/reset-session").route(web::delete().to(reset_session)));
}

#[derive(Debug, Deserialize)]
pub struct ResetParams {
    #[serde(default = "default_session_id")]
    session_id: String,
}

/// Discard all session state. The next request for this id starts from the
/// `input` phase again.
async fn reset_session(
    state: web::Data<AppState>,
    params: web::Query<ResetParams>,
) -> impl Responder {
    if state.sessions.reset(&params.session_id) {
        log::info!("[API] session '{}' reset", params.session_id);
    }
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support::{sample_breakdown, test_state};
    use crate::sessions::SessionPhase;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_reset_returns_204_and_clears_state() {
        let state = test_state();
        state
            .sessions
            .store_breakdown("s1", sample_breakdown(&["React"]));
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let req = test::TestRequest::delete()
            .uri("/api/reset-session?session_id=s1")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 204);
        assert_eq!(state.sessions.phase("s1"), SessionPhase::Input);
        assert!(state.sessions.breakdown("s1").is_none());
    }

    #[actix_web::test]
    async fn test_reset_unknown_session_is_still_204() {
        let state = test_state();
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let req = test::TestRequest::delete()
            .uri("/api/reset-session?session_id=never-seen")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 204);
    }
}
