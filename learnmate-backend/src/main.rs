use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

use learnmate_backend::ai::OpenAIClient;
use learnmate_backend::config::Config;
use learnmate_backend::controllers;
use learnmate_backend::search::{DuckDuckGoClient, SearchProvider};
use learnmate_backend::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let port = config.port;

    let ai = Arc::new(
        OpenAIClient::new(
            &config.openai_api_key,
            config.openai_endpoint.as_deref(),
            config.openai_model.as_deref(),
            None,
        )
        .expect("Failed to create AI client"),
    );
    let provider: Arc<dyn SearchProvider> =
        Arc::new(DuckDuckGoClient::new().expect("Failed to create search client"));

    let state = web::Data::new(AppState::new(config, ai, provider));

    log::info!("Starting LearnMate API server on port {}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config)
            .configure(controllers::tasks::config)
            .configure(controllers::files::config)
            .configure(controllers::resources::config)
            .configure(controllers::agents::config)
            .configure(controllers::export::config)
            .configure(controllers::sessions::config)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
