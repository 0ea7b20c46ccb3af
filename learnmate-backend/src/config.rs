use std::env;

#[derive(Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_endpoint: Option<String>,
    pub openai_model: Option<String>,
    pub port: u16,
    pub max_results_per_concept: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set"),
            openai_endpoint: env::var("OPENAI_ENDPOINT").ok(),
            openai_model: env::var("OPENAI_MODEL").ok(),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            max_results_per_concept: env::var("MAX_RESULTS_PER_CONCEPT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("MAX_RESULTS_PER_CONCEPT must be a valid number"),
        }
    }
}
