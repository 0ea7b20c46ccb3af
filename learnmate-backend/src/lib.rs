pub mod agents;
pub mod ai;
pub mod config;
pub mod controllers;
pub mod export;
pub mod files;
pub mod models;
pub mod search;
pub mod sessions;

use std::sync::Arc;

use agents::{CodeCompanion, ProjectPlanner, TaskAnalyzer, TutorAgent};
use ai::OpenAIClient;
use config::Config;
use search::{ResourceFinder, SearchProvider};
use sessions::SessionStore;

/// Shared application state handed to every handler.
pub struct AppState {
    pub config: Config,
    pub sessions: Arc<SessionStore>,
    pub analyzer: TaskAnalyzer,
    pub planner: ProjectPlanner,
    pub companion: CodeCompanion,
    pub tutor: TutorAgent,
    pub finder: Arc<ResourceFinder>,
}

impl AppState {
    pub fn new(config: Config, ai: Arc<OpenAIClient>, provider: Arc<dyn SearchProvider>) -> Self {
        let finder = Arc::new(ResourceFinder::new(
            provider,
            config.max_results_per_concept,
        ));
        AppState {
            sessions: Arc::new(SessionStore::new()),
            analyzer: TaskAnalyzer::new(ai.clone()),
            planner: ProjectPlanner::new(ai.clone()),
            companion: CodeCompanion::new(ai.clone()),
            tutor: TutorAgent::new(ai),
            finder,
            config,
        }
    }
}
