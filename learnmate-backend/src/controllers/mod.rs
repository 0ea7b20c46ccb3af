pub mod agents;
pub mod export;
pub mod files;
pub mod health;
pub mod resources;
pub mod sessions;
pub mod tasks;

/// Session id used when a request omits one.
pub(crate) fn default_session_id() -> String {
    "default".to_string()
}

pub(crate) const NO_BREAKDOWN_DETAIL: &str =
    "No task has been analyzed yet. Please analyze a task first.";

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use actix_web::web;
    use async_trait::async_trait;

    use crate::ai::OpenAIClient;
    use crate::config::Config;
    use crate::models::{Category, Complexity, Prerequisite, TaskBreakdown};
    use crate::search::{SearchHit, SearchProvider};
    use crate::AppState;

    /// Offline search stub that fabricates one documentation hit per query.
    pub struct EchoProvider;

    #[async_trait]
    impl SearchProvider for EchoProvider {
        async fn search(&self, query: &str, _max: usize) -> Result<Vec<SearchHit>, String> {
            let slug = query.to_lowercase().replace(' ', "-");
            Ok(vec![SearchHit {
                title: format!("{} tutorial", query),
                url: format!("https://docs.example.com/{}", slug),
                snippet: format!("All about {}", query),
            }])
        }
    }

    pub fn test_state() -> web::Data<AppState> {
        let config = Config {
            openai_api_key: "test-key".to_string(),
            openai_endpoint: None,
            openai_model: None,
            port: 0,
            max_results_per_concept: 5,
        };
        let ai = Arc::new(OpenAIClient::new("test-key", None, None, None).unwrap());
        web::Data::new(AppState::new(config, ai, Arc::new(EchoProvider)))
    }

    pub fn sample_breakdown(names: &[&str]) -> TaskBreakdown {
        TaskBreakdown {
            task_description: "Build a REST API with JWT authentication in Node.js".to_string(),
            prerequisites: names
                .iter()
                .enumerate()
                .map(|(i, n)| Prerequisite {
                    name: n.to_string(),
                    category: Category::Technology,
                    description: format!("Learn {}", n),
                    priority: i as u32,
                })
                .collect(),
            suggested_learning_order: names.iter().map(|n| n.to_string()).collect(),
            estimated_complexity: Complexity::Intermediate,
        }
    }
}
