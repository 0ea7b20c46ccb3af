pub mod duckduckgo;
pub mod filter;
pub mod finder;

pub use duckduckgo::DuckDuckGoClient;
pub use finder::ResourceFinder;

use async_trait::async_trait;

/// One raw result from a web-search backend, before filtering.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// A web-search backend. Production uses DuckDuckGo; tests substitute stubs.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, String>;
}
