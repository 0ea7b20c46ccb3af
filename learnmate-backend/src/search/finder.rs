//! Resource finder: maps prerequisites to ranked learning resources.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::models::{LearningResource, Prerequisite};
use crate::search::{filter, SearchProvider};

/// At most this many prerequisites are searched per call, highest priority
/// first.
pub const MAX_PREREQUISITES_PER_SEARCH: usize = 10;
const RESULTS_PER_QUERY: usize = 5;
const DESCRIPTION_LIMIT: usize = 200;

// Pauses keep the batch under the search provider's rate limits. Near-zero
// in tests.
const QUERY_DELAY: Duration = Duration::from_millis(if cfg!(test) { 1 } else { 500 });
const CONCEPT_DELAY: Duration = Duration::from_millis(if cfg!(test) { 1 } else { 300 });

pub struct ResourceFinder {
    provider: Arc<dyn SearchProvider>,
    max_results_per_concept: usize,
}

impl ResourceFinder {
    pub fn new(provider: Arc<dyn SearchProvider>, max_results_per_concept: usize) -> Self {
        ResourceFinder {
            provider,
            max_results_per_concept,
        }
    }

    /// Find resources for every given prerequisite.
    ///
    /// Every prerequisite searched gets an entry, even when all of its
    /// queries fail; failures never abort the batch.
    pub async fn find_for_prerequisites(
        &self,
        prerequisites: &[Prerequisite],
    ) -> HashMap<String, Vec<LearningResource>> {
        let mut by_priority: Vec<&Prerequisite> = prerequisites.iter().collect();
        by_priority.sort_by_key(|p| p.priority);

        let mut resources_by_concept = HashMap::new();
        for prerequisite in by_priority.into_iter().take(MAX_PREREQUISITES_PER_SEARCH) {
            log::info!("[SEARCH] finding resources for '{}'", prerequisite.name);
            let resources = self.find_for_concept(&prerequisite.name).await;
            if resources.is_empty() {
                log::warn!("[SEARCH] no resources found for '{}'", prerequisite.name);
            }
            resources_by_concept.insert(prerequisite.name.clone(), resources);
            tokio::time::sleep(CONCEPT_DELAY).await;
        }
        resources_by_concept
    }

    /// Search one concept across several query shapes. Failed queries are
    /// logged and skipped; surviving results are deduplicated by URL,
    /// filtered, scored and capped.
    pub async fn find_for_concept(&self, concept: &str) -> Vec<LearningResource> {
        let queries = [
            format!("{} tutorial", concept),
            format!("learn {}", concept),
            format!("{} documentation", concept),
            format!("{} course", concept),
            format!("{} getting started guide", concept),
        ];

        let mut seen_urls: HashSet<String> = HashSet::new();
        let mut scored: Vec<(i32, LearningResource)> = Vec::new();

        for query in &queries {
            let hits = match self.provider.search(query, RESULTS_PER_QUERY).await {
                Ok(hits) => hits,
                Err(e) => {
                    log::warn!("[SEARCH] query '{}' failed: {}", query, e);
                    continue;
                }
            };

            for hit in hits {
                if hit.url.is_empty() || hit.title.is_empty() || seen_urls.contains(&hit.url) {
                    continue;
                }
                // Stack Overflow threads are Q&A, not learning material.
                if hit.url.to_lowercase().contains("stackoverflow.com") {
                    continue;
                }
                if !filter::is_relevant(&hit.title, &hit.url, concept) {
                    continue;
                }
                if !filter::is_valid_resource(&hit.url, &hit.title, concept) {
                    continue;
                }

                let score = filter::score_resource(&hit.url, &hit.title, concept);
                seen_urls.insert(hit.url.clone());
                scored.push((
                    score,
                    LearningResource::web(hit.title, hit.url, truncate_description(&hit.snippet)),
                ));
            }

            tokio::time::sleep(QUERY_DELAY).await;
        }

        // Highest score first; stable sort keeps search-rank order on ties.
        scored.sort_by_key(|(score, _)| Reverse(*score));
        scored
            .into_iter()
            .take(self.max_results_per_concept)
            .map(|(_, resource)| resource)
            .collect()
    }
}

fn truncate_description(snippet: &str) -> String {
    if snippet.chars().count() > DESCRIPTION_LIMIT {
        let head: String = snippet.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{}...", head)
    } else {
        snippet.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::search::SearchHit;
    use async_trait::async_trait;

    fn prerequisite(name: &str, priority: u32) -> Prerequisite {
        Prerequisite {
            name: name.to_string(),
            category: Category::Technology,
            description: format!("Learn {}", name),
            priority,
        }
    }

    /// Provider that synthesizes one plausible hit per query, optionally
    /// failing for queries containing a marker string.
    struct QueryEchoProvider {
        fail_if_contains: Option<&'static str>,
    }

    #[async_trait]
    impl SearchProvider for QueryEchoProvider {
        async fn search(&self, query: &str, _max: usize) -> Result<Vec<SearchHit>, String> {
            if let Some(marker) = self.fail_if_contains {
                if query.contains(marker) {
                    return Err("rate limited".to_string());
                }
            }
            let slug = query.to_lowercase().replace(' ', "-");
            Ok(vec![SearchHit {
                title: format!("{} tutorial", query),
                url: format!("https://docs.example.com/{}", slug),
                snippet: format!("All about {}", query),
            }])
        }
    }

    /// Provider that always returns the same fixed hits.
    struct FixedProvider {
        hits: Vec<SearchHit>,
    }

    #[async_trait]
    impl SearchProvider for FixedProvider {
        async fn search(&self, _query: &str, _max: usize) -> Result<Vec<SearchHit>, String> {
            Ok(self.hits.clone())
        }
    }

    #[tokio::test]
    async fn test_every_prerequisite_gets_an_entry() {
        let finder = ResourceFinder::new(
            Arc::new(QueryEchoProvider {
                fail_if_contains: None,
            }),
            5,
        );
        let prereqs = vec![
            prerequisite("React", 0),
            prerequisite("JWT", 1),
            prerequisite("Express", 2),
        ];

        let map = finder.find_for_prerequisites(&prereqs).await;

        let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["Express", "JWT", "React"]);
        assert!(map.values().all(|v| !v.is_empty()));
    }

    #[tokio::test]
    async fn test_one_failing_concept_does_not_abort_batch() {
        let finder = ResourceFinder::new(
            Arc::new(QueryEchoProvider {
                fail_if_contains: Some("Node.js"),
            }),
            5,
        );
        let prereqs = vec![
            prerequisite("Node.js", 0),
            prerequisite("JWT", 1),
            prerequisite("React", 2),
        ];

        let map = finder.find_for_prerequisites(&prereqs).await;

        assert_eq!(map.len(), 3);
        assert!(map["Node.js"].is_empty());
        assert!(!map["JWT"].is_empty());
        assert!(!map["React"].is_empty());
    }

    #[tokio::test]
    async fn test_results_capped_per_concept() {
        let finder = ResourceFinder::new(
            Arc::new(QueryEchoProvider {
                fail_if_contains: None,
            }),
            3,
        );
        // Five query shapes produce five distinct URLs; the cap keeps three.
        let resources = finder.find_for_concept("React").await;
        assert_eq!(resources.len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_urls_are_deduplicated() {
        let hit = SearchHit {
            title: "React Tutorial".to_string(),
            url: "https://react.dev/learn".to_string(),
            snippet: "Official docs".to_string(),
        };
        let finder = ResourceFinder::new(Arc::new(FixedProvider { hits: vec![hit] }), 5);

        let resources = finder.find_for_concept("React").await;
        assert_eq!(resources.len(), 1);
    }

    #[tokio::test]
    async fn test_higher_scored_resources_rank_first() {
        let hits = vec![
            SearchHit {
                title: "React notes".to_string(),
                url: "https://medium.com/react-notes".to_string(),
                snippet: "A blog post".to_string(),
            },
            SearchHit {
                title: "React Tutorial".to_string(),
                url: "https://react.dev/learn".to_string(),
                snippet: "Official docs".to_string(),
            },
        ];
        let finder = ResourceFinder::new(Arc::new(FixedProvider { hits }), 5);

        let resources = finder.find_for_concept("React").await;
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].url, "https://react.dev/learn");
    }

    #[tokio::test]
    async fn test_invalid_results_are_dropped() {
        let hits = vec![
            SearchHit {
                title: "How to learn React".to_string(),
                url: "https://stackoverflow.com/questions/1".to_string(),
                snippet: "Q&A".to_string(),
            },
            SearchHit {
                title: "Cooking recipes".to_string(),
                url: "https://recipes.example.com".to_string(),
                snippet: "Unrelated".to_string(),
            },
        ];
        let finder = ResourceFinder::new(Arc::new(FixedProvider { hits }), 5);

        let resources = finder.find_for_concept("React").await;
        assert!(resources.is_empty());
    }

    #[tokio::test]
    async fn test_prerequisite_search_cap() {
        let finder = ResourceFinder::new(
            Arc::new(QueryEchoProvider {
                fail_if_contains: None,
            }),
            1,
        );
        let prereqs: Vec<Prerequisite> = (0..12)
            .map(|i| prerequisite(&format!("Topic{}", i), i))
            .collect();

        let map = finder.find_for_prerequisites(&prereqs).await;
        assert_eq!(map.len(), MAX_PREREQUISITES_PER_SEARCH);
        // Highest-priority prerequisites are the ones searched.
        assert!(map.contains_key("Topic0"));
        assert!(!map.contains_key("Topic11"));
    }

    #[test]
    fn test_truncate_description() {
        let short = "brief";
        assert_eq!(truncate_description(short), "brief");

        let long = "x".repeat(250);
        let truncated = truncate_description(&long);
        assert_eq!(truncated.chars().count(), DESCRIPTION_LIMIT + 3);
        assert!(truncated.ends_with("..."));
    }
}
