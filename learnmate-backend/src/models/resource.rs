use serde::{Deserialize, Serialize};

/// A learning resource discovered via web search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub title: String,
    pub url: String,
    pub description: String,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "web".to_string()
}

impl LearningResource {
    pub fn web(title: impl Into<String>, url: impl Into<String>, description: impl Into<String>) -> Self {
        LearningResource {
            title: title.into(),
            url: url.into(),
            description: description.into(),
            source: default_source(),
        }
    }
}
