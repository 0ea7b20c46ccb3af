use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Kind of prerequisite identified by the task analyzer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    Concept,
    Technology,
    Skill,
    Tool,
}

impl Category {
    /// Parse a model-provided category string. Anything outside the known
    /// vocabulary maps to `Concept`.
    pub fn parse_lenient(s: &str) -> Self {
        s.trim().parse().unwrap_or(Category::Concept)
    }
}

/// Overall difficulty estimate for a task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "title_case", ascii_case_insensitive)]
pub enum Complexity {
    Beginner,
    Intermediate,
    Advanced,
}

impl Complexity {
    /// Parse a model-provided complexity string, defaulting to `Intermediate`.
    pub fn parse_lenient(s: &str) -> Self {
        s.trim().parse().unwrap_or(Complexity::Intermediate)
    }
}

/// A concept, technology, skill or tool needed before or during a task.
///
/// Prerequisites are identified by their position in the breakdown's list;
/// indices are only meaningful within the breakdown instance that produced
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prerequisite {
    pub name: String,
    pub category: Category,
    pub description: String,
    /// 0 = must learn first, 1 = should learn early, 2 = can learn later.
    pub priority: u32,
}

/// Structured decomposition of a task into prerequisites, a suggested
/// learning order and a complexity estimate. Produced once per analyze call
/// and replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskBreakdown {
    pub task_description: String,
    pub prerequisites: Vec<Prerequisite>,
    pub suggested_learning_order: Vec<String>,
    pub estimated_complexity: Complexity,
}
