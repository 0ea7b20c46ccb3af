//! Task analyzer: decomposes an assignment into prerequisite concepts.

use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::ai::{Message, OpenAIClient};
use crate::models::{Category, Complexity, Prerequisite, TaskBreakdown};

/// Hard cap on prerequisites kept from a single analysis.
const MAX_PREREQUISITES: usize = 12;
const MAX_LEARNING_ORDER: usize = 10;

const DECOMPOSITION_PROMPT: &str = r#"
You are an expert learning advisor. Analyze the following task/assignment and identify the ESSENTIAL prerequisite concepts and technologies needed to complete it. Keep it concise - focus on the most important prerequisites only.

Task: {task}

Provide a brief breakdown in the following JSON format (limit to 8-12 most essential prerequisites):
{
  "prerequisites": [
    {
      "name": "concept/technology name",
      "category": "concept|technology|skill|tool",
      "description": "brief description of why this is needed",
      "priority": 0
    }
  ],
  "suggested_learning_order": ["prerequisite1", "prerequisite2", ...],
  "estimated_complexity": "beginner|intermediate|advanced"
}

Priorities: 0 = must learn first, 1 = should learn early, 2 = can learn later
Categories:
- "concept": fundamental concepts/theories
- "technology": specific technologies/frameworks/libraries
- "skill": practical skills/techniques
- "tool": development tools/platforms

IMPORTANT:
- Focus on HIGH-LEVEL prerequisites only (e.g., "React" not "React hooks, React components, React state management" separately)
- Group related concepts together
- Limit to 8-12 most essential prerequisites maximum
- Prioritize technologies and core concepts over detailed sub-skills
"#;

/// Loose mirror of the JSON the model is asked to produce; every field is
/// optional so partially conforming replies still parse.
#[derive(Debug, Deserialize)]
struct RawBreakdown {
    #[serde(default)]
    prerequisites: Vec<RawPrerequisite>,
    #[serde(default)]
    suggested_learning_order: Vec<String>,
    #[serde(default)]
    estimated_complexity: String,
}

#[derive(Debug, Deserialize)]
struct RawPrerequisite {
    #[serde(default)]
    name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default, deserialize_with = "deserialize_priority_lenient")]
    priority: u32,
}

/// Deserialize a priority from either a number or a string.
fn deserialize_priority_lenient<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    match value {
        Some(Value::Number(n)) => Ok(n.as_u64().unwrap_or(0) as u32),
        Some(Value::String(s)) => Ok(s.trim().parse().unwrap_or(0)),
        _ => Ok(0),
    }
}

/// Analyzes tasks and breaks them down into prerequisite learning topics.
pub struct TaskAnalyzer {
    ai: Arc<OpenAIClient>,
    json_block: Regex,
    list_numbering: Regex,
}

impl TaskAnalyzer {
    pub fn new(ai: Arc<OpenAIClient>) -> Self {
        TaskAnalyzer {
            ai,
            json_block: Regex::new(r"(?s)\{.*\}").unwrap(),
            list_numbering: Regex::new(r"^[\d\-\*\.\s]+").unwrap(),
        }
    }

    /// Analyze a task and return its structured breakdown.
    ///
    /// Provider failures and unparseable replies surface as errors; nothing
    /// partial is produced.
    pub async fn analyze(&self, task_description: &str) -> Result<TaskBreakdown, String> {
        let prompt = DECOMPOSITION_PROMPT.replace("{task}", task_description);
        let reply = self.ai.generate_text(vec![Message::user(prompt)]).await?;
        self.parse_reply(task_description, &reply)
    }

    /// Parse the model reply: first the requested JSON shape, then a
    /// bulleted-list fallback for models that answered in prose.
    fn parse_reply(&self, task_description: &str, reply: &str) -> Result<TaskBreakdown, String> {
        if let Some(breakdown) = self.parse_json_reply(task_description, reply) {
            return Ok(breakdown);
        }

        log::warn!("[ANALYZER] reply had no usable JSON, extracting from list items");
        let breakdown = self.extract_from_list_items(task_description, reply);
        if breakdown.prerequisites.is_empty() {
            return Err(
                "Task analysis failed: the AI response did not contain a usable breakdown"
                    .to_string(),
            );
        }
        Ok(breakdown)
    }

    fn parse_json_reply(&self, task_description: &str, reply: &str) -> Option<TaskBreakdown> {
        let json_text = self.json_block.find(reply)?.as_str();
        let raw: RawBreakdown = serde_json::from_str(json_text).ok()?;

        let mut prerequisites: Vec<Prerequisite> = raw
            .prerequisites
            .into_iter()
            .filter(|p| !p.name.trim().is_empty())
            .take(MAX_PREREQUISITES)
            .map(|p| Prerequisite {
                name: p.name.trim().to_string(),
                category: Category::parse_lenient(&p.category),
                description: p.description,
                priority: p.priority,
            })
            .collect();

        if prerequisites.is_empty() {
            return None;
        }
        // Stable sort keeps the model's ordering within a priority band.
        prerequisites.sort_by_key(|p| p.priority);

        Some(TaskBreakdown {
            task_description: task_description.to_string(),
            prerequisites,
            suggested_learning_order: raw.suggested_learning_order,
            estimated_complexity: Complexity::parse_lenient(&raw.estimated_complexity),
        })
    }

    /// Extract prerequisites from numbered or bulleted lines of an
    /// unstructured reply.
    fn extract_from_list_items(&self, task_description: &str, reply: &str) -> TaskBreakdown {
        let mut prerequisites: Vec<Prerequisite> = Vec::new();

        for line in reply.lines() {
            let line = line.trim();
            if line.len() < 3 {
                continue;
            }
            let is_list_item = line.starts_with(|c: char| c.is_ascii_digit())
                || line.starts_with('-')
                || line.starts_with('*');
            if !is_list_item {
                continue;
            }

            // Prerequisite name is the first segment before a colon or comma,
            // with list numbering stripped.
            let head = line
                .split(':')
                .next()
                .and_then(|s| s.split(',').next())
                .unwrap_or("");
            let name = self.list_numbering.replace(head, "").trim().to_string();

            if name.len() > 2 {
                prerequisites.push(Prerequisite {
                    name,
                    category: Category::Concept,
                    description: line.to_string(),
                    priority: prerequisites.len() as u32,
                });
            }
            if prerequisites.len() == MAX_PREREQUISITES {
                break;
            }
        }

        let suggested_learning_order = prerequisites
            .iter()
            .take(MAX_LEARNING_ORDER)
            .map(|p| p.name.clone())
            .collect();

        TaskBreakdown {
            task_description: task_description.to_string(),
            prerequisites,
            suggested_learning_order,
            estimated_complexity: Complexity::Intermediate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> TaskAnalyzer {
        let ai = Arc::new(OpenAIClient::new("test-key", None, None, None).unwrap());
        TaskAnalyzer::new(ai)
    }

    #[test]
    fn test_parse_json_reply() {
        let reply = r#"Here is the breakdown you asked for:
{
  "prerequisites": [
    {"name": "REST API design", "category": "concept", "description": "how to shape endpoints", "priority": 2},
    {"name": "Node.js", "category": "technology", "description": "runtime", "priority": 0},
    {"name": "JWT", "category": "concept", "description": "token auth", "priority": 1}
  ],
  "suggested_learning_order": ["Node.js", "JWT", "REST API design"],
  "estimated_complexity": "intermediate"
}
Good luck!"#;

        let breakdown = analyzer()
            .parse_reply("Build a REST API with JWT authentication in Node.js", reply)
            .unwrap();

        // Sorted by ascending priority.
        let names: Vec<&str> = breakdown
            .prerequisites
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Node.js", "JWT", "REST API design"]);
        assert_eq!(breakdown.prerequisites[0].category, Category::Technology);
        assert_eq!(breakdown.estimated_complexity, Complexity::Intermediate);
        assert_eq!(
            breakdown.suggested_learning_order,
            vec!["Node.js", "JWT", "REST API design"]
        );
    }

    #[test]
    fn test_parse_json_reply_with_defaults() {
        let reply = r#"{"prerequisites": [{"name": "SQL", "category": "database stuff", "priority": "1"}]}"#;
        let breakdown = analyzer().parse_reply("task", reply).unwrap();
        assert_eq!(breakdown.prerequisites.len(), 1);
        // Unknown category falls back to concept, string priority is parsed.
        assert_eq!(breakdown.prerequisites[0].category, Category::Concept);
        assert_eq!(breakdown.prerequisites[0].priority, 1);
        assert_eq!(breakdown.estimated_complexity, Complexity::Intermediate);
    }

    #[test]
    fn test_parse_falls_back_to_list_items() {
        let reply = "You should learn the following first:\n\
                     1. Python: the implementation language\n\
                     2. Flask, a small web framework\n\
                     - Databases\n\
                     not a list line\n";
        let breakdown = analyzer().parse_reply("task", reply).unwrap();
        let names: Vec<&str> = breakdown
            .prerequisites
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Python", "Flask", "Databases"]);
        assert!(breakdown
            .prerequisites
            .iter()
            .all(|p| p.category == Category::Concept));
        assert_eq!(breakdown.suggested_learning_order.len(), 3);
    }

    #[test]
    fn test_unusable_reply_is_an_error() {
        let err = analyzer()
            .parse_reply("task", "I cannot help with that.")
            .unwrap_err();
        assert!(err.contains("Task analysis failed"));
    }

    #[test]
    fn test_empty_prerequisite_names_are_dropped() {
        let reply = r#"{"prerequisites": [{"name": "  "}, {"name": "Git"}], "estimated_complexity": "beginner"}"#;
        let breakdown = analyzer().parse_reply("task", reply).unwrap();
        assert_eq!(breakdown.prerequisites.len(), 1);
        assert_eq!(breakdown.prerequisites[0].name, "Git");
        assert_eq!(breakdown.estimated_complexity, Complexity::Beginner);
    }

    #[test]
    fn test_prerequisite_cap() {
        let items: Vec<String> = (0..20)
            .map(|i| format!(r#"{{"name": "Topic {}", "priority": 0}}"#, i))
            .collect();
        let reply = format!(r#"{{"prerequisites": [{}]}}"#, items.join(","));
        let breakdown = analyzer().parse_reply("task", &reply).unwrap();
        assert_eq!(breakdown.prerequisites.len(), MAX_PREREQUISITES);
    }
}
