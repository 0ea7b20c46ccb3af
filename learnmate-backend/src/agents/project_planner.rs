//! Project planner: turns a task breakdown into a step-by-step plan.

use std::sync::Arc;

use crate::ai::{Message, OpenAIClient};
use crate::models::TaskBreakdown;

const PLAN_PROMPT: &str = r#"
You are an expert project manager. Based on the following task description and its prerequisites, create a high-level, step-by-step project plan.

The plan should be clear, concise, and actionable for a developer.

**Task Description:**
{task_description}

**Prerequisites:**
{prerequisites}

**Project Plan:**
Provide a numbered list of steps from project setup to completion. Focus on major milestones.
1. ...
2. ...
3. ...
"#;

pub struct ProjectPlanner {
    ai: Arc<OpenAIClient>,
}

impl ProjectPlanner {
    pub fn new(ai: Arc<OpenAIClient>) -> Self {
        ProjectPlanner { ai }
    }

    /// Generate a project plan. The reply is passed through verbatim as
    /// markdown.
    pub async fn generate_plan(&self, breakdown: &TaskBreakdown) -> Result<String, String> {
        let prompt = build_plan_prompt(breakdown);
        self.ai.generate_text(vec![Message::user(prompt)]).await
    }
}

fn build_plan_prompt(breakdown: &TaskBreakdown) -> String {
    let prerequisites = breakdown
        .prerequisites
        .iter()
        .map(|p| format!("- {}: {}", p.name, p.description))
        .collect::<Vec<_>>()
        .join("\n");

    PLAN_PROMPT
        .replace("{task_description}", &breakdown.task_description)
        .replace("{prerequisites}", &prerequisites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Complexity, Prerequisite};

    #[test]
    fn test_plan_prompt_embeds_breakdown() {
        let breakdown = TaskBreakdown {
            task_description: "Build a chat app".to_string(),
            prerequisites: vec![Prerequisite {
                name: "WebSockets".to_string(),
                category: Category::Concept,
                description: "bidirectional messaging".to_string(),
                priority: 0,
            }],
            suggested_learning_order: vec!["WebSockets".to_string()],
            estimated_complexity: Complexity::Intermediate,
        };

        let prompt = build_plan_prompt(&breakdown);
        assert!(prompt.contains("Build a chat app"));
        assert!(prompt.contains("- WebSockets: bidirectional messaging"));
    }
}
