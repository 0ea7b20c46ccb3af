//! Code companion: produces a commented code example for a concept.

use std::sync::Arc;

use crate::ai::{Message, OpenAIClient};

const CODE_EXAMPLE_PROMPT: &str = r#"
You are a helpful code assistant. Provide a clear, simple, and well-commented code example for the following concept.

**Concept:**
{concept}

**Context:**
The user is working on the task: "{task_context}"

**Code Example:**
Provide a language-appropriate, copy-pasteable code block.
```language
...
```
"#;

pub struct CodeCompanion {
    ai: Arc<OpenAIClient>,
}

impl CodeCompanion {
    pub fn new(ai: Arc<OpenAIClient>) -> Self {
        CodeCompanion { ai }
    }

    /// Get a code example for a concept, contextualized by the user's task.
    pub async fn code_example(&self, concept: &str, task_context: &str) -> Result<String, String> {
        let prompt = CODE_EXAMPLE_PROMPT
            .replace("{concept}", concept)
            .replace("{task_context}", task_context);
        self.ai.generate_text(vec![Message::user(prompt)]).await
    }
}
