//! Tutor agent: answers questions and explains error messages.

use std::sync::Arc;

use crate::ai::{Message, OpenAIClient};

const ANSWER_QUESTION_PROMPT: &str = r#"
You are a friendly and knowledgeable tutor. A student has a question related to their task.

**Student's Task:**
{task_context}

**Student's Question:**
{question}

**Answer:**
Provide a clear, concise, and helpful answer to the student's question.
"#;

const EXPLAIN_ERROR_PROMPT: &str = r#"
You are a helpful debugging assistant. A student has encountered an error message and needs help understanding it.

**Student's Task:**
{task_context}

**Error Message / Code:**
{error_message}

**Explanation:**
1.  **What the error means:** Briefly explain the error in simple terms.
2.  **Common causes:** List the most likely reasons for this error in the context of the student's task.
3.  **How to fix it:** Suggest specific steps or code corrections to resolve the error.
"#;

pub struct TutorAgent {
    ai: Arc<OpenAIClient>,
}

impl TutorAgent {
    pub fn new(ai: Arc<OpenAIClient>) -> Self {
        TutorAgent { ai }
    }

    /// Respond to a free-text query. Queries that look like pasted errors get
    /// the debugging prompt, everything else the Q&A prompt.
    pub async fn respond(&self, query: &str, task_context: &str) -> Result<String, String> {
        let prompt = if is_error_query(query) {
            EXPLAIN_ERROR_PROMPT
                .replace("{task_context}", task_context)
                .replace("{error_message}", query)
        } else {
            ANSWER_QUESTION_PROMPT
                .replace("{task_context}", task_context)
                .replace("{question}", query)
        };
        self.ai.generate_text(vec![Message::user(prompt)]).await
    }
}

fn is_error_query(query: &str) -> bool {
    let query = query.to_lowercase();
    query.contains("error") || query.contains("traceback")
}
