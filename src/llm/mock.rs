//! Mock LLM client for testing.
//!
//! Provides scripted responses so the agent workflow can be exercised
//! without making real API calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::Result;
use crate::llm::types::Message;
use crate::llm::LlmClient;

/// Mock LLM client that returns canned responses.
///
/// Responses are resolved in order of precedence:
/// 1. A scripted queue, consumed front to back (one entry per call).
/// 2. Pattern mappings matched against the full prompt text.
/// 3. A default: a trivial SELECT for drafting prompts, canned prose
///    otherwise.
///
/// Every prompt sent to the mock is recorded for assertions.
#[derive(Debug, Default)]
pub struct MockLlmClient {
    /// Scripted responses, consumed in order.
    script: Mutex<VecDeque<String>>,
    /// Pattern mappings (pattern -> response), checked after the script.
    custom_responses: Vec<(String, String)>,
    /// Full prompt text of every call, in order.
    prompts: Mutex<Vec<String>>,
}

impl MockLlmClient {
    /// Creates a new mock client with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a scripted response for the next call.
    pub fn push_response(self, response: impl Into<String>) -> Self {
        self.script
            .lock()
            .expect("mock script lock poisoned")
            .push_back(response.into());
        self
    }

    /// Adds a pattern-based response mapping.
    ///
    /// When the prompt contains `pattern` (case-insensitive), the mock
    /// returns `response`.
    pub fn with_response(
        mut self,
        pattern: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.custom_responses
            .push((pattern.into(), response.into()));
        self
    }

    /// Returns the full prompt text of every call so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .expect("mock prompts lock poisoned")
            .clone()
    }

    /// Returns the number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.prompts
            .lock()
            .expect("mock prompts lock poisoned")
            .len()
    }

    /// Generates a mock response for the given prompt text.
    fn mock_response(&self, prompt: &str) -> String {
        if let Some(scripted) = self
            .script
            .lock()
            .expect("mock script lock poisoned")
            .pop_front()
        {
            return scripted;
        }

        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in &self.custom_responses {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return response.clone();
            }
        }

        // Drafting prompts ask for a raw statement; everything else gets prose.
        if prompt_lower.contains("raw sql statement") {
            "SELECT * FROM employees;".to_string()
        } else {
            "Here is a summary of what was found.".to_string()
        }
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let prompt = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let response = self.mock_response(&prompt);
        self.prompts
            .lock()
            .expect("mock prompts lock poisoned")
            .push(prompt);

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_responses_consumed_in_order() {
        let client = MockLlmClient::new()
            .push_response("SELECT 1;")
            .push_response("SELECT 2;");

        futures::executor::block_on(async {
            let first = client.complete(&[Message::user("a")]).await.unwrap();
            let second = client.complete(&[Message::user("b")]).await.unwrap();
            assert_eq!(first, "SELECT 1;");
            assert_eq!(second, "SELECT 2;");
        });
    }

    #[test]
    fn test_pattern_response() {
        let client = MockLlmClient::new().with_response("engineering", "SELECT SUM(salary);");

        futures::executor::block_on(async {
            let response = client
                .complete(&[Message::user("Total Engineering salary?")])
                .await
                .unwrap();
            assert_eq!(response, "SELECT SUM(salary);");
        });
    }

    #[test]
    fn test_default_draft_response() {
        let client = MockLlmClient::new();

        futures::executor::block_on(async {
            let response = client
                .complete(&[Message::system("Return ONLY the raw SQL statement")])
                .await
                .unwrap();
            assert!(response.contains("SELECT"));
        });
    }

    #[test]
    fn test_prompts_are_recorded() {
        let client = MockLlmClient::new();

        futures::executor::block_on(async {
            client.complete(&[Message::user("first")]).await.unwrap();
            client.complete(&[Message::user("second")]).await.unwrap();
        });

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("first"));
        assert!(prompts[1].contains("second"));
        assert_eq!(client.call_count(), 2);
    }
}
