//! Factory for constructing LLM clients from configuration.

use std::sync::Arc;

use crate::error::{AskdbError, Result};
use crate::llm::{
    AnthropicClient, AnthropicConfig, LlmClient, LlmProvider, MockLlmClient, OllamaClient,
    OllamaConfig, OpenAiClient, OpenAiConfig,
};

/// Creates an LLM client for the given provider.
///
/// `api_key` takes precedence over the provider's environment variable;
/// `model` takes precedence over the provider's model environment variable
/// and default. Ollama and the mock client need no key.
pub fn create_client(
    provider: LlmProvider,
    api_key: Option<&str>,
    model: Option<&str>,
) -> Result<Arc<dyn LlmClient>> {
    match provider {
        LlmProvider::OpenAi => {
            let client = match (api_key, model) {
                (Some(key), Some(model)) => OpenAiClient::new(OpenAiConfig::new(key, model))?,
                (Some(key), None) => {
                    OpenAiClient::new(OpenAiConfig::new(key, OpenAiClient::model_from_env()))?
                }
                (None, Some(model)) => {
                    let key = std::env::var("OPENAI_API_KEY").map_err(|_| {
                        AskdbError::config("OPENAI_API_KEY environment variable not set")
                    })?;
                    OpenAiClient::new(OpenAiConfig::new(key, model))?
                }
                (None, None) => OpenAiClient::from_env()?,
            };
            Ok(Arc::new(client))
        }
        LlmProvider::Anthropic => {
            let client = match (api_key, model) {
                (Some(key), Some(model)) => {
                    AnthropicClient::new(AnthropicConfig::new(key, model))?
                }
                (Some(key), None) => AnthropicClient::new(AnthropicConfig::new(
                    key,
                    AnthropicClient::model_from_env(),
                ))?,
                (None, Some(model)) => {
                    let key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
                        AskdbError::config("ANTHROPIC_API_KEY environment variable not set")
                    })?;
                    AnthropicClient::new(AnthropicConfig::new(key, model))?
                }
                (None, None) => AnthropicClient::from_env()?,
            };
            Ok(Arc::new(client))
        }
        LlmProvider::Ollama => {
            let client = match model {
                Some(model) => OllamaClient::new(OllamaConfig::new(model))?,
                None => OllamaClient::from_env()?,
            };
            Ok(Arc::new(client))
        }
        LlmProvider::Mock => Ok(Arc::new(MockLlmClient::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mock_client() {
        let client = create_client(LlmProvider::Mock, None, None);
        assert!(client.is_ok());
    }

    #[test]
    fn test_create_openai_with_explicit_key_and_model() {
        let client = create_client(LlmProvider::OpenAi, Some("sk-test"), Some("gpt-4o-mini"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_create_anthropic_with_explicit_key() {
        let client = create_client(
            LlmProvider::Anthropic,
            Some("test-key"),
            Some("claude-3-5-sonnet-latest"),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn test_create_ollama_with_model() {
        let client = create_client(LlmProvider::Ollama, None, Some("codellama"));
        assert!(client.is_ok());
    }
}
