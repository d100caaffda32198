//! Language-model provider clients
//!
//! One thin HTTP client per supported backend. Each call sends the
//! rendered prompt and extracts the model's JSON reply into a
//! `ReviewResult`. Retry policy lives with the caller: a failed chunk is
//! folded into the merged result as a synthetic error, not retried here.

use revu_core::ProviderConfig;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::types::ReviewResult;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_REPLY_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {provider} failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned status {status}: {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} reply contained no text content")]
    EmptyReply { provider: &'static str },

    #[error("could not parse review JSON from reply: {source}")]
    MalformedReview {
        #[source]
        source: serde_json::Error,
    },
}

pub struct ProviderClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl ProviderClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self.config {
            ProviderConfig::OpenAi { .. } => "openai",
            ProviderConfig::Anthropic { .. } => "anthropic",
            ProviderConfig::Ollama { .. } => "ollama",
        }
    }

    /// Send one rendered prompt and parse the structured review reply.
    pub async fn review(&self, prompt: &str) -> Result<ReviewResult, ProviderError> {
        let reply = match &self.config {
            ProviderConfig::OpenAi { api_key, model } => {
                self.openai_chat(api_key, model, prompt).await?
            }
            ProviderConfig::Anthropic { api_key, model } => {
                self.anthropic_message(api_key, model, prompt).await?
            }
            ProviderConfig::Ollama { base_url, model } => {
                self.ollama_chat(base_url, model, prompt).await?
            }
        };
        tracing::debug!(provider = self.kind(), bytes = reply.len(), "got provider reply");
        parse_review_reply(&reply)
    }

    async fn openai_chat(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        #[derive(Deserialize)]
        struct Reply {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }
        #[derive(Deserialize)]
        struct Message {
            content: String,
        }

        let body = json!({
            "model": model,
            "messages": [{"role": "user", "content": prompt}],
            "response_format": {"type": "json_object"},
        });
        let response = self
            .http
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| ProviderError::Http { provider: "openai", source })?;
        let reply: Reply = check_status(response, "openai").await?;

        reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyReply { provider: "openai" })
    }

    async fn anthropic_message(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        #[derive(Deserialize)]
        struct Reply {
            content: Vec<Block>,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default)]
            text: String,
        }

        let body = json!({
            "model": model,
            "max_tokens": MAX_REPLY_TOKENS,
            "messages": [{"role": "user", "content": prompt}],
        });
        let response = self
            .http
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|source| ProviderError::Http { provider: "anthropic", source })?;
        let reply: Reply = check_status(response, "anthropic").await?;

        let text: String = reply.content.into_iter().map(|block| block.text).collect();
        if text.is_empty() {
            return Err(ProviderError::EmptyReply { provider: "anthropic" });
        }
        Ok(text)
    }

    async fn ollama_chat(
        &self,
        base_url: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        #[derive(Deserialize)]
        struct Reply {
            message: Message,
        }
        #[derive(Deserialize)]
        struct Message {
            content: String,
        }

        let body = json!({
            "model": model,
            "messages": [{"role": "user", "content": prompt}],
            "stream": false,
            "format": "json",
        });
        let url = format!("{}/api/chat", base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|source| ProviderError::Http { provider: "ollama", source })?;
        let reply: Reply = check_status(response, "ollama").await?;

        if reply.message.content.is_empty() {
            return Err(ProviderError::EmptyReply { provider: "ollama" });
        }
        Ok(reply.message.content)
    }
}

async fn check_status<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
    provider: &'static str,
) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            provider,
            status: status.as_u16(),
            body,
        });
    }
    response
        .json()
        .await
        .map_err(|source| ProviderError::Http { provider, source })
}

/// Parse the model's textual reply into a `ReviewResult`.
///
/// Models wrap JSON in markdown fences or surrounding prose often enough
/// that the reply is narrowed to its outermost object first.
fn parse_review_reply(reply: &str) -> Result<ReviewResult, ProviderError> {
    let json_text = extract_json_object(reply);
    serde_json::from_str(json_text).map_err(|source| ProviderError::MalformedReview { source })
}

fn extract_json_object(reply: &str) -> &str {
    match (reply.find('{'), reply.rfind('}')) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => reply,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Assessment, Severity};

    #[test]
    fn test_parse_plain_json_reply() {
        let reply = r#"{"summary": "fine", "issues": [], "positives": [], "overall_assessment": "approve"}"#;
        let result = parse_review_reply(reply).unwrap();
        assert_eq!(result.summary, "fine");
        assert_eq!(result.overall_assessment, Assessment::Approve);
    }

    #[test]
    fn test_parse_fenced_reply() {
        let reply = "Here is the review:\n```json\n{\"summary\": \"ok\", \"issues\": [{\"severity\": \"warning\", \"category\": \"style\", \"title\": \"naming\"}], \"overall_assessment\": \"comment\"}\n```\nDone.";
        let result = parse_review_reply(reply).unwrap();
        assert_eq!(result.summary, "ok");
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_parse_garbage_is_an_error() {
        assert!(parse_review_reply("the model refused to answer").is_err());
    }

    #[test]
    fn test_extract_json_object() {
        assert_eq!(extract_json_object("x {\"a\": 1} y"), "{\"a\": 1}");
        assert_eq!(extract_json_object("no braces"), "no braces");
    }

    #[test]
    fn test_client_kind() {
        let client = ProviderClient::new(ProviderConfig::Ollama {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.1".to_string(),
        });
        assert_eq!(client.kind(), "ollama");
    }
}
