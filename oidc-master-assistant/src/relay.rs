use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AssistantConfig;
use crate::error::AssistantError;

/// Fixed system instruction sent with every query.
pub const SYSTEM_INSTRUCTION: &str = "You are the OIDC Master Assistant. \
You help developers debug OpenID Connect flows, explain JWT claims, and troubleshoot common errors \
like 'invalid_grant', 'mismatched_redirect_uri', or 'nonce mismatch'. \
Keep answers technical, concise, and professional. Use markdown for code and lists.";

/// A hosted text-generation service.
///
/// Implemented by [`GeminiRelay`]; tests substitute fakes.
///
/// ```ignore
/// struct Canned;
///
/// impl TextGenerator for Canned {
///     fn generate(&self, _prompt: &str, _system: &str)
///         -> impl Future<Output = Result<String, AssistantError>> + Send
///     {
///         async { Ok("Check the redirect_uri registered for the client.".to_string()) }
///     }
/// }
/// ```
pub trait TextGenerator: Send + Sync {
    /// Generate a reply to `prompt` under `system_instruction`, returned verbatim.
    fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> impl Future<Output = Result<String, AssistantError>> + Send;
}

/// The prompt sent for `query`, with `context` appended when present.
pub fn build_prompt(query: &str, context: Option<&str>) -> String {
    let mut prompt = format!("As an OIDC/OAuth2 expert, help with this query: {query}");
    if let Some(context) = context.filter(|c| !c.is_empty()) {
        prompt.push_str("\n\nContext: ");
        prompt.push_str(context);
    }
    prompt
}

/// Ask `generator` about `query`, with optional prior `context`.
///
/// Errors are returned as-is; the caller decides what to show (usually
/// [`AssistantError::public_message`]).
pub async fn get_oidc_help<G: TextGenerator>(
    generator: &G,
    query: &str,
    context: Option<&str>,
) -> Result<String, AssistantError> {
    let prompt = build_prompt(query, context);
    generator.generate(&prompt, SYSTEM_INSTRUCTION).await
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated.
    fn text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// [`TextGenerator`] backed by the Gemini `generateContent` REST API.
///
/// One POST per call: no retries, no rate limiting, no timeout.
#[derive(Debug, Clone)]
pub struct GeminiRelay {
    config: AssistantConfig,
    client: reqwest::Client,
}

impl GeminiRelay {
    pub fn new(config: AssistantConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: AssistantConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Pull `error.message` out of an error body, falling back to the raw text.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(String::from))
            .unwrap_or_else(|| body.trim().to_string())
    }
}

impl TextGenerator for GeminiRelay {
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<String, AssistantError> {
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: [Part {
                    text: system_instruction,
                }],
            },
            contents: [Content {
                role: Some("user"),
                parts: [Part { text: prompt }],
            }],
        };

        let endpoint = self.config.endpoint();
        debug!(%endpoint, model = %self.config.model, "Sending assistant request");

        let response = self
            .client
            .post(&endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::Request(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AssistantError::Request(e.without_url().to_string()))?;

        if !status.is_success() {
            let message = Self::error_message(&text);
            warn!(status = status.as_u16(), %message, "Assistant service returned an error status");
            return Err(AssistantError::Status {
                code: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| AssistantError::Parse(e.to_string()))?;
        let reply = parsed.text().ok_or(AssistantError::EmptyResponse)?;

        debug!(chars = reply.len(), "Assistant reply received");
        Ok(reply)
    }
}
