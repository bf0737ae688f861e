//! GeminiClient -- concrete [`CompletionProvider`] implementation for the
//! Gemini `generateContent` API.
//!
//! Configured once at startup with a fixed model and system instruction;
//! each call sends only the latest user message, so every request is
//! context-free beyond that instruction.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use secrecy::{ExposeSecret, SecretString};

use spurchat_core::completion::provider::CompletionProvider;
use spurchat_types::error::CompletionError;

use super::types::{Content, GenerateContentRequest, GenerateContentResponse};

/// Gemini completion client.
///
/// No client-side timeout or retry policy is applied; an unresponsive
/// upstream is bounded only by the transport.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    system_instruction: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key wrapped in SecretString
    /// * `model` - Model identifier (e.g., "gemini-2.5-flash")
    /// * `system_instruction` - Fixed instruction sent with every request
    pub fn new(api_key: SecretString, model: String, system_instruction: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model,
            system_instruction,
        }
    }

    /// The configured model for this client.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn to_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Some(Content::text(&self.system_instruction)),
            contents: vec![Content::user_text(prompt)],
        }
    }
}

/// Pull the reply text out of a response: first part of the first candidate.
pub(crate) fn extract_text(response: GenerateContentResponse) -> Result<String, CompletionError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or(CompletionError::EmptyResponse)
}

// GeminiClient intentionally does NOT derive Debug so the API key can never
// be printed through it.

impl CompletionProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = self.to_request(prompt);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Http(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Deserialization(format!("failed to parse response: {e}")))?;

        extract_text(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::types::{Candidate, Part};

    fn test_client() -> GeminiClient {
        GeminiClient::new(
            SecretString::from("test-key"),
            "gemini-2.5-flash".to_string(),
            "You are a customer support agent for 'SpurShop'.".to_string(),
        )
    }

    #[test]
    fn test_url_includes_model_and_base() {
        let client = test_client().with_base_url("http://localhost:9999".to_string());
        assert_eq!(
            client.url(),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_carries_system_instruction_and_prompt() {
        let client = test_client();
        let request = client.to_request("Do you ship to Canada?");

        let system = request.system_instruction.unwrap();
        assert!(system.parts[0].text.contains("SpurShop"));
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].parts[0].text, "Do you ship to Canada?");
    }

    #[test]
    fn test_extract_text_first_candidate() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![Part {
                        text: "We ship to USA, UK, and India.".to_string(),
                    }],
                }),
            }],
        };
        assert_eq!(
            extract_text(response).unwrap(),
            "We ship to USA, UK, and India."
        );
    }

    #[test]
    fn test_extract_text_empty_candidates_is_error() {
        let response = GenerateContentResponse { candidates: vec![] };
        assert!(matches!(
            extract_text(response),
            Err(CompletionError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_text_candidate_without_parts_is_error() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![],
                }),
            }],
        };
        assert!(matches!(
            extract_text(response),
            Err(CompletionError::EmptyResponse)
        ));
    }
}
