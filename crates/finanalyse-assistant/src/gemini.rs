//! Gemini (Google Generative Language) REST client

use crate::error::{AssistantError, Result};
use crate::messages::ChatTurn;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default model, matching the frontend's expectations for tone and
/// latency.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Client for the `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
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
    parts: Vec<Part>,
}

impl GeminiClient {
    /// Create a client for the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Create a client for a specific model.
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Send the conversation and return the first candidate's text.
    pub async fn generate(&self, turns: &[ChatTurn]) -> Result<String> {
        let contents = turns
            .iter()
            .map(|turn| Content {
                role: turn.role.as_str(),
                parts: vec![Part {
                    text: turn.text.clone(),
                }],
            })
            .collect();

        let url = format!(
            "{API_BASE}/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .json(&GenerateRequest { contents })
            .send()
            .await
            .map_err(|e| AssistantError::Api(format!("Gemini request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Api(format!(
                "Gemini API error {status}: {body}"
            )));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Api(format!("failed to parse Gemini response: {e}")))?;

        let content = payload
            .candidates
            .into_iter()
            .find_map(|c| c.content)
            .ok_or_else(|| AssistantError::Api("Gemini returned no candidates".to_string()))?;

        let text: String = content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let contents = vec![
            Content {
                role: "user",
                parts: vec![Part {
                    text: "What is a P/E ratio?".to_string(),
                }],
            },
            Content {
                role: "model",
                parts: vec![Part {
                    text: "Happy to explain.".to_string(),
                }],
            },
        ];
        let json = serde_json::to_value(GenerateRequest { contents }).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "What is a P/E ratio?");
        assert_eq!(json["contents"][1]["role"], "model");
    }

    #[test]
    fn test_response_text_extraction() {
        let payload: GenerateResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{"text": "A P/E ratio compares "}, {"text": "price to earnings."}]
                    },
                    "finishReason": "STOP"
                }]
            }"#,
        )
        .unwrap();

        let content = payload.candidates.into_iter().find_map(|c| c.content).unwrap();
        let text: String = content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");
        assert_eq!(text, "A P/E ratio compares price to earnings.");
    }

    #[test]
    fn test_empty_candidates_payload() {
        let payload: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(payload.candidates.is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires network access and a GOOGLE_API_KEY
    async fn test_generate() {
        let api_key = std::env::var("GOOGLE_API_KEY").unwrap();
        let client = GeminiClient::new(api_key);
        let reply = client
            .generate(&[ChatTurn::user("Reply with the single word: pong")])
            .await
            .unwrap();
        assert!(!reply.is_empty());
    }
}
