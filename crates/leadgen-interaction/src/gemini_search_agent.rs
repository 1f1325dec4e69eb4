//! Gemini client with the `google_search` tool enabled.
//!
//! Sends `generateContent` requests with search grounding and returns both
//! the model's text and the grounded source links.

use std::collections::HashSet;

use async_trait::async_trait;
use leadgen_core::agent::{GroundedResponse, SearchAgent};
use leadgen_core::config::DEFAULT_GEMINI_MODEL;
use leadgen_core::error::{LeadgenError, Result};
use leadgen_core::lead::GroundingSource;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Search-grounded Gemini client.
#[derive(Clone)]
pub struct GeminiSearchAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiSearchAgent {
    /// Creates a new agent using the provided API key.
    ///
    /// Fails with `MissingApiKey` on a blank key, before any request is made.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LeadgenError::MissingApiKey);
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Overrides the Gemini model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the API base URL (e.g. for a proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        )
    }
}

#[async_trait]
impl SearchAgent for GeminiSearchAgent {
    async fn generate(&self, prompt: &str) -> Result<GroundedResponse> {
        let request = GenerateContentRequest::new(prompt);
        tracing::debug!(model = %self.model, "Sending grounded generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                let is_retryable = err.is_connect() || err.is_timeout();
                LeadgenError::Upstream {
                    status_code: None,
                    // The URL carries the API key.
                    message: format!("Gemini request failed: {}", err.without_url()),
                    is_retryable,
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, &body));
        }

        let payload: Value = response.json().await.map_err(|err| {
            LeadgenError::upstream(format!("Failed to parse Gemini response: {err}"))
        })?;

        Ok(parse_grounded_response(&payload))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    tools: Vec<Tool>,
}

impl GenerateContentRequest {
    fn new(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            tools: vec![Tool::default()],
        }
    }
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize, Default)]
struct Tool {
    #[serde(rename = "google_search")]
    google_search: GoogleSearchConfig,
}

#[derive(Serialize, Default)]
struct GoogleSearchConfig {}

/// Splits a `generateContent` payload into text and grounding sources.
///
/// A payload without text yields an empty string; the extractor downstream
/// turns that into an empty lead list.
pub fn parse_grounded_response(root: &Value) -> GroundedResponse {
    GroundedResponse {
        text: extract_text(root),
        sources: extract_sources(root),
    }
}

fn candidates(root: &Value) -> &[Value] {
    root.get("candidates")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn extract_text(root: &Value) -> String {
    let mut collected = Vec::new();
    for candidate in candidates(root) {
        let Some(parts) = candidate
            .get("content")
            .and_then(|content| content.get("parts"))
            .and_then(Value::as_array)
        else {
            continue;
        };

        collected.extend(
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str)),
        );
    }

    collected.concat()
}

fn extract_sources(root: &Value) -> Vec<GroundingSource> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();

    for candidate in candidates(root) {
        let Some(chunks) = candidate
            .get("groundingMetadata")
            .and_then(|metadata| metadata.get("groundingChunks"))
            .and_then(Value::as_array)
        else {
            continue;
        };

        for chunk in chunks {
            let Some(web) = chunk.get("web") else {
                continue;
            };

            let uri = web.get("uri").and_then(Value::as_str).map(str::to_string);
            let title = web.get("title").and_then(Value::as_str).map(str::to_string);
            if uri.is_none() && title.is_none() {
                continue;
            }

            if let Some(uri) = &uri {
                if !seen.insert(uri.clone()) {
                    continue;
                }
            }

            sources.push(GroundingSource { title, uri });
        }
    }

    sources
}

fn map_http_error(status: StatusCode, body: &str) -> LeadgenError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            let error = json.get("error")?;
            let msg = error.get("message")?.as_str()?;
            Some(match error.get("status").and_then(Value::as_str) {
                Some(status_text) if !status_text.is_empty() => format!("{status_text}: {msg}"),
                _ => msg.to_string(),
            })
        })
        .unwrap_or_else(|| body.to_string());

    LeadgenError::Upstream {
        status_code: Some(status.as_u16()),
        message,
        is_retryable: is_retryable_status(status),
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_blank_api_key_fails_fast() {
        assert_eq!(
            GeminiSearchAgent::new("  ").err(),
            Some(LeadgenError::MissingApiKey)
        );
    }

    #[test]
    fn test_endpoint_and_overrides() {
        let agent = GeminiSearchAgent::new("k")
            .unwrap()
            .with_model("gemini-2.5-pro")
            .with_base_url("http://localhost:8080/v1beta/models/");
        assert_eq!(
            agent.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-pro:generateContent?key=k"
        );
    }

    #[test]
    fn test_request_enables_google_search_tool() {
        let body = serde_json::to_value(GenerateContentRequest::new("find bakeries")).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "find bakeries"}]}],
                "tools": [{"google_search": {}}]
            })
        );
    }

    #[test]
    fn test_parse_text_and_sources() {
        let payload = json!({
            "candidates": [{
                "content": {"parts": [{"text": "Sure! ```json\n"}, {"text": "[]\n```"}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://a.example", "title": "A"}},
                        {"web": {"uri": "https://a.example", "title": "A again"}},
                        {"web": {"title": "Untitled link"}},
                        {"retrievedContext": {"uri": "ignored"}}
                    ]
                }
            }]
        });

        let parsed = parse_grounded_response(&payload);
        assert_eq!(parsed.text, "Sure! ```json\n[]\n```");
        assert_eq!(
            parsed.sources,
            vec![
                GroundingSource {
                    title: Some("A".to_string()),
                    uri: Some("https://a.example".to_string()),
                },
                GroundingSource {
                    title: Some("Untitled link".to_string()),
                    uri: None,
                },
            ]
        );
    }

    #[test]
    fn test_parse_empty_payload() {
        let parsed = parse_grounded_response(&json!({}));
        assert_eq!(parsed, GroundedResponse::default());
    }

    #[test]
    fn test_map_http_error() {
        let err = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#,
        );
        assert_eq!(
            err,
            LeadgenError::Upstream {
                status_code: Some(429),
                message: "RESOURCE_EXHAUSTED: Quota exceeded".to_string(),
                is_retryable: true,
            }
        );

        let err = map_http_error(StatusCode::BAD_REQUEST, "plain text");
        assert_eq!(
            err,
            LeadgenError::Upstream {
                status_code: Some(400),
                message: "plain text".to_string(),
                is_retryable: false,
            }
        );
    }
}
