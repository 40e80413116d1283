use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::types::LlmClient;
use super::SummarizeError;
use crate::config::Config;

/// Client for the Gemini `generateContent` API.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from configuration. Fails with
    /// [`SummarizeError::MissingApiKey`] when no credential is set, which
    /// callers treat as "model stage unavailable".
    pub fn from_config(config: &Config) -> Result<Self, SummarizeError> {
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or(SummarizeError::MissingApiKey)?;

        let http = reqwest::Client::builder()
            .timeout(config.model_timeout)
            .build()
            .map_err(|e| SummarizeError::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn generate_content(
        &self,
        parts: Vec<Part>,
    ) -> Result<String, SummarizeError> {
        let body = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                max_output_tokens: 2048,
            },
        };

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SummarizeError::Http("model request timed out".into())
                } else {
                    SummarizeError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SummarizeError::Http(e.to_string()))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError> {
        self.generate_content(vec![Part::Text { text: prompt.into() }])
            .await
    }

    async fn generate_with_document(
        &self,
        prompt: &str,
        document: &[u8],
        mime_type: &str,
    ) -> Result<String, SummarizeError> {
        self.generate_content(vec![
            Part::Text { text: prompt.into() },
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: mime_type.into(),
                    data: BASE64.encode(document),
                },
            },
        ])
        .await
    }
}

/// Request body for `models/{model}:generateContent`.
#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Response body from `generateContent`.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Mock model client for tests: returns a canned reply or a forced error.
pub struct MockLlmClient {
    response: Result<String, String>,
}

impl MockLlmClient {
    /// A mock that always succeeds with the given reply text.
    pub fn replying(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
        }
    }

    /// A mock that always fails, for exercising the fallback path.
    pub fn failing(reason: &str) -> Self {
        Self {
            response: Err(reason.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, _prompt: &str) -> Result<String, SummarizeError> {
        self.response
            .clone()
            .map_err(SummarizeError::Http)
    }

    async fn generate_with_document(
        &self,
        _prompt: &str,
        _document: &[u8],
        _mime_type: &str,
    ) -> Result<String, SummarizeError> {
        self.response
            .clone()
            .map_err(SummarizeError::Http)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config(key: Option<&str>) -> Config {
        Config {
            bind_addr: "127.0.0.1".into(),
            port: 5000,
            gemini_api_key: key.map(str::to_string),
            gemini_model: "gemini-2.0-flash".into(),
            gemini_base_url: "https://generativelanguage.googleapis.com/".into(),
            model_timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn missing_key_is_a_distinct_error() {
        let err = GeminiClient::from_config(&test_config(None)).err().unwrap();
        assert!(matches!(err, SummarizeError::MissingApiKey));
    }

    #[test]
    fn endpoint_includes_model_and_trims_trailing_slash() {
        let client = GeminiClient::from_config(&test_config(Some("k"))).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn request_body_serializes_text_and_inline_parts() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: "hello".into() },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "application/pdf".into(),
                            data: BASE64.encode(b"%PDF-"),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                max_output_tokens: 2048,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            json["contents"][0]["parts"][1]["inline_data"]["mime_type"],
            "application/pdf"
        );
        assert!(json["generationConfig"]["maxOutputTokens"].is_number());
    }

    #[test]
    fn response_body_tolerates_missing_fields() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());

        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{}]}"#).unwrap();
        assert!(parsed.candidates[0].content.parts.is_empty());
    }

    #[tokio::test]
    async fn mock_client_replies_with_configured_text() {
        let client = MockLlmClient::replying("canned");
        assert_eq!(client.generate("prompt").await.unwrap(), "canned");
        assert_eq!(
            client
                .generate_with_document("prompt", b"%PDF-", "application/pdf")
                .await
                .unwrap(),
            "canned"
        );
    }

    #[tokio::test]
    async fn mock_client_failure_maps_to_http_error() {
        let client = MockLlmClient::failing("boom");
        let err = client.generate("prompt").await.err().unwrap();
        assert!(matches!(err, SummarizeError::Http(reason) if reason == "boom"));
    }
}
