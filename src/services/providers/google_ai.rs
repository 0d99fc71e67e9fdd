/// Google AI (Gemini) provider
///
/// Calls the generateContent endpoint with a response schema so the model
/// emits JSON matching the recommendation contract directly. Structured-only:
/// a completion that is not valid schema JSON is rejected, never re-parsed
/// from free text.
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::RecommendationResponse,
    prompt::SYSTEM_INSTRUCTION,
    services::providers::{output_schema, ModelProvider},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: ContentBody,
    contents: Vec<ContentBody>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct ContentBody {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Clone)]
pub struct GoogleAiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl GoogleAiProvider {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }

    fn build_request(prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: ContentBody {
                parts: vec![RequestPart {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            contents: vec![ContentBody {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: output_schema(),
            },
        }
    }

    fn extract_completion(
        response: GenerateContentResponse,
    ) -> AppResult<Option<RecommendationResponse>> {
        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text);

        let Some(text) = text else {
            return Ok(None);
        };

        serde_json::from_str::<RecommendationResponse>(&text)
            .map(Some)
            .map_err(|e| {
                AppError::SchemaMismatch(format!(
                    "model returned non-conforming JSON: {}",
                    e
                ))
            })
    }
}

#[async_trait::async_trait]
impl ModelProvider for GoogleAiProvider {
    async fn generate(&self, prompt: &str) -> AppResult<Option<RecommendationResponse>> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_url, self.model
        );

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_request(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ModelApi(format!(
                "Google AI returned status {}: {}",
                status, body
            )));
        }

        let completion: GenerateContentResponse = response.json().await?;
        let result = Self::extract_completion(completion)?;

        tracing::info!(
            model = %self.model,
            recommendations = result.as_ref().map(|r| r.recommendations.len()),
            provider = "google_ai",
            "Completion received"
        );

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "google_ai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_text(text: &str) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts: vec![CandidatePart {
                        text: Some(text.to_string()),
                    }],
                }),
            }],
        }
    }

    #[test]
    fn test_extract_conforming_completion() {
        let response = response_with_text(r#"{"recommendations":["clip-1","clip-2"]}"#);
        let result = GoogleAiProvider::extract_completion(response).unwrap();
        assert_eq!(
            result,
            Some(RecommendationResponse {
                recommendations: vec!["clip-1".to_string(), "clip-2".to_string()],
            })
        );
    }

    #[test]
    fn test_extract_no_candidates_is_none() {
        let response = GenerateContentResponse { candidates: vec![] };
        let result = GoogleAiProvider::extract_completion(response).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_extract_null_content_is_none() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate { content: None }],
        };
        let result = GoogleAiProvider::extract_completion(response).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_extract_non_conforming_json_is_schema_mismatch() {
        let response = response_with_text(r#"{"clips":["clip-1"]}"#);
        let result = GoogleAiProvider::extract_completion(response);
        assert!(matches!(result, Err(AppError::SchemaMismatch(_))));
    }

    #[test]
    fn test_extract_free_text_is_schema_mismatch() {
        let response = response_with_text("here are some clips you might like");
        let result = GoogleAiProvider::extract_completion(response);
        assert!(matches!(result, Err(AppError::SchemaMismatch(_))));
    }

    #[test]
    fn test_build_request_carries_schema_and_prompt() {
        let request = GoogleAiProvider::build_request("watch more cat videos");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            json["generationConfig"]["responseSchema"]["required"][0],
            "recommendations"
        );
        assert_eq!(
            json["contents"][0]["parts"][0]["text"],
            "watch more cat videos"
        );
    }
}
