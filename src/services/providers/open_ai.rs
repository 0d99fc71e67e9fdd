/// OpenAI-compatible chat completions provider
///
/// Asks for structured output via `response_format: json_schema`. Some
/// compatible endpoints ignore that and reply with plain text anyway, so a
/// non-JSON completion is parsed as one zippclip ID per line. JSON that does
/// not conform to the output schema is rejected outright; it signals schema
/// drift, not a free-text reply.
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::RecommendationResponse,
    prompt::SYSTEM_INSTRUCTION,
    services::providers::{output_schema, ModelProvider},
};

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: Value,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }

    fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            response_format: json!({
                "type": "json_schema",
                "json_schema": {
                    "name": "recommendations",
                    "schema": output_schema(),
                    "strict": true
                }
            }),
        }
    }

    fn extract_completion(response: ChatResponse) -> AppResult<Option<RecommendationResponse>> {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        let Some(content) = content else {
            return Ok(None);
        };

        if let Ok(parsed) = serde_json::from_str::<RecommendationResponse>(&content) {
            return Ok(Some(parsed));
        }

        // JSON that is not a RecommendationResponse is schema drift, never
        // free text to be line-parsed
        if serde_json::from_str::<Value>(&content).is_ok() {
            return Err(AppError::SchemaMismatch(format!(
                "model returned JSON violating the output schema: {:.120}",
                content
            )));
        }

        // Free-text fallback for endpoints that ignore response_format
        let recommendations = parse_id_lines(&content);
        if recommendations.is_empty() {
            return Err(AppError::SchemaMismatch(format!(
                "model returned neither schema JSON nor ID lines: {:.120}",
                content
            )));
        }

        Ok(Some(RecommendationResponse { recommendations }))
    }
}

/// Parses a free-text completion as one ID per line
///
/// Trims whitespace, strips leading `-`/`*` bullets and `1.`/`1)` numbering,
/// skips blank lines. Lines still containing inner whitespace are prose
/// rather than identifiers and are dropped.
fn parse_id_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty() && !line.contains(char::is_whitespace))
        .map(|line| line.to_string())
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim().trim_start_matches(['-', '*']).trim();

    // Numbered markers ("3. clip-x", "3) clip-x"); a purely numeric ID has
    // no `.`/`)` after the digits and passes through untouched
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(['.', ')']) {
            return rest.trim();
        }
    }

    line
}

#[async_trait::async_trait]
impl ModelProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str) -> AppResult<Option<RecommendationResponse>> {
        let url = format!("{}/chat/completions", self.api_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ModelApi(format!(
                "Chat API returned status {}: {}",
                status, body
            )));
        }

        let completion: ChatResponse = response.json().await?;
        let result = Self::extract_completion(completion)?;

        tracing::info!(
            model = %self.model,
            recommendations = result.as_ref().map(|r| r.recommendations.len()),
            provider = "open_ai",
            "Completion received"
        );

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "open_ai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_content(content: Option<&str>) -> ChatResponse {
        ChatResponse {
            choices: vec![ChatChoice {
                message: ChoiceMessage {
                    content: content.map(|s| s.to_string()),
                },
            }],
        }
    }

    #[test]
    fn test_extract_schema_json_completion() {
        let response = response_with_content(Some(r#"{"recommendations":["clip-1"]}"#));
        let result = OpenAiProvider::extract_completion(response).unwrap();
        assert_eq!(
            result,
            Some(RecommendationResponse {
                recommendations: vec!["clip-1".to_string()],
            })
        );
    }

    #[test]
    fn test_extract_falls_back_to_id_lines() {
        let response = response_with_content(Some("clip-1\n- clip-2\n\n* clip-3\n"));
        let result = OpenAiProvider::extract_completion(response).unwrap();
        assert_eq!(
            result.unwrap().recommendations,
            vec!["clip-1", "clip-2", "clip-3"]
        );
    }

    #[test]
    fn test_extract_nonconforming_json_is_schema_mismatch() {
        // Whitespace-free JSON must not survive as a single bogus "ID"
        let response = response_with_content(Some(r#"{"clips":["clip-1"]}"#));
        let result = OpenAiProvider::extract_completion(response);
        assert!(matches!(result, Err(AppError::SchemaMismatch(_))));
    }

    #[test]
    fn test_extract_json_array_is_schema_mismatch() {
        let response = response_with_content(Some(r#"["clip-1","clip-2"]"#));
        let result = OpenAiProvider::extract_completion(response);
        assert!(matches!(result, Err(AppError::SchemaMismatch(_))));
    }

    #[test]
    fn test_extract_prose_is_schema_mismatch() {
        let response = response_with_content(Some("I recommend watching something fun today."));
        let result = OpenAiProvider::extract_completion(response);
        assert!(matches!(result, Err(AppError::SchemaMismatch(_))));
    }

    #[test]
    fn test_extract_no_choices_is_none() {
        let response = ChatResponse { choices: vec![] };
        let result = OpenAiProvider::extract_completion(response).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_extract_null_content_is_none() {
        let response = response_with_content(None);
        let result = OpenAiProvider::extract_completion(response).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_parse_id_lines_drops_prose_lines() {
        let ids = parse_id_lines("clip-1\nhere are more ideas\nclip-2");
        assert_eq!(ids, vec!["clip-1", "clip-2"]);
    }

    #[test]
    fn test_parse_id_lines_strips_numbered_markers() {
        let ids = parse_id_lines("1. clip-a\n2) clip-b\n3. clip-c");
        assert_eq!(ids, vec!["clip-a", "clip-b", "clip-c"]);
    }

    #[test]
    fn test_parse_id_lines_keeps_purely_numeric_ids() {
        let ids = parse_id_lines("12345\n67890");
        assert_eq!(ids, vec!["12345", "67890"]);
    }
}
