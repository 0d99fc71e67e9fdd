/// Generative-model provider abstraction
///
/// This module provides a pluggable architecture for different hosted model
/// providers (Google AI, OpenAI-compatible endpoints). Each provider submits
/// one rendered prompt per call and returns a completion constrained to the
/// recommendation output schema.
use serde_json::{json, Value};

use crate::{error::AppResult, models::RecommendationResponse};

pub mod google_ai;
pub mod open_ai;

/// JSON schema the model output must conform to
///
/// Handed to the provider in structured-output mode so the completion is
/// generated against the contract rather than parsed out of free text.
pub fn output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "recommendations": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["recommendations"]
    })
}

/// Trait for generative-model providers
///
/// `Ok(Some(_))` is a payload conforming to the output schema. `Ok(None)`
/// means the provider answered but produced nothing usable (no candidates,
/// null content); the orchestrator decides how to surface that. A payload
/// that exists but cannot be coerced to the schema fails with
/// `AppError::SchemaMismatch`, and network/provider faults fail with
/// `AppError::HttpClient` / `AppError::ModelApi`.
///
/// Providers hold no state between calls and never retry; retry policy
/// belongs to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ModelProvider: Send + Sync {
    /// Submit one rendered prompt and await the structured completion
    async fn generate(&self, prompt: &str) -> AppResult<Option<RecommendationResponse>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
