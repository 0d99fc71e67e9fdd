use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{RecommendationRequest, RecommendationResponse},
    prompt::render_prompt,
    services::providers::ModelProvider,
};

/// Generates personalized zippclip recommendations
///
/// Composes the whole flow: validate the request, render the prompt, invoke
/// the model provider, extract the structured result. Holds no per-call
/// state, so one instance is safe to share across concurrent callers.
///
/// Deliberately no caching, retries, or rate limiting here; a wrapping layer
/// may add them using `AppError::is_retryable` to classify failures.
#[derive(Clone)]
pub struct RecommendationService {
    provider: Arc<dyn ModelProvider>,
}

impl RecommendationService {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    /// Recommends zippclip IDs for one user
    ///
    /// Errors from validation and invocation propagate unchanged. A provider
    /// response with no usable payload fails with `AppError::EmptyResult`
    /// rather than silently returning an empty list, so provider misbehavior
    /// surfaces immediately.
    pub async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> AppResult<RecommendationResponse> {
        request.validate()?;

        let prompt = render_prompt(&request);

        tracing::debug!(
            history_len = request.viewing_history.len(),
            tags_len = request.trending_tags.len(),
            requested = request.num_recommendations,
            provider = self.provider.name(),
            "Invoking model"
        );

        let response = self.provider.generate(&prompt).await?.ok_or_else(|| {
            AppError::EmptyResult(format!(
                "provider {} returned no usable completion",
                self.provider.name()
            ))
        })?;

        tracing::info!(
            requested = request.num_recommendations,
            returned = response.recommendations.len(),
            provider = self.provider.name(),
            "Recommendations generated"
        );

        Ok(response)
    }
}
