use std::sync::Arc;

use crate::services::{providers::ModelProvider, RecommendationService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommendations: RecommendationService,
}

impl AppState {
    /// Creates application state around the configured model provider
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            recommendations: RecommendationService::new(provider),
        }
    }
}
