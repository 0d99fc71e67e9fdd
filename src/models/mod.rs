use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Default number of recommendations when the caller omits the field
pub const DEFAULT_NUM_RECOMMENDATIONS: usize = 5;

fn default_num_recommendations() -> usize {
    DEFAULT_NUM_RECOMMENDATIONS
}

/// A recommendation request for one user
///
/// Zippclip identifiers are opaque strings; the flow never checks them
/// against the content store. Field names are camelCase on the wire to match
/// the app clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// Zippclip IDs the user recently watched, most recent first
    pub viewing_history: Vec<String>,

    /// Tags currently trending across the app
    pub trending_tags: Vec<String>,

    /// How many zippclip IDs to ask the model for
    #[serde(default = "default_num_recommendations")]
    pub num_recommendations: usize,
}

impl RecommendationRequest {
    /// Validates the request before any external call is made
    pub fn validate(&self) -> AppResult<()> {
        if self.num_recommendations == 0 {
            return Err(AppError::InvalidInput(
                "numRecommendations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Zippclip IDs recommended by the model, in the order it returned them
///
/// The length is intended to equal `num_recommendations` but is not enforced;
/// the model is only instructed, not constrained, on count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_recommendations_defaults_to_five() {
        let json = r#"{"viewingHistory":["clip-1"],"trendingTags":[]}"#;
        let request: RecommendationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.num_recommendations, 5);
    }

    #[test]
    fn test_missing_viewing_history_is_rejected() {
        let json = r#"{"trendingTags":[],"numRecommendations":3}"#;
        let result = serde_json::from_str::<RecommendationRequest>(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_mistyped_trending_tags_is_rejected() {
        let json = r#"{"viewingHistory":[],"trendingTags":"dance","numRecommendations":3}"#;
        let result = serde_json::from_str::<RecommendationRequest>(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_count() {
        let request = RecommendationRequest {
            viewing_history: vec![],
            trending_tags: vec![],
            num_recommendations: 0,
        };
        assert!(matches!(
            request.validate(),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_accepts_empty_history_and_tags() {
        let request = RecommendationRequest {
            viewing_history: vec![],
            trending_tags: vec![],
            num_recommendations: 1,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_response_uses_camel_case_wire_field() {
        let response = RecommendationResponse {
            recommendations: vec!["clip-9".to_string()],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"recommendations":["clip-9"]}"#);
    }
}
