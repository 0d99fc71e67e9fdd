use crate::models::RecommendationRequest;

/// System instruction sent alongside every rendered prompt
pub const SYSTEM_INSTRUCTION: &str = "You are a recommendation assistant for Zippclip, \
a short-video app. Given a user's viewing history and the tags currently trending, \
you suggest zippclip IDs the user is likely to enjoy next.";

const NO_HISTORY: &str = "The user has no viewing history yet.";
const NO_TRENDING: &str = "There are no trending tags right now.";

/// Renders the user prompt for a validated request
///
/// Pure function: identical input always yields a byte-identical string.
/// History entries and tags keep their original order.
pub fn render_prompt(request: &RecommendationRequest) -> String {
    let mut prompt = String::new();

    if request.viewing_history.is_empty() {
        prompt.push_str(NO_HISTORY);
    } else {
        prompt.push_str("The user recently watched these zippclips:\n");
        for id in &request.viewing_history {
            prompt.push_str("- ");
            prompt.push_str(id);
            prompt.push('\n');
        }
    }

    prompt.push('\n');

    if request.trending_tags.is_empty() {
        prompt.push_str(NO_TRENDING);
    } else {
        prompt.push_str("These tags are currently trending:\n");
        for tag in &request.trending_tags {
            prompt.push_str("- ");
            prompt.push_str(tag);
            prompt.push('\n');
        }
    }

    prompt.push_str(&format!(
        "\nRecommend exactly {} zippclip IDs for this user to watch next. \
Return one ID per line with no extra text.",
        request.num_recommendations
    ));

    prompt
}
