//! One model round-trip: build prompt → call model → raw text.

use std::time::Instant;

use tracing::info;

use crate::errors::AppError;
use crate::generation::{build_prompt, Feature, PromptContext};
use crate::llm_client::GenerativeModel;

/// Builds the prompt for `feature` and returns the model's raw reply.
/// Prompt errors surface as validation errors before any model call.
pub async fn ask_model(
    model: &dyn GenerativeModel,
    feature: Feature,
    ctx: &PromptContext,
) -> Result<String, AppError> {
    let prompt = build_prompt(feature, ctx)?;
    info!(
        "Calling {} for {} (style={}, json={}, prompt_chars={})",
        model.model_name(),
        feature.as_str(),
        ctx.style.as_str(),
        feature.expects_json(),
        prompt.len()
    );

    let started = Instant::now();
    let raw = model.generate(&prompt).await?;
    info!(
        "{} reply received in {}ms ({} chars)",
        feature.as_str(),
        started.elapsed().as_millis(),
        raw.len()
    );
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::test_support::ScriptedModel;

    #[tokio::test]
    async fn test_returns_raw_reply_and_records_prompt() {
        let model = ScriptedModel::replying("{\"matchScore\": 1}");
        let ctx = PromptContext::new("Rust developer").with_job_description("Rust role");
        let raw = ask_model(&model, Feature::Match, &ctx).await.unwrap();
        assert_eq!(raw, "{\"matchScore\": 1}");
        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Rust developer"));
    }

    #[tokio::test]
    async fn test_prompt_error_skips_model_call() {
        let model = ScriptedModel::replying("unused");
        let err = ask_model(&model, Feature::Match, &PromptContext::new("cv"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let model = ScriptedModel::failing(LlmError::RateLimited("quota".into()));
        let err = ask_model(&model, Feature::Analyze, &PromptContext::new("cv"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(LlmError::RateLimited(_))));
    }
}
