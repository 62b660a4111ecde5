use axum::{extract::State, Json};
use tracing::{info, warn};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::generation::{ask_model, Feature, PromptContext};
use crate::matching::input::{MatchInput, ResumeSource};
use crate::models::outcome::{OutcomeMessages, OutcomeResponse};
use crate::models::resume::MatchResult;
use crate::normalizer::normalize;
use crate::resumes::store::{load_owned_resume, parse_resume_id};
use crate::state::AppState;

const MATCH_MESSAGES: OutcomeMessages = OutcomeMessages {
    structured: "Resume matched to job description successfully",
    partially_invalid: "Resume matched, but JSON partially invalid. Returning raw AI output.",
    no_structured_content: "Resume matched, but the AI response contained no structured data. Returning raw AI output.",
};

/// POST /api/match
///
/// Match results are returned to the caller and never stored.
pub async fn handle_match(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    input: MatchInput,
) -> Result<Json<OutcomeResponse<MatchResult>>, AppError> {
    let job_description = input
        .job_description
        .ok_or_else(|| AppError::Validation("Missing jobDescription".to_string()))?;

    let (resume_text, source) = match input.source {
        Some(ResumeSource::File(file)) => (file.extract_text().await?, "uploaded file"),
        Some(ResumeSource::StoredId(raw_id)) => {
            let id = parse_resume_id(&raw_id)?;
            let resume = load_owned_resume(state.resumes.as_ref(), id, &user_id).await?;
            (resume.parsed_text, "stored resume")
        }
        Some(ResumeSource::Text(text)) => (text, "direct text"),
        None => {
            return Err(AppError::Validation(
                "No resume source provided (file, ID, or text).".to_string(),
            ))
        }
    };

    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Resume text is empty. Cannot perform match.".to_string(),
        ));
    }

    info!(
        "Matching for user {user_id}: source={source}, resume_chars={}, jd_chars={}",
        resume_text.len(),
        job_description.len()
    );

    let ctx = PromptContext::new(resume_text).with_job_description(job_description);
    let raw = ask_model(state.model.as_ref(), Feature::Match, &ctx).await?;
    let normalized = normalize::<MatchResult>(&raw);
    info!("Match for user {user_id} normalized as {:?}", normalized.kind());
    if let Some(raw) = normalized.raw_text() {
        warn!("Returning raw match reply ({} chars) for user {user_id}", raw.len());
    }

    Ok(Json(OutcomeResponse::new(normalized, &MATCH_MESSAGES)))
}
