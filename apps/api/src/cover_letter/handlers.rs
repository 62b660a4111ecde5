use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::generation::{ask_model, Feature, PromptContext, StylePreset};
use crate::llm_client::LlmError;
use crate::normalizer::clean_prose;
use crate::resumes::store::{load_owned_resume, parse_resume_id};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub selected_resume: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub selected_template: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub message: &'static str,
    pub generated_cover_letter: String,
}

/// POST /api/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Result<Json<CoverLetterRequest>, JsonRejection>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let Json(req) = body?;

    let (Some(selected_resume), Some(job_description)) = (
        req.selected_resume.filter(|s| !s.trim().is_empty()),
        req.job_description.filter(|s| !s.trim().is_empty()),
    ) else {
        return Err(AppError::Validation(
            "Missing selected resume ID or job description.".to_string(),
        ));
    };

    let id = parse_resume_id(&selected_resume)?;
    let resume = load_owned_resume(state.resumes.as_ref(), id, &user_id).await?;
    if resume.parsed_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Selected resume contains no text to use for generation.".to_string(),
        ));
    }

    let style = StylePreset::from_selector(req.selected_template.as_deref());
    info!(
        "Cover letter for user {user_id}: resume={id}, style={}, resume_chars={}",
        style.as_str(),
        resume.parsed_text.len()
    );

    let ctx = PromptContext::new(resume.parsed_text)
        .with_job_description(job_description)
        .with_company(req.company_name)
        .with_role(req.role_name)
        .with_style(style);
    let raw = ask_model(state.model.as_ref(), Feature::CoverLetter, &ctx).await?;

    let letter = clean_prose(&raw);
    if letter.is_empty() {
        return Err(LlmError::EmptyGeneration.into());
    }

    Ok(Json(CoverLetterResponse {
        message: "Cover letter generated successfully",
        generated_cover_letter: letter,
    }))
}
