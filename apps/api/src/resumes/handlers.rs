use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::generation::{ask_model, Feature, PromptContext};
use crate::models::outcome::{OutcomeMessages, OutcomeResponse};
use crate::models::resume::{AnalysisPayload, AnalysisResult, NewResume, ResumePatch, ResumeRecord};
use crate::normalizer::{normalize, Normalized};
use crate::resumes::store::{load_owned_resume, parse_resume_id};
use crate::state::AppState;
use crate::storage::resume_object_key;
use crate::uploads::read_resume_form;

const ANALYZE_MESSAGES: OutcomeMessages = OutcomeMessages {
    structured: "Resume analyzed",
    partially_invalid: "Resume analyzed, but the AI response was only partially valid. Returning raw AI output.",
    no_structured_content: "Resume analyzed, but the AI response contained no structured data. Returning raw AI output.",
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: &'static str,
    pub resume_id: Uuid,
    pub storage_url: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeListResponse {
    pub message: &'static str,
    pub resumes: Vec<ResumeRecord>,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub message: &'static str,
    pub resume: ResumeRecord,
}

/// POST /api/resumes/upload
///
/// Extraction runs before any storage write, so a file that cannot be read
/// leaves nothing behind.
pub async fn handle_upload(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let form = read_resume_form(multipart?).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let kind = file.kind()?;
    let parsed_text = file.extract_text().await?;
    info!(
        "User {user_id} uploaded {} ({} bytes, {} chars extracted)",
        file.filename,
        file.bytes.len(),
        parsed_text.len()
    );

    let key = resume_object_key(&user_id, Utc::now().timestamp_millis(), kind.extension());
    let storage_url = state
        .objects
        .put(&key, file.bytes, kind.media_type())
        .await?;

    let record = state
        .resumes
        .create(NewResume {
            user_id,
            original_filename: file.filename,
            parsed_text,
            storage_url,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Resume uploaded successfully",
            resume_id: record.id,
            storage_url: record.storage_url,
        }),
    ))
}

/// GET /api/resumes
pub async fn handle_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ResumeListResponse>, AppError> {
    let resumes = state.resumes.list_by_owner(&user_id).await?;
    Ok(Json(ResumeListResponse {
        message: "Resumes fetched successfully",
        resumes,
    }))
}

/// GET /api/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ResumeResponse>, AppError> {
    let id = parse_resume_id(&id)?;
    let resume = load_owned_resume(state.resumes.as_ref(), id, &user_id).await?;
    Ok(Json(ResumeResponse {
        message: "Resume fetched successfully",
        resume,
    }))
}

/// POST /api/resumes/:id/analyze
///
/// Only a structured analysis is written back; degraded outcomes leave the
/// stored record untouched.
pub async fn handle_analyze(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<OutcomeResponse<AnalysisResult>>, AppError> {
    let id = parse_resume_id(&id)?;
    let resume = load_owned_resume(state.resumes.as_ref(), id, &user_id).await?;
    if resume.parsed_text.trim().is_empty() {
        return Err(AppError::Validation("Empty resume".to_string()));
    }

    let ctx = PromptContext::new(resume.parsed_text);
    let raw = ask_model(state.model.as_ref(), Feature::Analyze, &ctx).await?;

    let normalized = normalize::<AnalysisPayload>(&raw)
        .map(|payload| AnalysisResult::from_payload(payload, Utc::now()));
    info!(
        "Analysis for resume {id} (user {user_id}) normalized as {:?}",
        normalized.kind()
    );
    if let Some(raw) = normalized.raw_text() {
        warn!("Returning raw analysis reply ({} chars) for resume {id}", raw.len());
    }

    if let Normalized::Structured(analysis) = &normalized {
        state
            .resumes
            .update(
                id,
                ResumePatch {
                    analysis: Some(analysis.clone()),
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;
    }

    Ok(Json(OutcomeResponse::new(normalized, &ANALYZE_MESSAGES)))
}
