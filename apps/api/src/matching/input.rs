//! `POST /api/match` accepts either a JSON body or a multipart form.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::uploads::{read_resume_form, UploadedFile};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchJson {
    #[serde(default)]
    job_description: Option<String>,
    #[serde(default)]
    resume_id: Option<String>,
    #[serde(default)]
    resume_text: Option<String>,
}

/// Where the résumé text for a match comes from, in precedence order.
#[derive(Debug)]
pub enum ResumeSource {
    File(UploadedFile),
    StoredId(String),
    Text(String),
}

#[derive(Debug)]
pub struct MatchInput {
    pub job_description: Option<String>,
    pub source: Option<ResumeSource>,
}

impl MatchInput {
    fn resolve(
        job_description: Option<String>,
        file: Option<UploadedFile>,
        resume_id: Option<String>,
        resume_text: Option<String>,
    ) -> Self {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let source = file
            .map(ResumeSource::File)
            .or_else(|| non_blank(resume_id).map(ResumeSource::StoredId))
            .or_else(|| non_blank(resume_text).map(ResumeSource::Text));
        Self {
            job_description: non_blank(job_description),
            source,
        }
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

#[async_trait]
impl FromRequest<AppState> for MatchInput {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        if is_multipart(&req) {
            let multipart = Multipart::from_request(req, state).await?;
            let form = read_resume_form(multipart).await?;
            Ok(Self::resolve(
                form.text("jobDescription"),
                form.file,
                form.fields.get("resumeId").cloned(),
                form.fields.get("resumeText").cloned(),
            ))
        } else {
            let Json(body) = Json::<MatchJson>::from_request(req, state).await?;
            Ok(Self::resolve(
                body.job_description,
                None,
                body.resume_id,
                body.resume_text,
            ))
        }
    }
}
