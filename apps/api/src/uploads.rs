//! Multipart form reading shared by upload and match.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::{extract_text_blocking, DocumentKind};

/// Multipart field that carries the résumé file.
pub const RESUME_FIELD: &str = "resume";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Resolves the declared media type to a supported document kind.
    pub fn kind(&self) -> Result<DocumentKind, AppError> {
        Ok(DocumentKind::from_media_type(
            self.content_type.as_deref().unwrap_or("unknown"),
        )?)
    }

    /// Extracts plain text off the async runtime.
    pub async fn extract_text(&self) -> Result<String, AppError> {
        let kind = self.kind()?;
        Ok(extract_text_blocking(self.bytes.clone(), kind).await?)
    }
}

/// Text fields plus the `resume` file, if one was sent.
#[derive(Debug, Default)]
pub struct ResumeForm {
    pub fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

impl ResumeForm {
    /// A text field, `None` when absent or blank.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }
}

/// Drains a multipart body. Only the first `resume` file part is kept;
/// other file parts are ignored.
pub async fn read_resume_form(mut multipart: Multipart) -> Result<ResumeForm, AppError> {
    let mut form = ResumeForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if let Some(filename) = field.file_name().map(str::to_string) {
            if name != RESUME_FIELD || form.file.is_some() {
                debug!("Ignoring file part '{name}'");
                continue;
            }
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await?;
            form.file = Some(UploadedFile {
                filename,
                content_type,
                bytes,
            });
        } else {
            let value = field.text().await?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}
