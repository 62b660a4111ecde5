use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::normalizer::ResponseSchema;

// ────────────────────────────────────────────────────────────────────────────
// Stored records
// ────────────────────────────────────────────────────────────────────────────

/// An uploaded résumé. Owned by `user_id`; only the owner may read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: Uuid,
    pub user_id: String,
    pub original_filename: String,
    pub parsed_text: String,
    pub storage_url: String,
    pub upload_timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
}

/// Fields supplied when a résumé is first stored.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub user_id: String,
    pub original_filename: String,
    pub parsed_text: String,
    pub storage_url: String,
}

/// Partial update of a stored résumé. `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct ResumePatch {
    pub analysis: Option<AnalysisResult>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: String,
    pub original_filename: String,
    pub parsed_text: String,
    pub storage_url: String,
    pub uploaded_at: DateTime<Utc>,
    pub analysis: Option<Json<AnalysisResult>>,
}

impl From<ResumeRow> for ResumeRecord {
    fn from(row: ResumeRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            original_filename: row.original_filename,
            parsed_text: row.parsed_text,
            storage_url: row.storage_url,
            upload_timestamp: row.uploaded_at,
            analysis: row.analysis.map(|Json(a)| a),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// AI results
// ────────────────────────────────────────────────────────────────────────────

/// Per-category scores, 0–100 each. Absent means "unknown".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatting: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<u32>,
}

/// Analysis as returned by the model, before it is timestamped and stored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub overall_score: u32,
    pub category_scores: CategoryScores,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub strengths: Option<Vec<String>>,
}

impl ResponseSchema for AnalysisPayload {
    const REQUIRED_KEYS: &'static [&'static str] = &["overallScore", "categoryScores"];
    const SCORE_FIELDS: &'static [&'static str] = &[
        "/overallScore",
        "/categoryScores/formatting",
        "/categoryScores/content",
        "/categoryScores/keywords",
        "/categoryScores/impact",
    ];
}

/// Stored analysis of a résumé. The latest analysis overwrites any prior one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_scores: Option<CategoryScores>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strengths: Option<Vec<String>>,
    pub analysis_timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn from_payload(payload: AnalysisPayload, analyzed_at: DateTime<Utc>) -> Self {
        Self {
            overall_score: Some(payload.overall_score),
            category_scores: Some(payload.category_scores),
            suggestions: payload.suggestions,
            strengths: payload.strengths,
            analysis_timestamp: analyzed_at,
        }
    }
}

/// Résumé ↔ job description match. Returned to the caller, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub match_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl ResponseSchema for MatchResult {
    const REQUIRED_KEYS: &'static [&'static str] = &["matchScore"];
    const SCORE_FIELDS: &'static [&'static str] = &["/matchScore"];
}
