//! Document store for résumé records.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumePatch, ResumeRecord, ResumeRow};
use crate::storage::StorageError;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, StorageError>;

    /// Assigns the id and upload timestamp.
    async fn create(&self, resume: NewResume) -> Result<ResumeRecord, StorageError>;

    /// Applies `patch`; returns `None` when the record does not exist.
    async fn update(
        &self,
        id: Uuid,
        patch: ResumePatch,
    ) -> Result<Option<ResumeRecord>, StorageError>;

    /// All records owned by `user_id`, newest upload first.
    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<ResumeRecord>, StorageError>;
}

/// Fetches a résumé and checks that `user_id` owns it.
/// Missing is 404; owned by someone else is 403.
pub async fn load_owned_resume(
    store: &dyn ResumeStore,
    id: Uuid,
    user_id: &str,
) -> Result<ResumeRecord, AppError> {
    let record = store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;
    if record.user_id != user_id {
        tracing::warn!("User {user_id} attempted to access resume {id} owned by another user");
        return Err(AppError::Forbidden);
    }
    Ok(record)
}

/// Parses a path segment as a résumé id.
pub fn parse_resume_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::Validation("Invalid resume ID format.".to_string()))
}

/// PostgreSQL-backed store.
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, StorageError> {
        let row: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ResumeRecord::from))
    }

    async fn create(&self, resume: NewResume) -> Result<ResumeRecord, StorageError> {
        let row: ResumeRow = sqlx::query_as(
            r#"
            INSERT INTO resumes (id, user_id, original_filename, parsed_text, storage_url, uploaded_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&resume.user_id)
        .bind(&resume.original_filename)
        .bind(&resume.parsed_text)
        .bind(&resume.storage_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: ResumePatch,
    ) -> Result<Option<ResumeRecord>, StorageError> {
        let row: Option<ResumeRow> = sqlx::query_as(
            r#"
            UPDATE resumes
            SET analysis = COALESCE($2, analysis)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.analysis.map(Json))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ResumeRecord::from))
    }

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<ResumeRecord>, StorageError> {
        let rows: Vec<ResumeRow> = sqlx::query_as(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ResumeRecord::from).collect())
    }
}
