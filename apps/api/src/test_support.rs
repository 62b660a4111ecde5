//! In-memory fakes for handler and store tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use crate::auth::{Claims, JwtVerifier};
use crate::config::Config;
use crate::llm_client::{GenerativeModel, LlmError};
use crate::models::resume::{NewResume, ResumePatch, ResumeRecord};
use crate::resumes::store::ResumeStore;
use crate::state::AppState;
use crate::storage::{ObjectStore, StorageError};

pub const TEST_JWT_SECRET: &str = "test-secret";

#[derive(Default)]
pub struct InMemoryResumeStore {
    records: Mutex<Vec<ResumeRecord>>,
}

impl InMemoryResumeStore {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn insert(&self, record: ResumeRecord) {
        self.records.lock().unwrap().push(record);
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, StorageError> {
        Ok(self.records.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, resume: NewResume) -> Result<ResumeRecord, StorageError> {
        let mut records = self.records.lock().unwrap();
        // keep timestamps strictly increasing so ordering is deterministic
        let mut uploaded_at = Utc::now();
        if let Some(last) = records.iter().map(|r| r.upload_timestamp).max() {
            if uploaded_at <= last {
                uploaded_at = last + Duration::milliseconds(1);
            }
        }
        let record = ResumeRecord {
            id: Uuid::new_v4(),
            user_id: resume.user_id,
            original_filename: resume.original_filename,
            parsed_text: resume.parsed_text,
            storage_url: resume.storage_url,
            upload_timestamp: uploaded_at,
            analysis: None,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: ResumePatch,
    ) -> Result<Option<ResumeRecord>, StorageError> {
        let mut records = self.records.lock().unwrap();
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(analysis) = patch.analysis {
            record.analysis = Some(analysis);
        }
        Ok(Some(record.clone()))
    }

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<ResumeRecord>, StorageError> {
        let mut owned: Vec<ResumeRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.upload_timestamp.cmp(&a.upload_timestamp));
        Ok(owned)
    }
}

/// Records every `put` and returns `memory://{key}`.
#[derive(Default)]
pub struct FakeObjectStore {
    puts: Mutex<Vec<(String, usize, String)>>,
}

impl FakeObjectStore {
    /// `(key, byte length, content type)` per upload.
    pub fn puts(&self) -> Vec<(String, usize, String)> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.puts
            .lock()
            .unwrap()
            .push((key.to_string(), bytes.len(), content_type.to_string()));
        Ok(format!("memory://{key}"))
    }
}

/// Replays queued replies in order; the last one repeats.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn replying(reply: &str) -> Self {
        Self::scripted(vec![Ok(reply.to_string())])
    }

    pub fn failing(error: LlmError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    pub fn scripted(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies.front().cloned().unwrap()
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/test".to_string(),
        s3_bucket: "resumes".to_string(),
        s3_endpoint: "http://localhost:9000".to_string(),
        s3_region: "us-east-1".to_string(),
        s3_public_base_url: None,
        aws_access_key_id: "test".to_string(),
        aws_secret_access_key: "test".to_string(),
        gemini_api_key: "test".to_string(),
        gemini_model: "gemini-test".to_string(),
        gemini_base_url: "http://localhost:1".to_string(),
        gemini_timeout_secs: 5,
        gemini_temperature: 0.3,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_issuer: None,
        jwt_audience: None,
        frontend_url: None,
        max_upload_bytes: 1024 * 1024,
        port: 0,
        rust_log: "debug".to_string(),
    }
}

/// Fakes behind an `AppState`; keep the `Arc`s to inspect them afterwards.
pub struct TestHarness {
    pub resumes: Arc<InMemoryResumeStore>,
    pub objects: Arc<FakeObjectStore>,
    pub model: Arc<ScriptedModel>,
    pub state: AppState,
}

impl TestHarness {
    pub fn new(model: ScriptedModel) -> Self {
        let resumes = Arc::new(InMemoryResumeStore::default());
        let objects = Arc::new(FakeObjectStore::default());
        let model = Arc::new(model);
        let config = test_config();
        let state = AppState {
            resumes: resumes.clone(),
            objects: objects.clone(),
            model: model.clone(),
            auth: Arc::new(JwtVerifier::new(&config.jwt_secret, None, None)),
            config,
        };
        Self {
            resumes,
            objects,
            model,
            state,
        }
    }

    pub fn router(&self) -> axum::Router {
        crate::routes::build_router(self.state.clone())
    }

    /// Stores a résumé for `owner` directly, bypassing upload.
    pub fn seed_resume(&self, owner: &str, parsed_text: &str) -> ResumeRecord {
        let record = ResumeRecord {
            id: Uuid::new_v4(),
            user_id: owner.to_string(),
            original_filename: "seeded.pdf".to_string(),
            parsed_text: parsed_text.to_string(),
            storage_url: "memory://resumes/seeded.pdf".to_string(),
            upload_timestamp: Utc::now() - Duration::days(1),
            analysis: None,
        };
        self.resumes.insert(record.clone());
        record
    }
}

/// `Authorization` header value for `user_id`.
pub fn bearer(user_id: &str) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (Utc::now().timestamp() + 3600) as usize,
        iss: None,
        aud: None,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();
    format!("Bearer {token}")
}

pub const BOUNDARY: &str = "intellihire-test-boundary";

pub enum FormPart<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

/// Encodes `parts` as a `multipart/form-data` body delimited by [`BOUNDARY`].
pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            FormPart::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Minimal DOCX archive whose body is `paragraphs`.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    use std::io::Write;

    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}
