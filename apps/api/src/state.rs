use std::sync::Arc;

use crate::auth::JwtVerifier;
use crate::config::Config;
use crate::llm_client::GenerativeModel;
use crate::resumes::store::ResumeStore;
use crate::storage::ObjectStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub resumes: Arc<dyn ResumeStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub model: Arc<dyn GenerativeModel>,
    pub auth: Arc<JwtVerifier>,
    pub config: Config,
}
