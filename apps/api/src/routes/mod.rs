pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::cover_letter::handlers::handle_cover_letter;
use crate::matching::handlers::handle_match;
use crate::resumes::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Resumes
        .route("/api/resumes", get(handlers::handle_list))
        .route("/api/resumes/upload", post(handlers::handle_upload))
        .route("/api/resumes/:id", get(handlers::handle_get))
        .route("/api/resumes/:id/analyze", post(handlers::handle_analyze))
        // AI features
        .route("/api/match", post(handle_match))
        .route("/api/cover-letter", post(handle_cover_letter))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::test_support::{ScriptedModel, TestHarness};

    #[tokio::test]
    async fn test_root_banner() {
        let harness = TestHarness::new(ScriptedModel::replying("unused"));
        let response = harness
            .router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"IntelliHire Backend is running!");
    }

    #[tokio::test]
    async fn test_health_needs_no_token() {
        let harness = TestHarness::new(ScriptedModel::replying("unused"));
        let response = harness
            .router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_401() {
        let harness = TestHarness::new(ScriptedModel::replying("unused"));
        let response = harness
            .router()
            .oneshot(
                Request::get("/api/resumes")
                    .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_401() {
        let harness = TestHarness::new(ScriptedModel::replying("unused"));
        let response = harness
            .router()
            .oneshot(
                Request::get("/api/resumes")
                    .header(header::AUTHORIZATION, "Bearer not.a.jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
