//! Per-invocation request handling.
//!
//! Each event goes through the same steps: read path and method, normalize headers,
//! authenticate, resolve a route, run the handler, wrap the outcome in an envelope.
//! Authentication runs before route lookup, so an unmatched route still needs a
//! valid token.

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::auth::{self, Identity};
use crate::errors::AppError;
use crate::state::AppState;
use crate::{assessment, cover_letter, industry, resume, user};

pub mod envelope;
pub mod event;
pub mod routes;

use envelope::ResponseEnvelope;
use event::InboundEvent;
use routes::Action;

/// Handles one invocation. Never fails: every error becomes an envelope.
pub async fn dispatch(state: &AppState, event: &InboundEvent) -> ResponseEnvelope {
    let path = event.path();
    let method = event.method();
    info!("Router -> Path: [{path}], Method: [{method}]");

    match route(state, event, path, method).await {
        Ok(envelope) => envelope,
        Err(err) => err.into_envelope(),
    }
}

async fn route(
    state: &AppState,
    event: &InboundEvent,
    path: &str,
    method: &str,
) -> Result<ResponseEnvelope, AppError> {
    let headers = event.normalized_headers();
    let identity = auth::authenticate(&headers)?;

    let Some(action) = routes::resolve(&state.modules, method, path) else {
        warn!("Route not found: {method} {path}");
        return Err(AppError::NotFound("Route not found".to_string()));
    };

    let ctx = RequestContext {
        identity,
        path,
        event,
    };

    match action {
        Action::CheckOnboarding => user::handlers::handle_check_onboarding(state, &ctx).await,
        Action::GetProfile => user::handlers::handle_get_profile(state, &ctx).await,
        Action::UpdateProfile => user::handlers::handle_update_profile(state, &ctx).await,
        Action::GetResume => resume::handlers::handle_get_resume(state, &ctx).await,
        Action::SaveResume => resume::handlers::handle_save_resume(state, &ctx).await,
        Action::ImproveResume => resume::handlers::handle_improve_resume(state, &ctx).await,
        Action::ListCoverLetters => cover_letter::handlers::handle_list(state, &ctx).await,
        Action::CreateCoverLetter => cover_letter::handlers::handle_create(state, &ctx).await,
        Action::GetCoverLetter => cover_letter::handlers::handle_get_one(state, &ctx).await,
        Action::DeleteCoverLetter => cover_letter::handlers::handle_delete(state, &ctx).await,
        Action::GenerateQuiz => assessment::handlers::handle_generate(state, &ctx).await,
        Action::SaveQuizResult => assessment::handlers::handle_save(state, &ctx).await,
        Action::QuizHistory => assessment::handlers::handle_history(state, &ctx).await,
        Action::IndustryInsights => industry::handlers::handle_get_insights(state, &ctx).await,
    }
}

/// What a handler gets to see of an authenticated request.
pub struct RequestContext<'a> {
    pub identity: Identity,
    pub path: &'a str,
    event: &'a InboundEvent,
}

impl<'a> RequestContext<'a> {
    pub fn user_id(&self) -> &str {
        &self.identity.user_id
    }

    /// The body as text; `None` when absent or blank.
    pub fn body_text(&self) -> Result<Option<String>, AppError> {
        Ok(self
            .event
            .body_text()?
            .filter(|text| !text.trim().is_empty()))
    }

    /// Parses a required JSON body. An absent or blank body is a validation error
    /// carrying `empty_message`.
    pub fn json_body<T: DeserializeOwned>(&self, empty_message: &str) -> Result<T, AppError> {
        let text = self
            .body_text()?
            .ok_or_else(|| AppError::Validation(empty_message.to_string()))?;
        parse_json(&text)
    }

    /// Parses an optional JSON body, falling back to `T::default()` when there is none.
    pub fn json_body_or_default<T: DeserializeOwned + Default>(&self) -> Result<T, AppError> {
        match self.body_text()? {
            Some(text) => parse_json(&text),
            None => Ok(T::default()),
        }
    }

    /// The `{id}` of an item route: `pathParameters.id`, else the last path segment.
    pub fn path_id(&self) -> Result<String, AppError> {
        let id = self.event.path_parameter("id").unwrap_or_else(|| {
            self.path
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string()
        });
        if id.trim().is_empty() {
            return Err(AppError::Validation("ID is missing".to_string()));
        }
        Ok(id)
    }
}

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, AppError> {
    serde_json::from_str(text).map_err(|e| AppError::Validation(format!("Invalid JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::unsigned_token;
    use crate::llm_client::ScriptedGenerator;
    use crate::test_support::{authed_event, event, TestApp};
    use serde_json::{json, Value};

    fn body(envelope: &ResponseEnvelope) -> Value {
        serde_json::from_str(&envelope.body).unwrap()
    }

    #[tokio::test]
    async fn test_missing_authorization_is_401() {
        let app = TestApp::new(ScriptedGenerator::new());
        let response = dispatch(&app.state, &event("GET", "/profile", None)).await;
        assert_eq!(response.status_code, 401);
        assert_eq!(
            body(&response),
            json!({"error": "Missing or invalid Authorization header"})
        );
    }

    #[tokio::test]
    async fn test_unauthenticated_unknown_route_is_401_not_404() {
        let app = TestApp::new(ScriptedGenerator::new());
        let response = dispatch(&app.state, &event("GET", "/nonexistent", None)).await;
        assert_eq!(response.status_code, 401);
    }

    #[tokio::test]
    async fn test_unknown_route_with_token_is_404() {
        let app = TestApp::new(ScriptedGenerator::new());
        let response = dispatch(&app.state, &authed_event("abc123", "GET", "/nonexistent", None)).await;
        assert_eq!(response.status_code, 404);
        assert_eq!(body(&response), json!({"error": "Route not found"}));
    }

    #[tokio::test]
    async fn test_sub_claim_becomes_partition_owner() {
        let app = TestApp::new(ScriptedGenerator::new());
        let token = unsigned_token(&json!({"sub": "abc123", "email": "a@b.co"}));
        let mut request = event("POST", "/profile", Some(r#"{"industry":"tech-software"}"#));
        request.headers = Some(
            [("Authorization".to_string(), Value::String(format!("Bearer {token}")))]
                .into_iter()
                .collect(),
        );

        let response = dispatch(&app.state, &request).await;
        assert_eq!(response.status_code, 200);
        let saved = body(&response);
        assert_eq!(saved["pk"], "USER#abc123");
        assert_eq!(saved["email"], "a@b.co");
    }

    #[tokio::test]
    async fn test_missing_profile_is_404() {
        let app = TestApp::new(ScriptedGenerator::new());
        let response = dispatch(&app.state, &authed_event("abc123", "GET", "/profile", None)).await;
        assert_eq!(response.status_code, 404);
        assert_eq!(body(&response), json!({"error": "Profile not found"}));
    }

    #[tokio::test]
    async fn test_resume_upsert_keeps_created_at_and_advances_updated_at() {
        let app = TestApp::new(ScriptedGenerator::new());

        let first = dispatch(
            &app.state,
            &authed_event("abc123", "POST", "/resume", Some(r#"{"content":"v1"}"#)),
        )
        .await;
        assert_eq!(first.status_code, 200);
        let first = body(&first);
        assert_eq!(first["pk"], "USER#abc123");
        assert_eq!(first["sk"], "RESUME");
        assert_eq!(first["createdAt"], first["updatedAt"]);

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let second = dispatch(
            &app.state,
            &authed_event("abc123", "POST", "/resume", Some(r#"{"content":"v2"}"#)),
        )
        .await;
        let second = body(&second);
        assert_eq!(second["sk"], "RESUME");
        assert_eq!(second["createdAt"], first["createdAt"]);
        assert_eq!(second["content"], "v2");
        assert!(second["updatedAt"].as_str().unwrap() > first["updatedAt"].as_str().unwrap());

        let stored = dispatch(&app.state, &authed_event("abc123", "GET", "/resume", None)).await;
        assert_eq!(body(&stored), second);
    }

    #[tokio::test]
    async fn test_save_with_empty_questions_is_400() {
        let app = TestApp::new(ScriptedGenerator::new());
        let response = dispatch(
            &app.state,
            &authed_event(
                "abc123",
                "POST",
                "/interview/save",
                Some(r#"{"questions":[],"userAnswers":[],"score":0}"#),
            ),
        )
        .await;
        assert_eq!(response.status_code, 400);
        assert_eq!(body(&response), json!({"error": "Questions list cannot be empty"}));
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_400() {
        let app = TestApp::new(ScriptedGenerator::new());
        let response = dispatch(
            &app.state,
            &authed_event("abc123", "POST", "/profile", Some("{not json")),
        )
        .await;
        assert_eq!(response.status_code, 400);
        assert!(body(&response)["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn test_bad_base64_body_is_500() {
        let app = TestApp::new(ScriptedGenerator::new());
        let mut request = authed_event("abc123", "POST", "/resume", Some("@@@"));
        request.is_base64_encoded = Some(true);
        let response = dispatch(&app.state, &request).await;
        assert_eq!(response.status_code, 500);
        assert_eq!(body(&response), json!({"error": "Invalid Base64 body"}));
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let app = TestApp::new(ScriptedGenerator::new());
        app.table.fail_writes(true);
        let response = dispatch(
            &app.state,
            &authed_event("abc123", "POST", "/resume", Some(r#"{"content":"v1"}"#)),
        )
        .await;
        assert_eq!(response.status_code, 500);
        assert!(body(&response)["error"].as_str().unwrap().contains("Database error"));
    }

    #[tokio::test]
    async fn test_disabled_module_is_route_not_found() {
        let app = TestApp::with_modules(ScriptedGenerator::new(), &[routes::Module::Resume]);
        let response = dispatch(&app.state, &authed_event("abc123", "GET", "/profile", None)).await;
        assert_eq!(response.status_code, 404);
        assert_eq!(body(&response), json!({"error": "Route not found"}));
    }

    #[test]
    fn test_path_id_prefers_path_parameters() {
        fn path_id(request: &InboundEvent, path: &str) -> Result<String, AppError> {
            RequestContext {
                identity: Identity {
                    user_id: "abc123".into(),
                    email: None,
                },
                path,
                event: request,
            }
            .path_id()
        }

        let mut request = authed_event("abc123", "GET", "/cover-letters/from-path", None);
        request.path_parameters = Some([("id".to_string(), json!("from-params"))].into_iter().collect());
        assert_eq!(path_id(&request, "/cover-letters/from-path").unwrap(), "from-params");

        request.path_parameters = None;
        assert_eq!(path_id(&request, "/cover-letters/from-path").unwrap(), "from-path");
        assert_eq!(
            path_id(&request, "/cover-letters/").unwrap_err().to_string(),
            "ID is missing"
        );
    }
}
