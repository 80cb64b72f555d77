use crate::config::{AppState, ServerConfig};
use anyhow::{Context, Result};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use jde_config_core::KbError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

mod handlers;

/// Start the API server
pub async fn serve(addr: &str, config: ServerConfig) -> Result<()> {
    let state = AppState::new(&config);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await.context("API server failed")?;

    Ok(())
}

/// Create the API router
fn create_router(state: AppState) -> Router {
    let http = state.config.http.clone();

    let mut router = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(health_check))
        .route("/tools", get(handlers::list_tools))
        .route("/tools/call", post(handlers::call_tool))
        .route("/resources", get(handlers::list_resources))
        .route("/resources/read", get(handlers::read_resource))
        .route("/prompts", get(handlers::list_prompts))
        .route("/prompts/get", post(handlers::get_prompt));

    if http.request_trace {
        router = router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        );
    }
    if http.cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(Arc::new(state))
}

/// Health check endpoint
async fn health_check(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service.name,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}

/// Error type for API handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Lookup(#[from] KbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Lookup(KbError::UnknownTool(_))
            | Self::Lookup(KbError::UnknownResource(_))
            | Self::Lookup(KbError::UnknownPrompt(_)) => StatusCode::NOT_FOUND,
            Self::Lookup(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let Self::Lookup(e) = &self;
        tracing::warn!(kind = e.kind(), error = %e, "Request rejected");
        let response = match serde_json::to_value(e.detail()) {
            Ok(details) => ErrorResponse::with_details(e.to_string(), details),
            Err(_) => ErrorResponse::new(e.to_string()),
        };

        (status, Json(response)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState::new(&ServerConfig::default()))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "jde-config-server");
    }

    #[tokio::test]
    async fn test_index() {
        let (status, body) = send(app(), get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["counts"], json!({"tools": 12, "resources": 7, "prompts": 4}));
        assert!(body["endpoints"].as_array().unwrap().len() >= 8);
    }

    #[tokio::test]
    async fn test_catalogs() {
        let (_, tools) = send(app(), get_request("/tools")).await;
        assert_eq!(tools["tools"].as_array().unwrap().len(), 12);

        let (_, resources) = send(app(), get_request("/resources")).await;
        assert_eq!(resources["resources"].as_array().unwrap().len(), 7);

        let (_, prompts) = send(app(), get_request("/prompts")).await;
        assert_eq!(prompts["prompts"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_call_tool() {
        let (status, body) = send(
            app(),
            post_json(
                "/tools/call",
                json!({"name": "get_installation_sequence", "arguments": {"environment_type": "development"}}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["environment_type"], "development");
        assert_eq!(body["result"]["match"], "exact");
    }

    #[tokio::test]
    async fn test_call_narrative_tool() {
        let (status, body) = send(
            app(),
            post_json(
                "/tools/call",
                json!({"name": "get_log_analysis_guidance", "arguments": {"log_type": "weblogic_log"}}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["result"].as_str().unwrap().contains("Stuck Thread"));
    }

    #[tokio::test]
    async fn test_call_tool_errors() {
        let (status, body) = send(
            app(),
            post_json("/tools/call", json!({"name": "nope", "arguments": {}})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["details"]["kind"], "unknown_tool");

        let (status, body) = send(
            app(),
            post_json(
                "/tools/call",
                json!({"name": "research_installation_prerequisites", "arguments": {"component": "bogus_component", "platform": "windows"}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "component");
        assert_eq!(body["details"]["value"], "bogus_component");

        let (status, body) = send(
            app(),
            post_json("/tools/call", json!({"name": "configure_multi_environment", "arguments": {"deployment_model": "distributed"}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["kind"], "missing_argument");
    }

    #[tokio::test]
    async fn test_read_resource() {
        let (status, body) = send(
            app(),
            get_request("/resources/read?uri=jde://reference/port-assignments"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mimeType"], "application/json");
        let ports: Value = serde_json::from_str(body["text"].as_str().unwrap()).unwrap();
        assert_eq!(ports["https"], 443);

        let (status, body) = send(app(), get_request("/resources/read?uri=jde://missing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Resource not found: jde://missing");
    }

    #[tokio::test]
    async fn test_get_prompt() {
        let (status, body) = send(
            app(),
            post_json(
                "/prompts/get",
                json!({"name": "new-environment-setup", "arguments": {
                    "environment_name": "CRP920",
                    "environment_type": "test",
                    "database_platform": "Oracle",
                    "include_verification": false
                }}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["description"], "Setup guide for CRP920");
        assert_eq!(body["steps"].as_array().unwrap().len(), 3);
        assert_eq!(body["steps"][0]["role"], "user");

        let (status, _) = send(
            app(),
            post_json("/prompts/get", json!({"name": "new-environment-setup", "arguments": {}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_disabled_layers() {
        let mut config = ServerConfig::default();
        config.http.cors = false;
        config.http.request_trace = false;
        config.service.name = "custom".to_string();

        let app = create_router(AppState::new(&config));
        let (status, body) = send(app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "custom");
    }
}
