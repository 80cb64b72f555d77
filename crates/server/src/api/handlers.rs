use super::ApiResult;
use crate::config::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use jde_config_core::{Arguments, Document, RenderedPrompt, ToolResponse};
use jde_config_mcp::protocol::{PromptSchema, ResourceSchema, ToolSchema};
use jde_config_mcp::schema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Index
// ============================================================================

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub name: String,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
    pub counts: CatalogCounts,
}

#[derive(Debug, Serialize)]
pub struct CatalogCounts {
    pub tools: usize,
    pub resources: usize,
    pub prompts: usize,
}

pub async fn index(State(state): State<Arc<AppState>>) -> Json<IndexResponse> {
    Json(IndexResponse {
        name: state.config.service.name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            "GET /",
            "GET /health",
            "GET /tools",
            "POST /tools/call",
            "GET /resources",
            "GET /resources/read?uri=",
            "GET /prompts",
            "POST /prompts/get",
        ],
        counts: CatalogCounts {
            tools: schema::list_tools().len(),
            resources: state.kb.resources.list().len(),
            prompts: state.kb.prompts.list().len(),
        },
    })
}

// ============================================================================
// Tools
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ListToolsResponse {
    pub tools: Vec<ToolSchema>,
}

pub async fn list_tools() -> Json<ListToolsResponse> {
    Json(ListToolsResponse {
        tools: schema::list_tools(),
    })
}

#[derive(Debug, Deserialize)]
pub struct CallRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct CallToolResponse {
    pub result: serde_json::Value,
}

pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CallRequest>,
) -> ApiResult<Json<CallToolResponse>> {
    let result = match state.kb.tools.invoke(&req.name, &req.arguments)? {
        ToolResponse::Structured(value) => value,
        ToolResponse::Text(text) => serde_json::Value::String(text),
    };

    Ok(Json(CallToolResponse { result }))
}

// ============================================================================
// Resources
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ListResourcesResponse {
    pub resources: Vec<ResourceSchema>,
}

pub async fn list_resources(State(state): State<Arc<AppState>>) -> Json<ListResourcesResponse> {
    Json(ListResourcesResponse {
        resources: schema::list_resources(&state.kb.resources),
    })
}

#[derive(Debug, Deserialize)]
pub struct ReadResourceQuery {
    pub uri: String,
}

pub async fn read_resource(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReadResourceQuery>,
) -> ApiResult<Json<Document>> {
    let document = state.kb.resources.read(&query.uri)?;
    Ok(Json(document.clone()))
}

// ============================================================================
// Prompts
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ListPromptsResponse {
    pub prompts: Vec<PromptSchema>,
}

pub async fn list_prompts(State(state): State<Arc<AppState>>) -> Json<ListPromptsResponse> {
    Json(ListPromptsResponse {
        prompts: schema::list_prompts(&state.kb.prompts),
    })
}

pub async fn get_prompt(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CallRequest>,
) -> ApiResult<Json<RenderedPrompt>> {
    state.kb.prompts.template(&req.name)?;
    let args = Arguments::from_value(&req.arguments)?;
    let rendered = state.kb.prompts.render(&req.name, &args)?;
    Ok(Json(rendered))
}
