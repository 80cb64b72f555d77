// MCP server: JSON-RPC routing over newline-delimited stdio

use crate::protocol::*;
use crate::schema;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use jde_config_core::{Arguments, KbError, KnowledgeBase, RenderedPrompt, Role};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::bytes::BytesMut;
use tokio_util::codec::{Decoder, FramedRead, FramedWrite, LinesCodec, LinesCodecError};

/// Longest accepted request line, in bytes
pub const MAX_LINE_LENGTH: usize = 1024 * 1024;

pub struct McpServer {
    kb: Arc<KnowledgeBase>,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self {
            kb,
            info: ServerInfo {
                name: "jde-config-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    /// Serve requests on stdin/stdout until stdin closes.
    pub async fn start(&self) -> Result<()> {
        tracing::info!(
            name = %self.info.name,
            version = %self.info.version,
            "MCP server listening on stdio"
        );
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Read one JSON-RPC message per line and write one response per request.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = FramedRead::new(reader, RequestLines::new(MAX_LINE_LENGTH));
        let mut output = FramedWrite::new(writer, LinesCodec::new());

        while let Some(frame) = lines.next().await {
            let response = match frame.context("Failed to read from input")? {
                Frame::Line(line) if line.trim().is_empty() => continue,
                Frame::Line(line) => self.handle_message(&line),
                Frame::Oversized => {
                    tracing::warn!(max = MAX_LINE_LENGTH, "Discarding oversized message");
                    Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()))
                }
                Frame::Undecodable => {
                    tracing::warn!("Discarding message that is not valid UTF-8");
                    Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()))
                }
            };

            if let Some(response) = response {
                let encoded =
                    serde_json::to_string(&response).context("Failed to encode response")?;
                output
                    .send(encoded)
                    .await
                    .context("Failed to write response")?;
            }
        }

        tracing::info!("Input closed, MCP server stopping");
        Ok(())
    }

    /// Handle one raw message. Notifications produce no response.
    pub fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed JSON message");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Message is not a JSON-RPC request");
                return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
            }
        };

        if request.jsonrpc != "2.0" {
            tracing::warn!(version = %request.jsonrpc, "Unsupported JSON-RPC version");
            return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
        }

        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }

        Some(self.handle_request(request))
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" | "initialized" => {
                tracing::info!("Client initialized");
            }
            method => tracing::debug!(method, "Ignoring notification"),
        }
    }

    pub fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone().unwrap_or(Value::Null);
        tracing::debug!(method = %request.method, "Handling request");

        let result = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(json!({})),
            "tools/list" => to_value(ListToolsResult {
                tools: schema::list_tools(),
            }),
            "tools/call" => parse_params(request.params).and_then(|p| self.call_tool(p)),
            "resources/list" => to_value(ListResourcesResult {
                resources: schema::list_resources(&self.kb.resources),
            }),
            "resources/read" => parse_params(request.params).and_then(|p| self.read_resource(p)),
            "prompts/list" => to_value(ListPromptsResult {
                prompts: schema::list_prompts(&self.kb.prompts),
            }),
            "prompts/get" => parse_params(request.params).and_then(|p| self.get_prompt(p)),
            method => {
                tracing::warn!(method, "Unknown method");
                Err(JsonRpcError::method_not_found(method))
            }
        };

        match result {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        }
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(params) => serde_json::from_value(params)
                .map_err(|e| JsonRpcError::invalid_params(format!("Invalid initialize parameters: {}", e)))?,
            None => InitializeParams::default(),
        };

        tracing::info!(
            client = params.client_info.as_ref().map(|c| c.name.as_str()).unwrap_or("unknown"),
            requested_version = %params.protocol_version,
            "Initialize"
        );

        to_value(InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ListChangedCapability { list_changed: false }),
                resources: Some(ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                }),
                prompts: Some(ListChangedCapability { list_changed: false }),
            },
            server_info: self.info.clone(),
        })
    }

    fn call_tool(&self, params: CallToolParams) -> Result<Value, JsonRpcError> {
        let result = match self.kb.tools.invoke(&params.name, &params.arguments) {
            Ok(response) => CallToolResult {
                content: vec![ToolContent::text(response.to_text())],
                is_error: None,
            },
            Err(e) if e.is_argument_error() => {
                tracing::warn!(tool = %params.name, error = %e, "Tool call rejected");
                CallToolResult {
                    content: vec![ToolContent::error(e.to_string())],
                    is_error: Some(true),
                }
            }
            Err(e) => {
                tracing::warn!(tool = %params.name, error = %e, "Tool call rejected");
                return Err(kb_error(&e));
            }
        };

        to_value(result)
    }

    fn read_resource(&self, params: ReadResourceParams) -> Result<Value, JsonRpcError> {
        let document = self.kb.resources.read(&params.uri).map_err(|e| {
            tracing::warn!(uri = %params.uri, "Unknown resource");
            kb_error(&e)
        })?;

        to_value(ReadResourceResult {
            contents: vec![ResourceContents {
                uri: document.uri.to_string(),
                mime_type: document.mime_type.to_string(),
                text: document.text.clone(),
            }],
        })
    }

    fn get_prompt(&self, params: GetPromptParams) -> Result<Value, JsonRpcError> {
        let rendered = self
            .kb
            .prompts
            .template(&params.name)
            .and_then(|_| Arguments::from_value(&params.arguments))
            .and_then(|args| self.kb.prompts.render(&params.name, &args))
            .map_err(|e| {
                tracing::warn!(prompt = %params.name, error = %e, "Prompt request rejected");
                kb_error(&e)
            })?;

        to_value(prompt_result(rendered))
    }
}

/// One unit of stdio input
#[derive(Debug, PartialEq, Eq)]
enum Frame {
    Line(String),
    /// A line longer than the limit; its bytes are skipped up to the next newline
    Oversized,
    /// A complete line that is not valid UTF-8
    Undecodable,
}

/// Newline framing that reports bad lines as frames instead of errors.
///
/// A decode error would end the `FramedRead` stream, so only I/O failures
/// surface as errors here.
struct RequestLines {
    lines: LinesCodec,
}

impl RequestLines {
    fn new(max_length: usize) -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(max_length),
        }
    }

    fn classify(
        result: Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<Frame>, LinesCodecError> {
        match result {
            Ok(line) => Ok(line.map(Frame::Line)),
            Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(Frame::Oversized)),
            Err(LinesCodecError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
                Ok(Some(Frame::Undecodable))
            }
            Err(e) => Err(e),
        }
    }
}

impl Decoder for RequestLines {
    type Item = Frame;
    type Error = LinesCodecError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, LinesCodecError> {
        Self::classify(self.lines.decode(buf))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, LinesCodecError> {
        Self::classify(self.lines.decode_eof(buf))
    }
}

fn prompt_result(rendered: RenderedPrompt) -> GetPromptResult {
    GetPromptResult {
        description: rendered.description,
        messages: rendered
            .steps
            .into_iter()
            .map(|step| PromptMessage {
                role: match step.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                }
                .to_string(),
                content: ToolContent::text(step.text),
            })
            .collect(),
    }
}

/// Map a knowledge base error onto a JSON-RPC error with structured data.
pub fn kb_error(error: &KbError) -> JsonRpcError {
    let mut data = serde_json::to_value(error.detail()).unwrap_or(Value::Null);

    match error {
        KbError::UnknownResource(uri) => {
            data["uri"] = json!(uri);
            JsonRpcError::resource_not_found(error.to_string()).with_data(data)
        }
        _ => JsonRpcError::invalid_params(error.to_string()).with_data(data),
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    serde_json::from_value(params.unwrap_or(Value::Null))
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid parameters: {}", e)))
}

fn to_value(result: impl serde::Serialize) -> Result<Value, JsonRpcError> {
    serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    fn server() -> McpServer {
        McpServer::new(Arc::new(KnowledgeBase::load()))
    }

    fn request(server: &McpServer, method: &str, params: Value) -> Value {
        let message = json!({"jsonrpc": "2.0", "id": 1, "method": method, "params": params});
        let response = server.handle_message(&message.to_string()).unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[test]
    fn test_initialize() {
        let response = request(
            &server(),
            "initialize",
            json!({"protocolVersion": "2024-11-05", "capabilities": {}, "clientInfo": {"name": "test", "version": "1"}}),
        );
        assert_eq!(response["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(response["result"]["serverInfo"]["name"], "jde-config-mcp");
        assert!(response["result"]["capabilities"]["prompts"].is_object());
    }

    #[test]
    fn test_notifications_get_no_reply() {
        let server = server();
        for method in ["notifications/initialized", "initialized", "notifications/cancelled"] {
            let message = json!({"jsonrpc": "2.0", "method": method});
            assert!(server.handle_message(&message.to_string()).is_none());
        }
    }

    #[test]
    fn test_protocol_errors() {
        let server = server();

        let parse = server.handle_message("{not json").unwrap();
        assert_eq!(parse.error.unwrap().code, PARSE_ERROR);

        let version = server
            .handle_message(r#"{"jsonrpc": "1.0", "id": 3, "method": "ping"}"#)
            .unwrap();
        assert_eq!(version.id, json!(3));
        assert_eq!(version.error.unwrap().code, INVALID_REQUEST);

        let unknown = request(&server, "tools/destroy", json!({}));
        assert_eq!(unknown["error"]["code"], METHOD_NOT_FOUND);
    }

    #[test]
    fn test_tools_list_and_call() {
        let server = server();

        let list = request(&server, "tools/list", json!({}));
        assert_eq!(list["result"]["tools"].as_array().unwrap().len(), 12);

        let call = request(
            &server,
            "tools/call",
            json!({"name": "get_environment_configuration", "arguments": {"environment": "PD920_production", "component": "data_sources"}}),
        );
        let text = call["result"]["content"][0]["text"].as_str().unwrap();
        let payload: Value = serde_json::from_str(text).unwrap();
        assert_eq!(payload["data_sources"]["system"]["database"], "JDE_SYSTEM_PD");
        assert!(call["result"].get("isError").is_none());
    }

    #[test]
    fn test_tool_errors() {
        let server = server();

        let unknown = request(&server, "tools/call", json!({"name": "bogus", "arguments": {}}));
        assert_eq!(unknown["error"]["code"], INVALID_PARAMS);
        assert_eq!(unknown["error"]["data"]["kind"], "unknown_tool");

        let invalid = request(
            &server,
            "tools/call",
            json!({"name": "research_installation_prerequisites", "arguments": {"component": "bogus_component"}}),
        );
        assert_eq!(invalid["result"]["isError"], true);
        let text = invalid["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Error: Invalid value 'bogus_component' for argument 'component'"));

        let missing_params = request(&server, "tools/call", Value::Null);
        assert_eq!(missing_params["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn test_resources() {
        let server = server();

        let list = request(&server, "resources/list", json!({}));
        assert_eq!(list["result"]["resources"].as_array().unwrap().len(), 7);
        assert_eq!(list["result"]["resources"][0]["mimeType"], "application/json");

        let read = request(&server, "resources/read", json!({"uri": "jde://reference/error-codes"}));
        let contents = &read["result"]["contents"][0];
        assert_eq!(contents["uri"], "jde://reference/error-codes");
        assert!(contents["text"].as_str().unwrap().contains("Invalid credentials"));

        let missing = request(&server, "resources/read", json!({"uri": "jde://nope"}));
        assert_eq!(missing["error"]["code"], RESOURCE_NOT_FOUND);
        assert_eq!(missing["error"]["data"]["uri"], "jde://nope");
    }

    #[test]
    fn test_prompts() {
        let server = server();

        let list = request(&server, "prompts/list", json!({}));
        assert_eq!(list["result"]["prompts"].as_array().unwrap().len(), 4);

        let get = request(
            &server,
            "prompts/get",
            json!({"name": "security-configuration", "arguments": {"security_level": "high", "environment": "PD920", "include_audit": "off"}}),
        );
        assert_eq!(get["result"]["description"], "Security for PD920");
        let messages = get["result"]["messages"].as_array().unwrap();
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages.len(), 3);

        let missing = request(&server, "prompts/get", json!({"name": "upgrade-planning"}));
        assert_eq!(missing["error"]["code"], INVALID_PARAMS);
        assert_eq!(missing["error"]["data"]["kind"], "missing_argument");
        assert_eq!(missing["error"]["data"]["field"], "current_tools_release");

        let unknown = request(&server, "prompts/get", json!({"name": "nope"}));
        assert_eq!(unknown["error"]["data"]["kind"], "unknown_prompt");
    }

    #[tokio::test]
    async fn test_serve_over_streams() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"resources/read","params":{"uri":"jde://reference/port-assignments"}}"#,
            "\n",
        );

        let (client, server_end) = tokio::io::duplex(64 * 1024);
        server()
            .serve(input.as_bytes(), server_end)
            .await
            .unwrap();

        let mut output = String::new();
        let mut client = client;
        client.read_to_string(&mut output).await.unwrap();

        let responses: Vec<Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[0]["result"], json!({}));
        assert_eq!(responses[1]["id"], 2);
        assert!(responses[1]["result"]["contents"][0]["text"]
            .as_str()
            .unwrap()
            .contains("7075"));
    }

    async fn serve_input(input: &[u8]) -> Vec<Value> {
        let (client, server_end) = tokio::io::duplex(64 * 1024);
        server().serve(input, server_end).await.unwrap();

        let mut output = String::new();
        let mut client = client;
        client.read_to_string(&mut output).await.unwrap();
        output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_serve_continues_after_oversized_line() {
        let mut input = vec![b'x'; MAX_LINE_LENGTH + 10];
        input.push(b'\n');
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#);
        input.push(b'\n');

        let responses = serve_input(&input).await;
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], Value::Null);
        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
        assert_eq!(responses[1]["id"], 2);
        assert_eq!(responses[1]["result"], json!({}));
    }

    #[tokio::test]
    async fn test_serve_continues_after_bad_frames() {
        let mut input = Vec::new();
        input.extend_from_slice(b"{not json\n");
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":3,"method":"ping"}"#);
        // last request has no trailing newline
        input.extend_from_slice(b"\n");
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":4,"method":"ping"}"#);

        let responses = serve_input(&input).await;
        assert_eq!(responses.len(), 4);
        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
        assert_eq!(responses[1]["error"]["code"], PARSE_ERROR);
        assert_eq!(responses[2]["id"], 3);
        assert_eq!(responses[3]["id"], 4);
    }

    #[test]
    fn test_null_id_gets_a_reply() {
        let response = server()
            .handle_message(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#)
            .unwrap();
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["id"], Value::Null);
        assert_eq!(value["result"], json!({}));
    }
}
