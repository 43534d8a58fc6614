//! JSON-RPC 2.0 over stdio.
//!
//! One request per line on stdin, one response per line on stdout.
//! Responses to notifications are never written. Diagnostics go to
//! stderr so the protocol stream stays clean.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::dispatch::ToolDispatcher;

/// Protocol revision advertised during the initialize handshake.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// URI of the single documentation resource this server exposes.
const DOCS_RESOURCE_URI: &str = "paystack://docs/api";

const SERVER_NAME: &str = "paystack-mcp";

/// JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// A request without an id is a notification and gets no response.
    fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_owned(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_owned(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn parse_error() -> Self {
        Self {
            code: -32700,
            message: "Parse error".to_owned(),
            data: None,
        }
    }

    pub fn invalid_request(detail: &str) -> Self {
        Self {
            code: -32600,
            message: format!("Invalid request: {detail}"),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }
    }

    pub fn invalid_params(detail: &str) -> Self {
        Self {
            code: -32602,
            message: format!("Invalid params: {detail}"),
            data: None,
        }
    }
}

/// Serves the MCP protocol over the given reader and writer until EOF.
///
/// Malformed lines produce a protocol-level error response and the loop
/// keeps running; only EOF or an I/O fault on the streams ends it.
///
/// # Errors
///
/// Returns any I/O error raised while reading requests or writing
/// responses.
pub async fn serve<R, W>(
    dispatcher: ToolDispatcher,
    reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    R: tokio::io::AsyncRead + Unpin,
    W: tokio::io::AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(req) => req,
            Err(err) => {
                warn!(%err, "discarding unparseable request line");
                let response = JsonRpcResponse::failure(Value::Null, JsonRpcError::parse_error());
                write_response(&mut writer, &response).await?;
                continue;
            }
        };

        debug!(method = %request.method, "handling request");
        if request.is_notification() {
            // notifications/initialized and friends need no reply
            continue;
        }

        let response = handle_request(&dispatcher, request).await;
        write_response(&mut writer, &response).await?;
    }
    Ok(())
}

/// Serves the MCP protocol on the process's stdin and stdout.
///
/// # Errors
///
/// Returns any I/O error raised by the standard streams.
pub async fn serve_stdio(dispatcher: ToolDispatcher) -> std::io::Result<()> {
    serve(dispatcher, tokio::io::stdin(), tokio::io::stdout()).await
}

async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> std::io::Result<()>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    let mut payload = serde_json::to_vec(response).map_err(std::io::Error::other)?;
    payload.push(b'\n');
    writer.write_all(&payload).await?;
    writer.flush().await
}

/// Routes one non-notification request to its handler.
pub async fn handle_request(
    dispatcher: &ToolDispatcher,
    request: JsonRpcRequest,
) -> JsonRpcResponse {
    let id = request.id.unwrap_or(Value::Null);
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::failure(
            id,
            JsonRpcError::invalid_request("jsonrpc must be \"2.0\""),
        );
    }

    match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(id, initialize_result()),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => JsonRpcResponse::success(id, tools_list_result(dispatcher)),
        "tools/call" => match parse_call_params(request.params) {
            Ok((name, arguments)) => {
                let outcome = dispatcher.call_tool(&name, arguments).await;
                JsonRpcResponse::success(id, call_tool_result(&outcome))
            }
            Err(error) => JsonRpcResponse::failure(id, error),
        },
        "resources/list" => JsonRpcResponse::success(id, resources_list_result()),
        "resources/read" => match parse_read_params(request.params) {
            Ok(uri) if uri == DOCS_RESOURCE_URI => {
                JsonRpcResponse::success(id, resources_read_result())
            }
            Ok(uri) => JsonRpcResponse::failure(
                id,
                JsonRpcError::invalid_params(&format!("unknown resource: {uri}")),
            ),
            Err(error) => JsonRpcResponse::failure(id, error),
        },
        other => JsonRpcResponse::failure(id, JsonRpcError::method_not_found(other)),
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {},
            "resources": {},
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

fn tools_list_result(dispatcher: &ToolDispatcher) -> Value {
    let tools: Vec<Value> = dispatcher
        .list_tools()
        .iter()
        .map(|tool| {
            json!({
                "name": tool.name,
                "description": tool.description,
                "inputSchema": tool.input_schema(),
            })
        })
        .collect();
    json!({ "tools": tools })
}

fn parse_call_params(params: Option<Value>) -> Result<(String, Map<String, Value>), JsonRpcError> {
    let Some(Value::Object(mut params)) = params else {
        return Err(JsonRpcError::invalid_params("params must be an object"));
    };
    let name = match params.remove("name") {
        Some(Value::String(name)) => name,
        _ => return Err(JsonRpcError::invalid_params("name must be a string")),
    };
    let arguments = match params.remove("arguments") {
        Some(Value::Object(arguments)) => arguments,
        Some(Value::Null) | None => Map::new(),
        Some(_) => return Err(JsonRpcError::invalid_params("arguments must be an object")),
    };
    Ok((name, arguments))
}

/// Renders a tool outcome as an MCP `tools/call` result.
///
/// Tool failures travel inside the result with `isError: true`, never
/// as protocol errors; the full outcome envelope rides along as
/// `structuredContent` for clients that prefer JSON over text.
fn call_tool_result(outcome: &crate::error::ToolOutcome) -> Value {
    let envelope = serde_json::to_value(outcome).unwrap_or(Value::Null);
    let text = serde_json::to_string_pretty(&envelope).unwrap_or_default();
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": !outcome.is_success(),
        "structuredContent": envelope,
    })
}

fn parse_read_params(params: Option<Value>) -> Result<String, JsonRpcError> {
    let Some(Value::Object(mut params)) = params else {
        return Err(JsonRpcError::invalid_params("params must be an object"));
    };
    match params.remove("uri") {
        Some(Value::String(uri)) => Ok(uri),
        _ => Err(JsonRpcError::invalid_params("uri must be a string")),
    }
}

fn resources_list_result() -> Value {
    json!({
        "resources": [{
            "uri": DOCS_RESOURCE_URI,
            "name": "Paystack API reference",
            "description": "Summary of the Paystack endpoints reachable through this server",
            "mimeType": "text/markdown",
        }]
    })
}

fn resources_read_result() -> Value {
    json!({
        "contents": [{
            "uri": DOCS_RESOURCE_URI,
            "mimeType": "text/markdown",
            "text": include_str!("../docs/api.md"),
        }]
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use paystack::error::PaystackError;
    use serde_json::json;

    use super::*;
    use crate::gateway::{GatewayResult, PaymentGateway};

    /// Gateway that fails every call; protocol tests never need real data.
    struct RefusingGateway;

    impl RefusingGateway {
        fn refuse(&self) -> GatewayResult<'_> {
            Box::pin(async {
                Err(PaystackError::Api {
                    status: 400,
                    message: "refused".to_owned(),
                })
            })
        }
    }

    impl PaymentGateway for RefusingGateway {
        fn initialize_transaction(
            &self,
            _: paystack::types::TransactionRequest,
        ) -> GatewayResult<'_> {
            self.refuse()
        }
        fn verify_transaction(&self, _: String) -> GatewayResult<'_> {
            self.refuse()
        }
        fn list_transactions(&self, _: paystack::types::TransactionQuery) -> GatewayResult<'_> {
            self.refuse()
        }
        fn create_customer(&self, _: paystack::types::NewCustomer) -> GatewayResult<'_> {
            self.refuse()
        }
        fn list_customers(&self, _: paystack::types::Pagination) -> GatewayResult<'_> {
            self.refuse()
        }
        fn create_plan(&self, _: paystack::types::NewPlan) -> GatewayResult<'_> {
            self.refuse()
        }
        fn list_plans(&self, _: paystack::types::Pagination) -> GatewayResult<'_> {
            self.refuse()
        }
        fn list_banks(&self, _: String) -> GatewayResult<'_> {
            self.refuse()
        }
        fn resolve_account(&self, _: String, _: String) -> GatewayResult<'_> {
            self.refuse()
        }
        fn create_refund(&self, _: paystack::types::RefundRequest) -> GatewayResult<'_> {
            self.refuse()
        }
    }

    fn dispatcher() -> ToolDispatcher {
        ToolDispatcher::new(Arc::new(RefusingGateway))
    }

    fn request(id: i64, method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_owned(),
            id: Some(json!(id)),
            method: method.to_owned(),
            params: Some(params),
        }
    }

    #[tokio::test]
    async fn initialize_advertises_tools_and_resources() {
        let response = handle_request(&dispatcher(), request(1, "initialize", json!({}))).await;
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert!(result["capabilities"]["tools"].is_object());
        assert!(result["capabilities"]["resources"].is_object());
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
    }

    #[tokio::test]
    async fn tools_list_exposes_the_full_catalog() {
        let response = handle_request(&dispatcher(), request(2, "tools/list", json!({}))).await;
        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 10);
        assert_eq!(tools[0]["name"], "initialize_transaction");
        assert_eq!(tools[0]["inputSchema"]["type"], "object");
    }

    #[tokio::test]
    async fn unknown_method_yields_method_not_found() {
        let response = handle_request(&dispatcher(), request(3, "prompts/list", json!({}))).await;
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn tools_call_failure_is_a_result_not_a_protocol_error() {
        let params = json!({"name": "verify_transaction", "arguments": {"reference": "tx1"}});
        let response = handle_request(&dispatcher(), request(4, "tools/call", params)).await;
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["structuredContent"]["outcome"], "failure");
        assert_eq!(result["structuredContent"]["kind"], "upstream_api_error");
    }

    #[tokio::test]
    async fn tools_call_without_a_name_is_invalid_params() {
        let response =
            handle_request(&dispatcher(), request(5, "tools/call", json!({"arguments": {}}))).await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn resources_round_trip() {
        let listed = handle_request(&dispatcher(), request(6, "resources/list", json!({}))).await;
        let uri = listed.result.unwrap()["resources"][0]["uri"]
            .as_str()
            .unwrap()
            .to_owned();
        assert_eq!(uri, "paystack://docs/api");

        let read = handle_request(
            &dispatcher(),
            request(7, "resources/read", json!({"uri": uri})),
        )
        .await;
        let contents = read.result.unwrap()["contents"][0].clone();
        assert_eq!(contents["mimeType"], "text/markdown");
        assert!(contents["text"].as_str().unwrap().contains("Paystack"));
    }

    #[tokio::test]
    async fn reading_an_unknown_resource_is_invalid_params() {
        let response = handle_request(
            &dispatcher(),
            request(8, "resources/read", json!({"uri": "paystack://docs/nope"})),
        )
        .await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn serve_answers_over_in_memory_streams() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            "not json\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
            "\n",
        );
        let mut output = Vec::new();
        serve(dispatcher(), input.as_bytes(), &mut output)
            .await
            .unwrap();

        let lines: Vec<JsonRpcResponse> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        // 4 input lines, but the notification gets no reply.
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].id, json!(1));
        assert!(lines[0].result.is_some());
        assert_eq!(lines[1].error.as_ref().unwrap().code, -32700);
        assert_eq!(lines[2].id, json!(2));
        assert_eq!(lines[2].result, Some(json!({})));
    }
}
