//! Conversor MCP Server
//!
//! Line-delimited JSON-RPC 2.0 over stdin/stdout.
//!
//! Tools:
//! - convert: Convert a value between two units of a category
//! - list_categories: List the measurement categories
//! - list_units: List the unit names of a category
//! - symbol: Get the symbol of a temperature unit
//!
//! Logs go to stderr; stdout carries protocol messages only.

use conversor::{Amount, Category, ConversionError, Conversor, ConversorConfig, ErrorReport, CURRENCY_RATES_AS_OF};
use std::io::{self, BufRead, Write};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing_subscriber::EnvFilter;

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "conversor";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    /// `None` only when the member is absent; `"id": null` is `Some(Null)`
    #[serde(default, deserialize_with = "present_id")]
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    id: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn invalid_params(message: impl Into<String>) -> Self {
        McpError { code: -32602, message: message.into(), data: None }
    }
}

impl McpResponse {
    fn parse_error(message: String) -> Self {
        McpResponse {
            jsonrpc: "2.0".to_string(),
            id: JsonValue::Null,
            result: None,
            error: Some(McpError { code: -32700, message, data: None }),
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() {
    init_logging();

    let config = ConversorConfig::from_env();
    let conversor = Conversor::with_builtin_units().with_config(&config);

    tracing::info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "Conversor MCP Server started");
    tracing::info!(same_unit = ?config.same_unit, precision = ?config.precision, "configuration loaded");
    tracing::info!(rates_as_of = CURRENCY_RATES_AS_OF, "currency snapshot");

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                tracing::info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let Some(response) = handle_line(&conversor, line) else {
                    continue;
                };

                if let Err(e) = write_response(&response) {
                    tracing::error!("error writing response: {}", e);
                    break;
                }
            }
            Err(e) => {
                tracing::error!("error reading input: {}", e);
                break;
            }
        }
    }

    tracing::info!("server shutting down");
}

fn write_response(response: &McpResponse) -> io::Result<()> {
    let response_json = serde_json::to_string(response)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", response_json)?;
    stdout.flush()
}

/// Handle one input line; `None` for notifications, which get no response
fn handle_line(conversor: &Conversor, line: &str) -> Option<McpResponse> {
    let request: McpRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("error parsing request: {}", e);
            return Some(McpResponse::parse_error(format!("Parse error: {}", e)));
        }
    };

    tracing::debug!(method = %request.method, "processing");
    let response = handle_request(conversor, &request);

    if request.id.is_none() {
        tracing::debug!(method = %request.method, "notification processed (no response)");
        return None;
    }

    Some(response)
}

fn handle_request(conversor: &Conversor, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(conversor, &request.params),

        _ => Err(McpError {
            code: -32601,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone().unwrap_or(JsonValue::Null),
            result: Some(r),
            error: None,
        },
        Err(e) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone().unwrap_or(JsonValue::Null),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    tracing::info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Measurement-unit conversion: length, mass, temperature, currency"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": format!(
            "Conversor converts values between units of one category. Call list_units first to get valid unit names. Currency rates are a static snapshot as of {}.",
            CURRENCY_RATES_AS_OF
        )
    }))
}

fn category_names() -> Vec<&'static str> {
    Category::ALL.iter().map(|c| c.name()).collect()
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    Ok(json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value from one unit to another within a category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Measurement category",
                            "enum": category_names()
                        },
                        "value": {
                            "type": ["string", "number"],
                            "description": "Amount to convert (e.g., \"123.4\")"
                        },
                        "from": {
                            "type": "string",
                            "description": "Origin unit name (e.g., \"Nautical Mile\", \"EUR\")"
                        },
                        "to": {
                            "type": "string",
                            "description": "Destination unit name"
                        }
                    },
                    "required": ["category", "value", "from", "to"]
                }
            },
            {
                "name": "list_categories",
                "description": "List available measurement categories.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "list_units",
                "description": "List the unit names of a category, in display order.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "enum": category_names()
                        }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "symbol",
                "description": "Get the symbol of a temperature unit (°C, °F, K).",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "unit": {
                            "type": "string",
                            "description": "Temperature unit name"
                        }
                    },
                    "required": ["unit"]
                }
            }
        ]
    }))
}

fn handle_tool_call(conversor: &Conversor, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match name {
        "convert" => tool_convert(conversor, &args),
        "list_categories" => tool_list_categories(conversor),
        "list_units" => tool_list_units(conversor, &args),
        "symbol" => tool_symbol(conversor, &args),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

/// Tool result for a failed conversion; the call itself succeeded
fn tool_error(err: &ConversionError) -> JsonValue {
    let report = ErrorReport::from(err);
    json!({
        "content": [{ "type": "text", "text": report.to_string() }],
        "error": report,
        "isError": true
    })
}

fn str_arg<'a>(args: &'a JsonValue, key: &str) -> Result<&'a str, McpError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", key)))
}

fn tool_convert(conversor: &Conversor, args: &JsonValue) -> Result<JsonValue, McpError> {
    let value = match args.get("value") {
        Some(JsonValue::String(s)) => Amount::from(s.as_str()),
        Some(JsonValue::Number(n)) => match n.as_f64() {
            Some(f) => Amount::from(f),
            None => Amount::from(n.to_string()),
        },
        Some(other) => Amount::from(other.to_string()),
        None => return Err(McpError::invalid_params("Missing value argument")),
    };
    let from = str_arg(args, "from")?;
    let to = str_arg(args, "to")?;

    // An absent category is the caller's "nothing selected"
    let category = match args.get("category") {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(raw)) => match raw.parse::<Category>() {
            Ok(c) => Some(c),
            Err(e) => return Ok(tool_error(&e)),
        },
        Some(other) => {
            let err = ConversionError::UnknownCategory { input: other.to_string() };
            return Ok(tool_error(&err));
        }
    };

    match conversor.convert(category, value, from, to) {
        Ok(result) => Ok(json!({
            "content": [{ "type": "text", "text": conversor.describe(&result) }],
            "value": result.value,
            "formatted": conversor.format(&result),
            "origin": result.origin,
            "destination": result.destination,
            "isError": false
        })),
        Err(e) => {
            tracing::debug!(code = e.code(), "conversion rejected: {}", e);
            Ok(tool_error(&e))
        }
    }
}

fn tool_list_categories(conversor: &Conversor) -> Result<JsonValue, McpError> {
    let categories: Vec<JsonValue> = conversor.list_categories().iter().map(|c| json!({
        "name": c.name(),
        "title": c.title(),
        "precision": c.precision()
    })).collect();

    let text = categories.iter()
        .filter_map(|c| c.get("name").and_then(|n| n.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "categories": categories
    }))
}

fn tool_list_units(conversor: &Conversor, args: &JsonValue) -> Result<JsonValue, McpError> {
    let raw = str_arg(args, "category")?;
    let category = match raw.parse::<Category>() {
        Ok(c) => c,
        Err(e) => return Ok(tool_error(&e)),
    };

    let units = conversor.list_unit_names(category);
    Ok(json!({
        "content": [{ "type": "text", "text": units.join(", ") }],
        "category": category,
        "units": units,
        "base": conversor.registry(category).base().name
    }))
}

fn tool_symbol(conversor: &Conversor, args: &JsonValue) -> Result<JsonValue, McpError> {
    let unit = str_arg(args, "unit")?;
    match conversor.symbol_for(unit) {
        Ok(symbol) => Ok(json!({
            "content": [{ "type": "text", "text": symbol }],
            "symbol": symbol
        })),
        Err(e) => Ok(tool_error(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(line: &str) -> JsonValue {
        let conversor = Conversor::with_builtin_units();
        let response = handle_line(&conversor, line).expect("request with id gets a response");
        serde_json::to_value(&response).unwrap()
    }

    fn call_tool(name: &str, arguments: JsonValue) -> JsonValue {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        });
        call(&request.to_string())["result"].clone()
    }

    #[test]
    fn test_initialize() {
        let response = call(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-06-18"}}"#);
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2025-06-18");
        assert_eq!(response["result"]["serverInfo"]["name"], "conversor");
    }

    #[test]
    fn test_notification_gets_no_response() {
        let conversor = Conversor::with_builtin_units();
        assert!(handle_line(&conversor, r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).is_none());
    }

    #[test]
    fn test_null_id_is_a_request() {
        let response = call(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#);
        assert_eq!(response.get("id"), Some(&JsonValue::Null));
        assert_eq!(response["result"], json!({}));
    }

    #[test]
    fn test_parse_error() {
        let response = call("{not json");
        assert_eq!(response["error"]["code"], -32700);
        assert_eq!(response.get("id"), Some(&JsonValue::Null));
    }

    #[test]
    fn test_unknown_method() {
        let response = call(r#"{"jsonrpc":"2.0","id":7,"method":"resources/list"}"#);
        assert_eq!(response["error"]["code"], -32601);
        assert_eq!(response["id"], 7);
    }

    #[test]
    fn test_tools_list() {
        let response = call(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#);
        let names: Vec<&str> = response["result"]["tools"].as_array().unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["convert", "list_categories", "list_units", "symbol"]);
    }

    #[test]
    fn test_convert_tool() {
        let result = call_tool("convert", json!({
            "category": "temperature", "value": "100", "from": "Celsius", "to": "Fahrenheit"
        }));
        assert_eq!(result["isError"], false);
        assert_eq!(result["formatted"], "212.00");
        assert_eq!(result["content"][0]["text"], "100.0 °C Celsius are 212.00 °F Fahrenheit");
        assert_eq!(result["destination"]["symbol"], "°F");
    }

    #[test]
    fn test_convert_tool_numeric_value() {
        let result = call_tool("convert", json!({
            "category": "mass", "value": 1, "from": "Kilogram", "to": "Gram"
        }));
        assert_eq!(result["value"], 1000.0);
    }

    #[test]
    fn test_convert_tool_errors() {
        let result = call_tool("convert", json!({
            "category": "length", "value": "abc", "from": "Meter", "to": "Foot"
        }));
        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], "INVALID_NUMBER");

        let result = call_tool("convert", json!({
            "category": "currency", "value": "1", "from": "USD", "to": "BTC"
        }));
        assert_eq!(result["error"]["code"], "UNIT_NOT_FOUND");

        let result = call_tool("convert", json!({ "value": "1", "from": "USD", "to": "EUR" }));
        assert_eq!(result["error"]["code"], "MISSING_SELECTION");

        let result = call_tool("convert", json!({
            "category": "volume", "value": "1", "from": "L", "to": "mL"
        }));
        assert_eq!(result["error"]["code"], "UNKNOWN_CATEGORY");

        let result = call_tool("convert", json!({
            "category": 3, "value": "1", "from": "Meter", "to": "Foot"
        }));
        assert_eq!(result["error"]["code"], "UNKNOWN_CATEGORY");

        let result = call_tool("convert", json!({
            "category": null, "value": "1", "from": "Meter", "to": "Foot"
        }));
        assert_eq!(result["error"]["code"], "MISSING_SELECTION");
    }

    #[test]
    fn test_convert_tool_missing_argument() {
        let response = call(&json!({
            "jsonrpc": "2.0", "id": 3, "method": "tools/call",
            "params": { "name": "convert", "arguments": { "category": "length", "value": "1" } }
        }).to_string());
        assert_eq!(response["error"]["code"], -32602);
    }

    #[test]
    fn test_list_tools() {
        let result = call_tool("list_categories", json!({}));
        assert_eq!(result["content"][0]["text"], "length, mass, temperature, currency");

        let result = call_tool("list_units", json!({ "category": "currencies" }));
        assert_eq!(result["category"], "currency");
        assert_eq!(result["base"], "USD");
        assert_eq!(result["units"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn test_symbol_tool() {
        let result = call_tool("symbol", json!({ "unit": "Kelvin" }));
        assert_eq!(result["symbol"], "K");

        let result = call_tool("symbol", json!({ "unit": "Meter" }));
        assert_eq!(result["isError"], true);
    }
}
