//! Common utilities shared across the QWeather tools.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domains::tools::error::{Operation, ToolError};
use crate::domains::weather::WeatherError;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Turn a rendered report or a provider failure into a tool result.
///
/// This is the only place tool failures are worded.
pub fn report_result(operation: Operation, report: Result<String, WeatherError>) -> CallToolResult {
    match report {
        Ok(text) => success_result(text),
        Err(e) => error_result(&ToolError::failed(operation, e).to_string()),
    }
}

/// Deserialize raw tool-call arguments into a params struct.
pub fn parse_arguments<P: DeserializeOwned>(
    arguments: serde_json::Map<String, serde_json::Value>,
) -> Result<P, McpError> {
    serde_json::from_value(serde_json::Value::Object(arguments)).map_err(|e| {
        McpError::invalid_params(ToolError::invalid_arguments(e.to_string()).to_string(), None)
    })
}

/// The location named in a report header: what the caller asked for, or the
/// resolved ID when they gave nothing.
pub fn display_location<'a>(requested: &'a str, resolved: &'a str) -> &'a str {
    match requested.trim() {
        "" => resolved,
        trimmed => trimmed,
    }
}

/// Number of entries to render: `min(requested, cap, available)`.
pub fn rendered_count(requested: u32, cap: u32, available: usize) -> usize {
    let limit = requested.min(cap) as usize;
    limit.min(available)
}

/// Parse a provider temperature reading.
pub fn parse_celsius(field: &str, raw: &str) -> Result<f64, WeatherError> {
    raw.trim().parse().map_err(|_| {
        WeatherError::InvalidResponse(format!("{field} '{raw}' is not a number"))
    })
}

/// First text block of a tool result.
#[cfg(test)]
pub fn result_text(result: &CallToolResult) -> String {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => text.text.clone(),
        other => panic!("expected text content, got {other:?}"),
    }
}
