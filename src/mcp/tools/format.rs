// Rendering of tool outcomes into the text handed back to the host.

use serde_json::Value;

use super::ToolOutput;

pub const NO_CONTENT_TEXT: &str = "(empty response body)";

pub fn render(output: &ToolOutput) -> String {
    match output {
        ToolOutput::NoContent => NO_CONTENT_TEXT.to_string(),
        ToolOutput::Value(value) => render_value(value),
    }
}

/// Scalars as bare text, arrays and objects as pretty-printed JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}
