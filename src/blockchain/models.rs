// src/blockchain/models.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

// --- Error types for calls against the Nerve API ---

/// Which of the two remote surfaces a failed call was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Rpc,
    Rest,
}

impl CallKind {
    /// Prefix used when the remote answers with a non-2xx status.
    pub fn status_label(&self) -> &'static str {
        match self {
            CallKind::Rpc => "RPC HTTP",
            CallKind::Rest => "REST",
        }
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallKind::Rpc => f.write_str("RPC"),
            CallKind::Rest => f.write_str("REST"),
        }
    }
}

#[derive(Error, Debug)]
pub enum NerveClientError {
    /// The remote answered with a non-2xx status.
    #[error("Nerve {} {status}: {body}", .kind.status_label())]
    Http {
        kind: CallKind,
        status: u16,
        body: String,
    },
    /// The JSON-RPC response carried an `error` member.
    #[error("Nerve RPC error: {message}")]
    Rpc { message: String },
    #[error("invalid JSON in Nerve response: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("request to Nerve API failed: {0}")]
    Request(#[from] reqwest::Error),
}

// --- JSON-RPC wire shapes ---

/// Outgoing JSON-RPC 2.0 envelope.
#[derive(Debug, Serialize)]
pub struct RpcEnvelope<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: &'a [Value],
    pub id: u64,
}

impl<'a> RpcEnvelope<'a> {
    pub fn new(method: &'a str, params: &'a [Value], id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params,
            id,
        }
    }
}

/// Incoming JSON-RPC response. Any non-null `error` wins over `result`.
///
/// Nodes are loose about the shape of `error` (string codes, bare strings),
/// so it is kept as raw JSON and only the message is picked out.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl RpcResponse {
    pub fn into_result(self) -> Result<Value, NerveClientError> {
        if let Some(err) = self.error {
            return Err(NerveClientError::Rpc {
                message: rpc_error_message(&err),
            });
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

/// `error.message` when present, otherwise the error value itself as text.
pub fn rpc_error_message(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(s)) => s.clone(),
            Some(other) if !other.is_null() => other.to_string(),
            _ => error.to_string(),
        },
        other => other.to_string(),
    }
}

// --- REST call descriptor ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RestMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestMethod::Get => "GET",
            RestMethod::Post => "POST",
            RestMethod::Put => "PUT",
            RestMethod::Patch => "PATCH",
            RestMethod::Delete => "DELETE",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "GET" => Some(RestMethod::Get),
            "POST" => Some(RestMethod::Post),
            "PUT" => Some(RestMethod::Put),
            "PATCH" => Some(RestMethod::Patch),
            "DELETE" => Some(RestMethod::Delete),
            _ => None,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        match method {
            RestMethod::Get => reqwest::Method::GET,
            RestMethod::Post => reqwest::Method::POST,
            RestMethod::Put => reqwest::Method::PUT,
            RestMethod::Patch => reqwest::Method::PATCH,
            RestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for RestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RestCall {
    pub path: String,
    pub method: RestMethod,
    pub body: Option<Value>,
}

impl RestCall {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_method(mut self, method: RestMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Body that actually goes on the wire: never for GET, never for JSON null.
    pub fn wire_body(&self) -> Option<&Value> {
        match (&self.method, &self.body) {
            (RestMethod::Get, _) => None,
            (_, Some(Value::Null)) | (_, None) => None,
            (_, Some(body)) => Some(body),
        }
    }
}

/// Outcome of a successful REST call.
#[derive(Debug, Clone, PartialEq)]
pub enum RestOutcome {
    /// 2xx with an empty body.
    NoContent,
    Json(Value),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_member_takes_precedence_over_result() {
        let resp: RpcResponse =
            serde_json::from_value(json!({"result": 5, "error": {"message": "boom"}})).unwrap();
        match resp.into_result() {
            Err(NerveClientError::Rpc { message }) => assert_eq!(message, "boom"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn null_error_is_not_a_failure() {
        let resp: RpcResponse =
            serde_json::from_value(json!({"result": [1, 2], "error": null})).unwrap();
        assert_eq!(resp.into_result().unwrap(), json!([1, 2]));
    }

    #[test]
    fn get_never_carries_a_body() {
        let call = RestCall::get("api/info").with_body(json!({"a": 1}));
        assert!(call.wire_body().is_none());

        let call = call.with_method(RestMethod::Post);
        assert_eq!(call.wire_body(), Some(&json!({"a": 1})));

        let call = RestCall::get("x").with_method(RestMethod::Put).with_body(Value::Null);
        assert!(call.wire_body().is_none());
    }

    #[test]
    fn http_error_message_names_surface_and_status() {
        let err = NerveClientError::Http {
            kind: CallKind::Rest,
            status: 500,
            body: "internal error".into(),
        };
        assert_eq!(err.to_string(), "Nerve REST 500: internal error");

        let err = NerveClientError::Http {
            kind: CallKind::Rpc,
            status: 503,
            body: "busy".into(),
        };
        assert_eq!(err.to_string(), "Nerve RPC HTTP 503: busy");
    }

    #[test]
    fn loosely_shaped_errors_still_fail_with_their_message() {
        let resp: RpcResponse = serde_json::from_value(
            json!({"result": 1, "error": {"code": "err_0014", "message": "tx not found"}}),
        )
        .unwrap();
        match resp.into_result() {
            Err(NerveClientError::Rpc { message }) => assert_eq!(message, "tx not found"),
            other => panic!("unexpected: {:?}", other),
        }

        let resp: RpcResponse = serde_json::from_value(json!({"error": "boom"})).unwrap();
        match resp.into_result() {
            Err(NerveClientError::Rpc { message }) => assert_eq!(message, "boom"),
            other => panic!("unexpected: {:?}", other),
        }

        assert_eq!(rpc_error_message(&json!({"code": 7})), r#"{"code":7}"#);
    }
}
