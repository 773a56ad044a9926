//! Client for the Nerve blockchain API.
//!
//! Two remote surfaces are exposed by a Nerve node: a JSON-RPC endpoint at
//! `{base}/jsonrpc` and path-addressed REST endpoints under `{base}/`. Both
//! are reduced here to the same contract: a JSON value on success, or a
//! [`NerveClientError`] describing why the call failed.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::blockchain::{
    models::{CallKind, NerveClientError, RestCall, RestOutcome, RpcEnvelope, RpcResponse},
    request_id::RequestIdCounter,
};

pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Main client for talking to a Nerve node.
///
/// Clones share the underlying connection pool and request id counter, so a
/// clone behaves as the same client. Independent clients built with
/// [`NerveClient::new`] keep independent id sequences.
#[derive(Clone, Debug)]
pub struct NerveClient {
    http: Client,
    base_url: Arc<str>,
    ids: Arc<RequestIdCounter>,
}

impl NerveClient {
    /// Create a client against the given base URL. Trailing slashes are dropped.
    pub fn new(base_url: &str) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            ids: Arc::new(RequestIdCounter::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Id of the most recent JSON-RPC call, 0 before the first one.
    pub fn last_request_id(&self) -> u64 {
        self.ids.last_id()
    }

    /// Call a JSON-RPC method and return its `result` untouched.
    pub async fn jsonrpc_value(
        &self,
        method: &str,
        params: &[Value],
    ) -> Result<Value, NerveClientError> {
        let url = format!("{}/jsonrpc", self.base_url);
        let id = self.ids.next_id();
        let envelope = RpcEnvelope::new(method, params, id);
        debug!(method, id, "Nerve JSON-RPC call");

        let resp = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(serde_json::to_vec(&envelope)?)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            warn!(method, status = status.as_u16(), "Nerve JSON-RPC call rejected");
            return Err(NerveClientError::Http {
                kind: CallKind::Rpc,
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: RpcResponse = serde_json::from_str(&text)?;
        if let Some(resp_id) = parsed.id.as_ref().and_then(Value::as_u64) {
            if resp_id != id {
                debug!(sent = id, received = resp_id, "JSON-RPC response id mismatch");
            }
        }
        parsed.into_result()
    }

    /// Call a JSON-RPC method and deserialize `result` into `T`.
    pub async fn jsonrpc<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[Value],
    ) -> Result<T, NerveClientError> {
        let value = self.jsonrpc_value(method, params).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Issue a REST call. An empty 2xx body yields [`RestOutcome::NoContent`].
    pub async fn rest(&self, call: &RestCall) -> Result<RestOutcome, NerveClientError> {
        let url = rest_url(&self.base_url, &call.path);
        debug!(method = %call.method, %url, "Nerve REST call");

        let mut builder = self
            .http
            .request(call.method.into(), &url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(body) = call.wire_body() {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Nerve REST call rejected");
            return Err(NerveClientError::Http {
                kind: CallKind::Rest,
                status: status.as_u16(),
                body: text,
            });
        }

        if text.is_empty() {
            return Ok(RestOutcome::NoContent);
        }
        Ok(RestOutcome::Json(serde_json::from_str(&text)?))
    }
}

/// Join a REST path onto the base with exactly one slash, dropping any
/// `:null` left behind by an unfilled path placeholder.
pub fn rest_url(base: &str, path: &str) -> String {
    let path = path.trim_start_matches('/').replace(":null", "");
    format!("{}/{}", base.trim_end_matches('/'), path)
}
