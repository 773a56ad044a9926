// Unrestricted forwarding of JSON-RPC methods and REST paths, for the parts of
// the Nerve API that have no dedicated tool. Method names and paths are passed
// through as given.

use futures::future::{BoxFuture, FutureExt};
use serde_json::json;

use super::{call_rpc, Arguments, ParamKind, ParamSpec, ToolDescriptor, ToolError, ToolOutput, ToolResult};
use crate::blockchain::{NerveClient, RestCall, RestMethod, RestOutcome};

pub const REST_METHODS: &[&str] = &["GET", "POST", "PUT"];

pub fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "nerve_jsonrpc",
            description: "Call any Nerve JSON-RPC method by name with params array. Use for methods not covered by dedicated tools (e.g. getRandomSeedByCount, getProposalInfo, swap/farm APIs).",
            params: vec![
                ParamSpec::required(
                    "method",
                    ParamKind::String,
                    "JSON-RPC method name (e.g. info, getTx, getSwapPairInfo)",
                ),
                ParamSpec::optional("params", ParamKind::AnyArray, "Array of positional parameters")
                    .with_default(json!([])),
            ],
            handler: jsonrpc,
        },
        ToolDescriptor {
            name: "nerve_rest",
            description: "Call Nerve REST API by path. Method GET by default; pass body for POST. Base URL is from NERVE_API_BASE_URL (default https://api.nerve.network). Example paths: api/info, api/block/header/height/1000, api/tx/{hash}",
            params: vec![
                ParamSpec::required(
                    "path",
                    ParamKind::String,
                    "REST path (e.g. api/info or api/block/height/123)",
                ),
                ParamSpec::optional("method", ParamKind::OneOf(REST_METHODS), "HTTP method")
                    .with_default(json!("GET")),
                ParamSpec::optional("body", ParamKind::Object, "JSON body for POST/PUT"),
            ],
            handler: rest,
        },
    ]
}

fn jsonrpc(client: &NerveClient, args: Arguments) -> BoxFuture<'_, ToolResult> {
    async move {
        let method = args.str("method")?.to_string();
        let params = args.array("params")?;
        call_rpc(client, &method, params).await
    }
    .boxed()
}

fn rest(client: &NerveClient, args: Arguments) -> BoxFuture<'_, ToolResult> {
    async move {
        let verb = args.str("method")?;
        let method = RestMethod::parse(verb).ok_or_else(|| ToolError::InvalidArgument {
            field: "method".into(),
            reason: format!("unsupported HTTP method {}", verb),
        })?;
        let mut call = RestCall::get(args.str("path")?).with_method(method);
        if let Some(body) = args.get("body") {
            call = call.with_body(body.clone());
        }
        match client.rest(&call).await? {
            RestOutcome::NoContent => Ok(ToolOutput::NoContent),
            RestOutcome::Json(value) => Ok(ToolOutput::Value(value)),
        }
    }
    .boxed()
}
