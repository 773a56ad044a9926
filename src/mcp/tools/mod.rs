//! # Tool registry
//!
//! The fixed catalog of Nerve tools exposed to the host. Every tool is a
//! [`ToolDescriptor`]: a stable name, a description, the declared input shape
//! and a handler that turns validated arguments into exactly one call on the
//! [`NerveClient`].
//!
//! ## Catalog
//!
//! ### Chain & network
//! - `nerve_info`, `nerve_get_latest_height`, `nerve_get_best_block_header`
//!
//! ### Accounts
//! - `nerve_validate_address`, `nerve_get_account_balance`, `nerve_get_balance_list`
//!
//! ### Blocks & transactions
//! - `nerve_get_block_by_height`, `nerve_get_block_by_hash`,
//!   `nerve_get_header_by_height`, `nerve_get_tx`
//!
//! ### Consensus
//! - `nerve_get_agent_list`, `nerve_get_deposit_list`
//!
//! ### Pass-through
//! - `nerve_jsonrpc` - any JSON-RPC method with positional params
//! - `nerve_rest` - any REST path

use std::collections::HashMap;

use futures::future::BoxFuture;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::blockchain::{NerveClient, NerveClientError};
use crate::mcp::protocol::ToolDefinition;

pub mod account;
pub mod block;
pub mod chain;
pub mod consensus;
pub mod format;
pub mod passthrough;
pub mod schema;

pub use schema::{Arguments, ParamKind, ParamSpec};

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Invalid argument '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },
    #[error(transparent)]
    Client(#[from] NerveClientError),
}

/// What a handler produced, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Value(Value),
    /// The remote answered successfully with an empty body.
    NoContent,
}

pub type ToolResult = Result<ToolOutput, ToolError>;

pub type ToolHandler = for<'a> fn(&'a NerveClient, Arguments) -> BoxFuture<'a, ToolResult>;

pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
    pub handler: ToolHandler,
}

impl ToolDescriptor {
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: schema::object_schema(&self.params),
        }
    }
}

/// Immutable after construction; tools are listed in registration order.
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    by_name: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// The full Nerve catalog.
    pub fn nerve() -> Self {
        let tools = [
            chain::tools(),
            account::tools(),
            block::tools(),
            consensus::tools(),
            passthrough::tools(),
        ]
        .into_iter()
        .flatten()
        .collect();
        Self::from_tools(tools)
    }

    /// Later duplicates of a name are dropped.
    pub fn from_tools(tools: Vec<ToolDescriptor>) -> Self {
        let mut registry = Self {
            tools: Vec::with_capacity(tools.len()),
            by_name: HashMap::new(),
        };
        for tool in tools {
            if registry.by_name.contains_key(tool.name) {
                tracing::warn!(tool = tool.name, "duplicate tool name ignored");
                continue;
            }
            registry.by_name.insert(tool.name, registry.tools.len());
            registry.tools.push(tool);
        }
        registry
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.by_name.get(name).map(|&i| &self.tools[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(ToolDescriptor::definition).collect()
    }

    /// Look the tool up, validate `arguments` against it and run its handler.
    pub async fn dispatch(
        &self,
        client: &NerveClient,
        name: &str,
        arguments: Option<&Value>,
    ) -> ToolResult {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let args = schema::validate(&tool.params, arguments)?;
        info!(tool = name, "Dispatching tool call");
        (tool.handler)(client, args).await
    }
}

/// Shared body of the handlers that map straight onto one JSON-RPC method.
pub(crate) async fn call_rpc(client: &NerveClient, method: &str, params: Vec<Value>) -> ToolResult {
    Ok(ToolOutput::Value(client.jsonrpc_value(method, &params).await?))
}

// Common parameter declarations.

pub(crate) fn chain_id_param() -> ParamSpec {
    ParamSpec::required(
        "chainId",
        ParamKind::PositiveInteger,
        "Nerve chain ID (e.g. 9 for mainnet)",
    )
}

pub(crate) fn address_param() -> ParamSpec {
    ParamSpec::required("address", ParamKind::String, "Nerve address")
}

pub(crate) fn hash_param(name: &'static str, description: &'static str) -> ParamSpec {
    ParamSpec::required(name, ParamKind::String, description)
}

pub(crate) fn height_param() -> ParamSpec {
    ParamSpec::required("height", ParamKind::NonNegativeInteger, "Block height")
}
