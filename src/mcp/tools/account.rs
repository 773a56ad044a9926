// Account and balance queries.

use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};

use super::{
    address_param, call_rpc, chain_id_param, Arguments, ParamKind, ParamSpec, ToolDescriptor,
    ToolOutput, ToolResult,
};
use crate::blockchain::NerveClient;

pub fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "nerve_validate_address",
            description: "Validate if a Nerve address is correct for the given chain",
            params: vec![chain_id_param(), address_param()],
            handler: validate_address,
        },
        ToolDescriptor {
            name: "nerve_get_account_balance",
            description: "Query account balance for a specific asset (chainId, assetChainId, assetId, address)",
            params: vec![
                chain_id_param(),
                ParamSpec::required("assetChainId", ParamKind::Integer, "Asset chain ID"),
                ParamSpec::required("assetId", ParamKind::Integer, "Asset ID"),
                address_param(),
            ],
            handler: get_account_balance,
        },
        ToolDescriptor {
            name: "nerve_get_balance_list",
            description: "Query balance list for an address and optional asset IDs",
            params: vec![
                chain_id_param(),
                address_param(),
                ParamSpec::optional(
                    "assetIdList",
                    ParamKind::IntegerArray,
                    "Optional list of asset IDs; omit for all",
                ),
            ],
            handler: get_balance_list,
        },
    ]
}

/// A rejected address is a normal `false` result, not a failure. A null
/// result is passed on as `{"valid": null}`.
fn validate_address(client: &NerveClient, args: Arguments) -> BoxFuture<'_, ToolResult> {
    async move {
        let params = vec![args.value("chainId")?, args.value("address")?];
        let valid: Option<bool> = client.jsonrpc("validateAddress", &params).await?;
        Ok(ToolOutput::Value(json!({ "valid": valid })))
    }
    .boxed()
}

fn get_account_balance(client: &NerveClient, args: Arguments) -> BoxFuture<'_, ToolResult> {
    async move {
        let params = vec![
            args.value("chainId")?,
            args.value("assetChainId")?,
            args.value("assetId")?,
            args.value("address")?,
        ];
        call_rpc(client, "getAccountBalance", params).await
    }
    .boxed()
}

fn get_balance_list(client: &NerveClient, args: Arguments) -> BoxFuture<'_, ToolResult> {
    async move {
        let asset_ids = args
            .get("assetIdList")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        let params = vec![args.value("chainId")?, args.value("address")?, asset_ids];
        call_rpc(client, "getBalanceList", params).await
    }
    .boxed()
}
