// Chain and network level queries.

use futures::future::{BoxFuture, FutureExt};

use super::{call_rpc, chain_id_param, Arguments, ToolDescriptor, ToolResult};
use crate::blockchain::NerveClient;

pub fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "nerve_info",
            description: "Get Nerve chain info (chainId, assetId, symbol, addressPrefix, consensus assets, etc.)",
            params: vec![],
            handler: info,
        },
        ToolDescriptor {
            name: "nerve_get_latest_height",
            description: "Get the latest main chain block height for a chain",
            params: vec![chain_id_param()],
            handler: get_latest_height,
        },
        ToolDescriptor {
            name: "nerve_get_best_block_header",
            description: "Get the latest block header (hash, height, txCount, packingAddress, etc.)",
            params: vec![chain_id_param()],
            handler: get_best_block_header,
        },
    ]
}

fn info(client: &NerveClient, _args: Arguments) -> BoxFuture<'_, ToolResult> {
    call_rpc(client, "info", Vec::new()).boxed()
}

// The height is a bare number, so it renders as plain text.
fn get_latest_height(client: &NerveClient, args: Arguments) -> BoxFuture<'_, ToolResult> {
    async move {
        let chain_id = args.value("chainId")?;
        call_rpc(client, "getLatestHeight", vec![chain_id]).await
    }
    .boxed()
}

fn get_best_block_header(client: &NerveClient, args: Arguments) -> BoxFuture<'_, ToolResult> {
    async move {
        let chain_id = args.value("chainId")?;
        call_rpc(client, "getBestBlockHeader", vec![chain_id]).await
    }
    .boxed()
}
