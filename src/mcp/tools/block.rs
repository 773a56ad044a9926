// Block, header and transaction lookups.

use futures::future::{BoxFuture, FutureExt};

use super::{
    call_rpc, chain_id_param, hash_param, height_param, Arguments, ToolDescriptor, ToolResult,
};
use crate::blockchain::NerveClient;

pub fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "nerve_get_block_by_height",
            description: "Get block (header + transactions) by block height",
            params: vec![chain_id_param(), height_param()],
            handler: get_block_by_height,
        },
        ToolDescriptor {
            name: "nerve_get_block_by_hash",
            description: "Get block (header + transactions) by block hash",
            params: vec![chain_id_param(), hash_param("hash", "Block hash")],
            handler: get_block_by_hash,
        },
        ToolDescriptor {
            name: "nerve_get_header_by_height",
            description: "Get block header only by height",
            params: vec![chain_id_param(), height_param()],
            handler: get_header_by_height,
        },
        ToolDescriptor {
            name: "nerve_get_tx",
            description: "Get transaction by transaction hash",
            params: vec![chain_id_param(), hash_param("hash", "Transaction hash")],
            handler: get_tx,
        },
    ]
}

fn get_block_by_height(client: &NerveClient, args: Arguments) -> BoxFuture<'_, ToolResult> {
    async move {
        let params = vec![args.value("chainId")?, args.value("height")?];
        call_rpc(client, "getBlockByHeight", params).await
    }
    .boxed()
}

fn get_block_by_hash(client: &NerveClient, args: Arguments) -> BoxFuture<'_, ToolResult> {
    async move {
        let params = vec![args.value("chainId")?, args.value("hash")?];
        call_rpc(client, "getBlockByHash", params).await
    }
    .boxed()
}

fn get_header_by_height(client: &NerveClient, args: Arguments) -> BoxFuture<'_, ToolResult> {
    async move {
        let params = vec![args.value("chainId")?, args.value("height")?];
        call_rpc(client, "getHeaderByHeight", params).await
    }
    .boxed()
}

fn get_tx(client: &NerveClient, args: Arguments) -> BoxFuture<'_, ToolResult> {
    async move {
        let params = vec![args.value("chainId")?, args.value("hash")?];
        call_rpc(client, "getTx", params).await
    }
    .boxed()
}
