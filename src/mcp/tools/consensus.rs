// Consensus node (agent) and delegation queries.

use futures::future::{BoxFuture, FutureExt};

use super::{call_rpc, chain_id_param, hash_param, Arguments, ToolDescriptor, ToolResult};
use crate::blockchain::NerveClient;

pub fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "nerve_get_agent_list",
            description: "Get list of consensus nodes (agents) for the chain",
            params: vec![chain_id_param()],
            handler: get_agent_list,
        },
        ToolDescriptor {
            name: "nerve_get_deposit_list",
            description: "Get delegation list for a consensus node (by agent creation tx hash)",
            params: vec![
                chain_id_param(),
                hash_param("agentHash", "Create consensus node transaction hash"),
            ],
            handler: get_deposit_list,
        },
    ]
}

fn get_agent_list(client: &NerveClient, args: Arguments) -> BoxFuture<'_, ToolResult> {
    async move {
        let chain_id = args.value("chainId")?;
        call_rpc(client, "getAgentList", vec![chain_id]).await
    }
    .boxed()
}

fn get_deposit_list(client: &NerveClient, args: Arguments) -> BoxFuture<'_, ToolResult> {
    async move {
        let params = vec![args.value("chainId")?, args.value("agentHash")?];
        call_rpc(client, "getDepositList", params).await
    }
    .boxed()
}
