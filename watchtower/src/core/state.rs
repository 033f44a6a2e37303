use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tracing::debug;
use watchtower_chain_client_interface::{BeaconClient, ExecutionClient, NetworkState};

/// Reads a fresh [`NetworkState`] pinned to the latest execution block.
pub async fn load_network_state(execution: &dyn ExecutionClient, beacon: &dyn BeaconClient) -> Result<NetworkState> {
    let beacon_config = beacon.get_eth2_config().await.wrap_err("Failed to get beacon config")?;
    let head = beacon.get_beacon_head().await.wrap_err("Failed to get beacon head")?;
    let el_block_number = execution.latest_block_number().await.wrap_err("Failed to get latest block number")?;

    let (reward_interval, price_settings, oracle_members) = tokio::try_join!(
        execution.reward_interval(el_block_number),
        execution.price_settings(el_block_number),
        execution.oracle_members(el_block_number),
    )
    .wrap_err_with(|| format!("Failed to read network contracts at block {}", el_block_number))?;

    debug!(
        el_block_number,
        beacon_slot = head.slot,
        reward_index = reward_interval.index,
        oracle_members = oracle_members.len(),
        "Loaded network state"
    );

    Ok(NetworkState {
        el_block_number,
        beacon_slot_number: head.slot,
        beacon_config,
        reward_interval,
        price_settings,
        oracle_members,
    })
}
