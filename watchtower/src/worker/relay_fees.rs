use alloy::primitives::U256;
use watchtower_chain_client_interface::RelayCallParams;

const GWEI: u128 = 1_000_000_000;

/// Calldata size of an Arbitrum rate update retryable ticket, in bytes
const ARBITRUM_TICKET_BYTES: u128 = 1_400 + 6 * 36;
const ARBITRUM_SUBMISSION_COST_MULTIPLIER: u128 = 4;
pub const ARBITRUM_L2_GAS_LIMIT: u128 = 40_000;
/// 0.1 gwei
pub const ARBITRUM_L2_MAX_FEE_PER_GAS: u128 = GWEI / 10;

const ZKSYNC_PUBDATA_MULTIPLIER: u128 = 17;
pub const ZKSYNC_L2_GAS_LIMIT: u128 = 750_000;
pub const ZKSYNC_GAS_PER_PUBDATA_BYTE: u128 = 800;
/// 0.5 gwei
const ZKSYNC_MIN_L2_GAS_PRICE: u128 = GWEI / 2;

/// Retryable ticket parameters for the Arbitrum messenger, with the ETH value to attach.
pub fn arbitrum_params(max_fee_per_gas: u128) -> (RelayCallParams, U256) {
    let max_submission_cost =
        U256::from(ARBITRUM_TICKET_BYTES) * U256::from(max_fee_per_gas) * U256::from(ARBITRUM_SUBMISSION_COST_MULTIPLIER);
    let value = U256::from(ARBITRUM_L2_GAS_LIMIT * ARBITRUM_L2_MAX_FEE_PER_GAS) + max_submission_cost;

    let params = RelayCallParams::Arbitrum {
        max_submission_cost,
        gas_limit: U256::from(ARBITRUM_L2_GAS_LIMIT),
        max_fee_per_gas: U256::from(ARBITRUM_L2_MAX_FEE_PER_GAS),
    };
    (params, value)
}

/// L2 transaction parameters for the zkSync Era messenger, with the ETH value to attach.
pub fn zksync_era_params(max_fee_per_gas: u128) -> (RelayCallParams, U256) {
    let pubdata_price = U256::from(ZKSYNC_PUBDATA_MULTIPLIER) * U256::from(max_fee_per_gas);
    let min_l2_gas_price = pubdata_price.div_ceil(U256::from(ZKSYNC_GAS_PER_PUBDATA_BYTE));
    let gas_price = min_l2_gas_price.max(U256::from(ZKSYNC_MIN_L2_GAS_PRICE));
    let value = U256::from(ZKSYNC_L2_GAS_LIMIT) * gas_price;

    let params = RelayCallParams::ZkSyncEra {
        l2_gas_limit: U256::from(ZKSYNC_L2_GAS_LIMIT),
        l2_gas_per_pubdata_byte_limit: U256::from(ZKSYNC_GAS_PER_PUBDATA_BYTE),
    };
    (params, value)
}
