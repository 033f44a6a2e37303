use color_eyre::eyre::eyre;
use mockall::predicate::eq;
use watchtower_chain_client_interface::{
    BeaconHead, MockBeaconClient, MockExecutionClient, PriceSettings, RewardInterval,
};

use crate::core::state::load_network_state;
use crate::tests::common::constants::*;
use crate::tests::common::{member, BEACON_CONFIG};

fn beacon() -> MockBeaconClient {
    let mut beacon = MockBeaconClient::new();
    beacon.expect_get_eth2_config().times(1).returning(|| Ok(BEACON_CONFIG));
    beacon
        .expect_get_beacon_head()
        .times(1)
        .returning(|| Ok(BeaconHead { slot: SLOT_AFTER_ONE_INTERVAL, epoch: 21, finalized_epoch: 19 }));
    beacon
}

#[tokio::test]
async fn contract_reads_are_pinned_to_the_latest_block() {
    let mut execution = MockExecutionClient::new();
    execution.expect_latest_block_number().times(1).returning(|| Ok(EL_BLOCK_NUMBER));
    execution.expect_reward_interval().with(eq(EL_BLOCK_NUMBER)).times(1).returning(|_| {
        Ok(RewardInterval { index: REWARD_INDEX, start_time: INTERVAL_START, duration: INTERVAL_DURATION })
    });
    execution.expect_price_settings().with(eq(EL_BLOCK_NUMBER)).times(1).returning(|_| {
        Ok(PriceSettings { submit_prices_enabled: true, prices_block: 1, latest_reportable_block: 2 })
    });
    execution
        .expect_oracle_members()
        .with(eq(EL_BLOCK_NUMBER))
        .times(1)
        .returning(|_| Ok(vec![member(NODE_ADDRESS), member(OTHER_MEMBER_ADDRESS)]));

    let state = load_network_state(&execution, &beacon()).await.unwrap();

    assert_eq!(state.el_block_number, EL_BLOCK_NUMBER);
    assert_eq!(state.beacon_slot_number, SLOT_AFTER_ONE_INTERVAL);
    assert_eq!(state.beacon_config, BEACON_CONFIG);
    assert_eq!(state.reward_interval.index, REWARD_INDEX);
    assert!(state.price_settings.submit_prices_enabled);
    assert!(state.is_oracle_member(OTHER_MEMBER_ADDRESS));
}

#[tokio::test]
async fn contract_read_failure_names_the_block() {
    let mut execution = MockExecutionClient::new();
    execution.expect_latest_block_number().returning(|| Ok(EL_BLOCK_NUMBER));
    execution.expect_reward_interval().returning(|_| Err(eyre!("execution reverted")));
    execution.expect_price_settings().returning(|_| Ok(PriceSettings::default()));
    execution.expect_oracle_members().returning(|_| Ok(Vec::new()));

    let err = load_network_state(&execution, &beacon()).await.unwrap_err();

    assert!(err.to_string().contains(&EL_BLOCK_NUMBER.to_string()));
    assert!(format!("{:?}", err).contains("execution reverted"));
}
