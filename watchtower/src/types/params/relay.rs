use alloy::primitives::Address;
use watchtower_chain_client_interface::RelayTarget;

use super::parse_address;
use crate::cli::relay::RelayCliArgs;
use crate::WatchtowerError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayParams {
    /// Configured messengers, in a fixed target order.
    pub messengers: Vec<(RelayTarget, Address)>,
}

impl TryFrom<RelayCliArgs> for RelayParams {
    type Error = WatchtowerError;
    fn try_from(args: RelayCliArgs) -> Result<Self, Self::Error> {
        let configured = [
            (RelayTarget::Optimism, args.optimism_messenger_address),
            (RelayTarget::Polygon, args.polygon_messenger_address),
            (RelayTarget::Arbitrum, args.arbitrum_messenger_address),
            (RelayTarget::ZkSyncEra, args.zksync_era_messenger_address),
            (RelayTarget::Base, args.base_messenger_address),
        ];

        let mut messengers = Vec::new();
        for (target, address) in configured {
            if let Some(address) = address.filter(|a| !a.trim().is_empty()) {
                messengers.push((target, parse_address(&format!("{} messenger address", target), &address)?));
            }
        }
        Ok(Self { messengers })
    }
}
