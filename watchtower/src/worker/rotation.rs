use alloy::primitives::Address;
use watchtower_chain_client_interface::OracleMember;

/// Index of the member whose turn it is at `block`, `None` when nobody can be selected.
pub fn selected_index(block: u64, blocks_per_turn: u64, member_count: u64) -> Option<u64> {
    if blocks_per_turn == 0 || member_count == 0 {
        return None;
    }
    Some((block / blocks_per_turn) % member_count)
}

pub fn is_my_turn(self_index: u64, block: u64, blocks_per_turn: u64, member_count: u64) -> bool {
    selected_index(block, blocks_per_turn, member_count) == Some(self_index)
}

/// Position of `address` in the member list.
pub fn member_index(members: &[OracleMember], address: Address) -> Option<u64> {
    members.iter().position(|member| member.address == address).map(|index| index as u64)
}
