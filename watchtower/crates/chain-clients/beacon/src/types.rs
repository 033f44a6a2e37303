//! Response bodies of the standard beacon node REST API. Integers are sent as decimal strings.

use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

#[derive(Debug, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct GenesisData {
    #[serde_as(as = "DisplayFromStr")]
    pub genesis_time: u64,
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SpecData {
    #[serde_as(as = "DisplayFromStr")]
    pub seconds_per_slot: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub slots_per_epoch: u64,
}

#[derive(Debug, Deserialize)]
pub struct HeaderData {
    pub header: SignedHeader,
}

#[derive(Debug, Deserialize)]
pub struct SignedHeader {
    pub message: HeaderMessage,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct HeaderMessage {
    #[serde_as(as = "DisplayFromStr")]
    pub slot: u64,
}

#[derive(Debug, Deserialize)]
pub struct FinalityCheckpoints {
    pub finalized: Checkpoint,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct Checkpoint {
    #[serde_as(as = "DisplayFromStr")]
    pub epoch: u64,
}

#[derive(Debug, Deserialize)]
pub struct SignedBlock {
    pub message: BlockMessage,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct BlockMessage {
    #[serde_as(as = "DisplayFromStr")]
    pub slot: u64,
    pub body: BlockBody,
}

#[derive(Debug, Deserialize)]
pub struct BlockBody {
    /// Absent on pre-merge blocks.
    pub execution_payload: Option<ExecutionPayload>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ExecutionPayload {
    #[serde_as(as = "DisplayFromStr")]
    pub block_number: u64,
}
