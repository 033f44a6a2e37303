use alloy::transports::{RpcError, TransportErrorKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EthereumClientError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError<TransportErrorKind>),

    #[error("Contract call failed: {0}")]
    Contract(#[from] alloy::contract::Error),

    #[error("Pending transaction error: {0}")]
    PendingTransaction(#[from] alloy::providers::PendingTransactionError),

    #[error("Block {0} not found")]
    BlockNotFound(u64),

    #[error("Transaction {0} reverted")]
    Reverted(String),

    #[error("Value {value} of {field} does not fit in {target}")]
    Overflow { field: &'static str, value: String, target: &'static str },

    #[error("Contract {0} is not deployed")]
    MissingContract(&'static str),
}
