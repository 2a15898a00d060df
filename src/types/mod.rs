//! Wire data model for zkSync RPC requests and responses.

pub mod block;
pub mod log;
pub mod transaction;
pub mod zks;

// Re-export main types
pub use block::{Block, BlockHeader, BlockNumber};
pub use log::{FilterQuery, Log};
pub use transaction::{
    Eip712Meta, L2ToL1Log, PaymasterParams, Transaction, TransactionReceipt, TransactionResponse,
};
pub use zks::{BlockDetails, BridgeContracts, Fee, L2ToL1MessageProof, Token};
