use serde::{Deserialize, Serialize};

/// A transfer intent. Immutable once built; it sits in the pending pool
/// until a mined block seals it.
///
/// Field order matters: the block hash preimage serializes transactions as
/// JSON, so `sender`, `recipient`, `amount` must stay in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

impl Transaction {
    pub fn new(sender: String, recipient: String, amount: u64) -> Self {
        Self {
            sender,
            recipient,
            amount,
        }
    }
}
