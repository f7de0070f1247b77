//! Unlock-condition / unlock-fulfillment authorization subsystem for a Rivine/Sia-lineage
//! UTXO transaction layer: the consensus-critical logic deciding whether a spender may consume
//! a transaction output, independent of the transaction type that carries it.

pub mod condition;
pub mod context;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod fulfillment;
pub mod hash;
pub mod keys;
pub mod merkle;
pub mod proxy;
pub mod registry;
pub mod sighash;
pub mod specifier;
pub mod unlock_hash;

pub use condition::{Condition, NilCondition};
pub use context::{FulfillContext, SigExtra, SignContext, SigHashInput, TransactionVersion};
pub use fulfillment::Fulfillment;
pub use proxy::{ConditionProxy, FulfillmentProxy};
pub use unlock_hash::{UnlockHash, UnlockHashType};
