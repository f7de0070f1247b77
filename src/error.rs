//! The authorization/signing/standardness error families from §7.
//!
//! Structural decode errors live beside the type they belong to (`HashError`, `KeyError`,
//! `UnlockHashError`, `CodecError`, and the per-variant JSON dispatch errors in
//! `fulfillment::atomic_swap`/`proxy`); this module holds the families that cut across variants.

use crate::keys::KeyError;
use thiserror::Error;

/// Errors raised while pairing a condition with a fulfillment ([`crate::engine::fulfill`]).
#[derive(Debug, Error)]
pub enum FulfillError {
    #[error("unexpected fulfillment type for this condition")]
    UnexpectedFulfillment,
    #[error("fulfillment's derived unlock hash does not match the condition's target")]
    UnexpectedUnlockType,
    #[error("invalid redeemer")]
    InvalidRedeemer,
    #[error("invalid atomic-swap pre-image")]
    InvalidPreImage,
    #[error("premature refund: block time has not passed the atomic-swap time lock")]
    PrematureRefund,
    #[error("insufficient signatures: need {needed}, got {got}")]
    InsufficientSignatures { needed: u64, got: u64 },
    #[error("signature from a public key not present in the multisig unlock-hash set")]
    UnauthorizedPubKey,
    #[error("time lock not reached")]
    TimeLockNotReached,
    #[error("unknown condition or fulfillment cannot be fulfilled")]
    UnknownVariant,
    #[error(transparent)]
    Signature(#[from] KeyError),
}

/// Errors raised while filling in a fulfillment's signature ([`crate::fulfillment::Fulfillment::sign`]).
#[derive(Debug, Error)]
pub enum SignError {
    #[error("fulfillment has already been signed")]
    FulfillmentDoubleSign,
    #[error("nil fulfillment cannot be signed")]
    NilFulfillment,
    #[error("unknown fulfillment cannot be signed")]
    UnknownFulfillment,
    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Structural decode errors specific to the JSON proxy envelope (§7). Binary decode errors of
/// the same shape are [`crate::encoding::CodecError`] instead — JSON and binary disagree on how
/// an unrecognized variant tag is handled (§4.6), so this family only applies to JSON.
#[derive(Debug, Error)]
pub enum StructuralError {
    #[error("unknown condition type {0} in JSON")]
    UnknownConditionType(u8),
    #[error("unknown fulfillment type {0} in JSON")]
    UnknownFulfillmentType(u8),
    #[error("atomic-swap fulfillment has a partial set of legacy fields")]
    PartialLegacyFields,
}

/// Errors raised by `is_standard()`. Non-fatal at the P2P layer; fatal at block inclusion (§7).
#[derive(Debug, Error)]
pub enum StandardnessError {
    #[error("nil condition/fulfillment is never standard on its own")]
    Nil,
    #[error("unknown condition/fulfillment is never standard")]
    Unknown,
    #[error("target unlock hash must be a public-key or atomic-swap hash and non-zero")]
    InvalidUnlockHashTarget,
    #[error("atomic-swap sender/receiver unlock hashes must have type PubKey")]
    AtomicSwapPartyNotPubKey,
    #[error("atomic-swap sender/receiver/hashed-secret must be non-zero")]
    AtomicSwapZeroField,
    #[error("time lock's lock_time must be greater than zero")]
    ZeroLockTime,
    #[error("time lock cannot wrap a TimeLock or AtomicSwap condition")]
    NestedTimeLockOrAtomicSwap,
    #[error("time lock's inner condition is not itself standard")]
    NonStandardInnerCondition,
    #[error("multisig requires at least 2 unlock hashes, found {0}")]
    TooFewUnlockHashes(usize),
    #[error("multisig minimum signature count must be in [1, {max}], found {found}")]
    InvalidMinimumSignatureCount { max: u64, found: u64 },
    #[error("multisig unlock hash #{0} does not have type PubKey")]
    NonPubKeyUnlockHash(usize),
    #[error(transparent)]
    Key(#[from] KeyError),
}
