//! Shared context types threaded through signing and authorization (§4.8, §6).
//!
//! Transaction assembly is explicitly out of scope for this crate (§1); `SigHashInput` is the
//! seam at which a surrounding transaction-assembly layer plugs in. Anything that can produce a
//! deterministic preimage of "everything except per-input signatures" can be authorized or
//! signed against by this crate without it knowing what a transaction looks like.

use crate::encoding::{Encodable, WriteCodec};
use crate::hash::AtomicSwapSecret;
use crate::keys::PublicKey;

/// The opaque collaborator named in §4.8: `transaction_signature_preimage(tx)`. Deterministic
/// over the transaction's version, inputs-without-signatures, outputs, fees, arbitrary data, and
/// extension fields.
pub trait SigHashInput {
    fn signature_preimage(&self) -> Vec<u8>;
}

/// Selects which of the two historically-distinct signature-hash constructions applies
/// (§9 open question 3). The legacy construction hashes unlock-hashes of fulfillments rather
/// than the fulfillments themselves and uses a different field ordering; this crate never merges
/// the two, it only shares the "preimage || extras" composition step (see [`crate::sighash`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionVersion {
    Legacy,
    Current,
}

/// A value appended to the signed digest beyond the transaction preimage itself. Each
/// fulfillment variant decides what it appends (§4.4/§4.5): e.g. an atomic-swap claim appends
/// `[pubkey, secret]`, a refund appends `[pubkey]`.
#[derive(Clone, Debug, PartialEq)]
pub enum SigExtra {
    PublicKey(PublicKey),
    Secret(AtomicSwapSecret),
}

impl Encodable for SigExtra {
    fn encode<W: WriteCodec>(&self, w: &mut W) {
        match self {
            SigExtra::PublicKey(pk) => pk.encode(w),
            SigExtra::Secret(secret) => w.write_raw(&secret.0),
        }
    }
}

/// Context for [`crate::engine::fulfill`]: pairs a condition with a fulfillment and decides
/// whether the spend is authorized.
pub struct FulfillContext<'a, T: SigHashInput> {
    pub transaction: &'a T,
    pub transaction_version: TransactionVersion,
    pub block_height: u64,
    pub block_time: u64,
}

/// Context for `Fulfillment::sign`. `public_key` names which identity is signing: for
/// single-signature and atomic-swap fulfillments it must match the fulfillment's own embedded
/// `pubkey` field; for `MultiSignatureFulfillment` it is the key being appended as a new pair
/// (§4.5, "ctx.key is a (pubkey, private_key) pair").
pub struct SignContext<'a, T: SigHashInput> {
    pub transaction: &'a T,
    pub transaction_version: TransactionVersion,
    pub public_key: PublicKey,
    /// ed25519: 64 bytes, seed || public half (§4.2).
    pub private_key: &'a [u8],
}
