//! `AtomicSwapCondition`: a hash-time-locked contract between two parties (§4.4.3).

use crate::context::{FulfillContext, SigExtra, SigHashInput};
use crate::encoding::{CodecError, Decodable, Encodable, ReadCodec, WriteCodec};
use crate::error::{FulfillError, StandardnessError};
use crate::fulfillment::Fulfillment;
use crate::hash::{object_hash, sha256, AtomicSwapSecret, Hash, Signature};
use crate::keys::PublicKey;
use crate::sighash::digest_for_version;
use crate::unlock_hash::{UnlockHash, UnlockHashType};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomicSwapCondition {
    pub sender: UnlockHash,
    pub receiver: UnlockHash,
    #[serde(rename = "hashedsecret")]
    pub hashed_secret: Hash,
    #[serde(rename = "timelock")]
    pub time_lock: u64,
}

impl AtomicSwapCondition {
    pub fn is_standard(&self) -> Result<(), StandardnessError> {
        if self.sender.unlock_type != UnlockHashType::PubKey || self.receiver.unlock_type != UnlockHashType::PubKey {
            return Err(StandardnessError::AtomicSwapPartyNotPubKey);
        }
        if self.sender.hash.is_zero() || self.receiver.hash.is_zero() || self.hashed_secret.is_zero() {
            return Err(StandardnessError::AtomicSwapZeroField);
        }
        Ok(())
    }

    /// `UnlockHash{AtomicSwap, HASH(marshal_codecA(sender, receiver, hashed_secret, time_lock))}`.
    pub fn unlock_hash(&self) -> UnlockHash {
        UnlockHash::new(UnlockHashType::AtomicSwap, object_hash(self))
    }

    pub fn fulfill<T: SigHashInput>(&self, fulfillment: &Fulfillment, ctx: &FulfillContext<T>) -> Result<(), FulfillError> {
        match fulfillment {
            Fulfillment::AtomicSwap(f) => {
                fulfill(&self.sender, &self.receiver, &self.hashed_secret, self.time_lock, &f.pubkey, &f.signature, &f.secret, ctx)
            }
            Fulfillment::LegacyAtomicSwap(f) => {
                if f.sender != self.sender
                    || f.receiver != self.receiver
                    || f.hashed_secret != self.hashed_secret
                    || f.time_lock != self.time_lock
                {
                    return Err(FulfillError::UnexpectedUnlockType);
                }
                fulfill(&self.sender, &self.receiver, &self.hashed_secret, self.time_lock, &f.pubkey, &f.signature, &f.secret, ctx)
            }
            _ => Err(FulfillError::UnexpectedFulfillment),
        }
    }
}

/// The shared atomic-swap authorization rule (§4.4.3), used both by `AtomicSwapCondition` and by
/// `UnlockHashCondition` wrapping a legacy fulfillment once its embedded fields have re-derived
/// a matching address.
#[allow(clippy::too_many_arguments)]
pub fn fulfill<T: SigHashInput>(
    sender: &UnlockHash,
    receiver: &UnlockHash,
    hashed_secret: &Hash,
    time_lock: u64,
    pubkey: &PublicKey,
    signature: &Signature,
    secret: &AtomicSwapSecret,
    ctx: &FulfillContext<T>,
) -> Result<(), FulfillError> {
    let fulfiller_uh = UnlockHash::new(UnlockHashType::PubKey, object_hash(pubkey));

    if !secret.is_zero() {
        if fulfiller_uh != *receiver {
            return Err(FulfillError::InvalidRedeemer);
        }
        if sha256(&secret.0) != *hashed_secret {
            return Err(FulfillError::InvalidPreImage);
        }
        let digest = digest_for_version(
            ctx.transaction,
            ctx.transaction_version,
            &[SigExtra::PublicKey(pubkey.clone()), SigExtra::Secret(secret.clone())],
        );
        pubkey.verify(&digest.0, signature)?;
        Ok(())
    } else {
        if ctx.block_time <= time_lock {
            return Err(FulfillError::PrematureRefund);
        }
        if fulfiller_uh != *sender {
            return Err(FulfillError::InvalidRedeemer);
        }
        let digest = digest_for_version(ctx.transaction, ctx.transaction_version, &[SigExtra::PublicKey(pubkey.clone())]);
        pubkey.verify(&digest.0, signature)?;
        Ok(())
    }
}

impl Encodable for AtomicSwapCondition {
    fn encode<W: WriteCodec>(&self, w: &mut W) {
        self.sender.encode(w);
        self.receiver.encode(w);
        self.hashed_secret.encode(w);
        w.write_u64(self.time_lock);
    }
}

impl Decodable for AtomicSwapCondition {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> {
        Ok(AtomicSwapCondition {
            sender: UnlockHash::decode(r)?,
            receiver: UnlockHash::decode(r)?,
            hashed_secret: Hash::decode(r)?,
            time_lock: r.read_u64()?,
        })
    }
}

/// Re-derives the condition's address from the four fields embedded in a legacy atomic-swap
/// fulfillment, without constructing an intermediate `AtomicSwapCondition` (§4.4.2 legacy path).
pub fn legacy_fields_unlock_hash(sender: &UnlockHash, receiver: &UnlockHash, hashed_secret: &Hash, time_lock: u64) -> UnlockHash {
    let condition = AtomicSwapCondition {
        sender: sender.clone(),
        receiver: receiver.clone(),
        hashed_secret: *hashed_secret,
        time_lock,
    };
    condition.unlock_hash()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256;

    fn sample() -> AtomicSwapCondition {
        AtomicSwapCondition {
            sender: UnlockHash::new(UnlockHashType::PubKey, Hash([1; 32])),
            receiver: UnlockHash::new(UnlockHashType::PubKey, Hash([2; 32])),
            hashed_secret: sha256(b"s"),
            time_lock: 12345,
        }
    }

    #[test]
    fn is_standard_rejects_zero_sender() {
        let mut c = sample();
        c.sender.hash = Hash::ZERO;
        assert!(matches!(c.is_standard(), Err(StandardnessError::AtomicSwapZeroField)));
    }

    #[test]
    fn unlock_hash_is_deterministic() {
        let c = sample();
        assert_eq!(c.unlock_hash(), c.unlock_hash());
        assert_eq!(c.unlock_hash().unlock_type, UnlockHashType::AtomicSwap);
    }

    #[test]
    fn legacy_fields_match_condition_address() {
        let c = sample();
        let uh = legacy_fields_unlock_hash(&c.sender, &c.receiver, &c.hashed_secret, c.time_lock);
        assert_eq!(uh, c.unlock_hash());
    }
}
