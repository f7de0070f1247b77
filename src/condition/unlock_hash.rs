//! `UnlockHashCondition`: spend to a single pre-committed address (§4.4.2).

use crate::condition::atomic_swap as condition_atomic_swap;
use crate::context::{FulfillContext, SigHashInput};
use crate::encoding::{CodecError, Decodable, Encodable, ReadCodec, WriteCodec};
use crate::error::{FulfillError, StandardnessError};
use crate::fulfillment::Fulfillment;
use crate::hash::object_hash;
use crate::sighash::digest_for_version;
use crate::unlock_hash::{UnlockHash, UnlockHashType};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockHashCondition {
    #[serde(rename = "unlockhash")]
    pub target: UnlockHash,
}

impl UnlockHashCondition {
    pub fn new(target: UnlockHash) -> Self { UnlockHashCondition { target } }

    pub fn is_standard(&self) -> Result<(), StandardnessError> {
        let type_ok = matches!(self.target.unlock_type, UnlockHashType::PubKey | UnlockHashType::AtomicSwap);
        if !type_ok || self.target.hash.is_zero() {
            return Err(StandardnessError::InvalidUnlockHashTarget);
        }
        Ok(())
    }

    /// §4.4.2: accepts a single signature against a PubKey target, or a legacy atomic-swap
    /// fulfillment against an AtomicSwap target (re-deriving the address from its embedded
    /// fields before delegating to the shared atomic-swap authorization rules).
    pub fn fulfill<T: SigHashInput>(&self, fulfillment: &Fulfillment, ctx: &FulfillContext<T>) -> Result<(), FulfillError> {
        match fulfillment {
            Fulfillment::SingleSignature(f) => {
                if self.target.unlock_type != UnlockHashType::PubKey {
                    return Err(FulfillError::UnexpectedUnlockType);
                }
                let expected = UnlockHash::new(UnlockHashType::PubKey, object_hash(&f.pubkey));
                if expected != self.target {
                    return Err(FulfillError::UnexpectedUnlockType);
                }
                let digest = digest_for_version(ctx.transaction, ctx.transaction_version, &[]);
                f.pubkey.verify(&digest.0, &f.signature)?;
                Ok(())
            }
            Fulfillment::LegacyAtomicSwap(f) => {
                if self.target.unlock_type != UnlockHashType::AtomicSwap {
                    return Err(FulfillError::UnexpectedUnlockType);
                }
                let expected = condition_atomic_swap::legacy_fields_unlock_hash(&f.sender, &f.receiver, &f.hashed_secret, f.time_lock);
                if expected != self.target {
                    return Err(FulfillError::UnexpectedUnlockType);
                }
                condition_atomic_swap::fulfill(&f.sender, &f.receiver, &f.hashed_secret, f.time_lock, &f.pubkey, &f.signature, &f.secret, ctx)
            }
            _ => Err(FulfillError::UnexpectedFulfillment),
        }
    }
}

impl Encodable for UnlockHashCondition {
    fn encode<W: WriteCodec>(&self, w: &mut W) { self.target.encode(w); }
}

impl Decodable for UnlockHashCondition {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> {
        Ok(UnlockHashCondition { target: UnlockHash::decode(r)? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Hash;

    #[test]
    fn zero_hash_target_is_not_standard() {
        let c = UnlockHashCondition::new(UnlockHash::new(UnlockHashType::PubKey, Hash::ZERO));
        assert!(matches!(c.is_standard(), Err(StandardnessError::InvalidUnlockHashTarget)));
    }

    #[test]
    fn multisig_type_target_is_not_standard() {
        let c = UnlockHashCondition::new(UnlockHash::new(UnlockHashType::MultiSig, Hash([1; 32])));
        assert!(matches!(c.is_standard(), Err(StandardnessError::InvalidUnlockHashTarget)));
    }

    #[test]
    fn pubkey_type_nonzero_hash_is_standard() {
        let c = UnlockHashCondition::new(UnlockHash::new(UnlockHashType::PubKey, Hash([1; 32])));
        assert!(c.is_standard().is_ok());
    }
}
