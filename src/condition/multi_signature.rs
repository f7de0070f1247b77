//! `MultiSignatureCondition`: k-of-n spending condition with an order-insensitive address (§4.4.5).

use crate::context::{FulfillContext, SigExtra, SigHashInput};
use crate::encoding::{encode_codec_a, CodecError, Decodable, Encodable, ReadCodec, WriteCodec};
use crate::error::{FulfillError, StandardnessError};
use crate::fulfillment::MultiSignatureFulfillment;
use crate::hash::object_hash;
use crate::merkle::{leaf_hash, Accumulator};
use crate::sighash::digest_for_version;
use crate::unlock_hash::{UnlockHash, UnlockHashType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiSignatureCondition {
    #[serde(rename = "unlockhashes")]
    pub unlock_hashes: Vec<UnlockHash>,
    #[serde(rename = "minimumsignaturecount")]
    pub min_sigs: u64,
}

impl MultiSignatureCondition {
    pub fn is_standard(&self) -> Result<(), StandardnessError> {
        if self.unlock_hashes.len() < 2 {
            return Err(StandardnessError::TooFewUnlockHashes(self.unlock_hashes.len()));
        }
        if self.min_sigs < 1 || self.min_sigs > self.unlock_hashes.len() as u64 {
            return Err(StandardnessError::InvalidMinimumSignatureCount {
                max: self.unlock_hashes.len() as u64,
                found: self.min_sigs,
            });
        }
        for (i, uh) in self.unlock_hashes.iter().enumerate() {
            if uh.unlock_type != UnlockHashType::PubKey {
                return Err(StandardnessError::NonPubKeyUnlockHash(i));
            }
        }
        Ok(())
    }

    /// Order-insensitive multiset equality on `unlock_hashes`, plus equal `min_sigs` (§4.4.5).
    pub fn equal(&self, other: &MultiSignatureCondition) -> bool {
        if self.min_sigs != other.min_sigs || self.unlock_hashes.len() != other.unlock_hashes.len() {
            return false;
        }
        let mut ours = self.unlock_hashes.clone();
        let mut theirs = other.unlock_hashes.clone();
        ours.sort();
        theirs.sort();
        ours == theirs
    }

    /// Builds the Merkle-tree address: leaves bracket the sorted hashes between the
    /// low-entropy length and threshold fields, each hashed with the leaf prefix (§4.4.5).
    pub fn unlock_hash(&self) -> UnlockHash {
        let mut sorted = self.unlock_hashes.clone();
        sorted.sort();

        let mut acc = Accumulator::default();
        acc.add_leaf(leaf_hash(&encode_codec_a(&(self.unlock_hashes.len() as u64))));
        for uh in &sorted {
            acc.add_leaf(leaf_hash(&encode_codec_a(uh)));
        }
        acc.add_leaf(leaf_hash(&encode_codec_a(&self.min_sigs)));

        UnlockHash::new(UnlockHashType::MultiSig, acc.root())
    }

    /// §4.4.5: requires at least `min_sigs` pairs, each matching a distinct remaining declared
    /// hash, each with a valid signature.
    pub fn fulfill<T: SigHashInput>(&self, fulfillment: &MultiSignatureFulfillment, ctx: &FulfillContext<T>) -> Result<(), FulfillError> {
        let provided = fulfillment.pairs.len() as u64;
        if provided < self.min_sigs {
            return Err(FulfillError::InsufficientSignatures { needed: self.min_sigs, got: provided });
        }

        let mut remaining = self.unlock_hashes.clone();
        for pair in &fulfillment.pairs {
            let uh = UnlockHash::new(UnlockHashType::PubKey, object_hash(&pair.pubkey));
            let pos = remaining.iter().position(|h| *h == uh).ok_or(FulfillError::UnauthorizedPubKey)?;
            remaining.remove(pos);
        }

        for pair in &fulfillment.pairs {
            let digest = digest_for_version(ctx.transaction, ctx.transaction_version, &[SigExtra::PublicKey(pair.pubkey.clone())]);
            pair.pubkey.verify(&digest.0, &pair.signature)?;
        }
        Ok(())
    }
}

impl Encodable for MultiSignatureCondition {
    fn encode<W: WriteCodec>(&self, w: &mut W) {
        w.write_vec(&self.unlock_hashes);
        w.write_u64(self.min_sigs);
    }
}

impl Decodable for MultiSignatureCondition {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> {
        Ok(MultiSignatureCondition {
            unlock_hashes: r.read_vec::<UnlockHash>()?,
            min_sigs: r.read_u64()?,
        })
    }
}

/// Sanity helper for [`MultiSignatureCondition::equal`]: distinct-by-value hash count, used only
/// by tests to cross-check the sort-based implementation above.
#[cfg(test)]
fn multiset(hashes: &[UnlockHash]) -> HashSet<String> { hashes.iter().map(|h| h.to_string()).collect() }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Hash;

    fn hashes() -> Vec<UnlockHash> {
        vec![
            UnlockHash::new(UnlockHashType::PubKey, Hash([1; 32])),
            UnlockHash::new(UnlockHashType::PubKey, Hash([2; 32])),
        ]
    }

    #[test]
    fn unlock_hash_is_order_insensitive() {
        let a = MultiSignatureCondition { unlock_hashes: hashes(), min_sigs: 2 };
        let mut reversed = hashes();
        reversed.reverse();
        let b = MultiSignatureCondition { unlock_hashes: reversed, min_sigs: 2 };
        assert_eq!(a.unlock_hash(), b.unlock_hash());
        assert!(a.equal(&b));
        assert_eq!(multiset(&a.unlock_hashes), multiset(&b.unlock_hashes));
    }

    #[test]
    fn unlock_hash_differs_with_min_sigs() {
        let a = MultiSignatureCondition { unlock_hashes: hashes(), min_sigs: 2 };
        let b = MultiSignatureCondition { unlock_hashes: hashes(), min_sigs: 1 };
        assert_ne!(a.unlock_hash(), b.unlock_hash());
        assert!(!a.equal(&b));
    }

    #[test]
    fn too_few_hashes_is_not_standard() {
        let c = MultiSignatureCondition { unlock_hashes: vec![hashes()[0].clone()], min_sigs: 1 };
        assert!(matches!(c.is_standard(), Err(StandardnessError::TooFewUnlockHashes(1))));
    }

    #[test]
    fn zero_min_sigs_is_not_standard() {
        let c = MultiSignatureCondition { unlock_hashes: hashes(), min_sigs: 0 };
        assert!(matches!(c.is_standard(), Err(StandardnessError::InvalidMinimumSignatureCount { .. })));
    }
}
