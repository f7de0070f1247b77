//! `MultiSignatureFulfillment`: an accumulating set of (pubkey, signature) pairs (§4.5).

use crate::context::{SigExtra, SigHashInput, SignContext};
use crate::encoding::{CodecError, Decodable, Encodable, ReadCodec, WriteCodec};
use crate::error::{SignError, StandardnessError};
use crate::hash::Signature;
use crate::keys::PublicKey;
use crate::sighash::digest_for_version;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiSignaturePair {
    pub pubkey: PublicKey,
    pub signature: Signature,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiSignatureFulfillment {
    pub pairs: Vec<MultiSignaturePair>,
}

impl MultiSignatureFulfillment {
    pub fn empty() -> Self { MultiSignatureFulfillment { pairs: Vec::new() } }

    pub fn is_standard(&self) -> Result<(), StandardnessError> {
        for pair in &self.pairs {
            pair.pubkey.strict_signature_check()?;
        }
        Ok(())
    }

    /// Multiset equality over pairs (§4.5).
    pub fn equal(&self, other: &MultiSignatureFulfillment) -> bool {
        if self.pairs.len() != other.pairs.len() {
            return false;
        }
        let mut ours: Vec<&MultiSignaturePair> = self.pairs.iter().collect();
        let mut theirs: Vec<&MultiSignaturePair> = other.pairs.iter().collect();
        let key = |p: &&MultiSignaturePair| (p.pubkey.to_string(), p.signature.to_hex());
        ours.sort_by_key(key);
        theirs.sort_by_key(key);
        ours.iter().zip(theirs.iter()).all(|(a, b)| a.pubkey == b.pubkey && a.signature == b.signature)
    }

    /// Signs as `ctx.public_key` and appends a new pair; repeated calls with distinct keys
    /// accumulate pairs until the condition's `min_sigs` is met (§4.5).
    pub fn sign<T: SigHashInput>(&mut self, ctx: &SignContext<T>) -> Result<(), SignError> {
        let digest = digest_for_version(ctx.transaction, ctx.transaction_version, &[SigExtra::PublicKey(ctx.public_key.clone())]);
        let signature = ctx.public_key.sign(ctx.private_key, &digest.0)?;
        self.pairs.push(MultiSignaturePair { pubkey: ctx.public_key.clone(), signature });
        Ok(())
    }
}

impl Encodable for MultiSignaturePair {
    fn encode<W: WriteCodec>(&self, w: &mut W) {
        self.pubkey.encode(w);
        self.signature.encode(w);
    }
}

impl Decodable for MultiSignaturePair {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> {
        Ok(MultiSignaturePair { pubkey: PublicKey::decode(r)?, signature: Signature::decode(r)? })
    }
}

impl Encodable for MultiSignatureFulfillment {
    fn encode<W: WriteCodec>(&self, w: &mut W) { w.write_vec(&self.pairs); }
}

impl Decodable for MultiSignatureFulfillment {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> {
        Ok(MultiSignatureFulfillment { pairs: r.read_vec::<MultiSignaturePair>()? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_is_order_insensitive() {
        let a = MultiSignaturePair { pubkey: PublicKey::new_ed25519([1; 32]).unwrap(), signature: Signature([1; 64]) };
        let b = MultiSignaturePair { pubkey: PublicKey::new_ed25519([2; 32]).unwrap(), signature: Signature([2; 64]) };
        let one = MultiSignatureFulfillment { pairs: vec![a.clone(), b.clone()] };
        let two = MultiSignatureFulfillment { pairs: vec![b, a] };
        assert!(one.equal(&two));
    }
}
