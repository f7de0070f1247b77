//! `AtomicSwapFulfillment` and its legacy superset, plus the tag=2 dispatch (§4.5, §4.5.1).

use crate::context::{SigExtra, SigHashInput, SignContext};
use crate::encoding::{CodecError, Decodable, Encodable, ReadCodec, WriteCodec};
use crate::error::{SignError, StandardnessError, StructuralError};
use crate::hash::{AtomicSwapSecret, Hash, Signature};
use crate::keys::PublicKey;
use crate::sighash::digest_for_version;
use crate::unlock_hash::UnlockHash;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AtomicSwapFulfillment {
    pub pubkey: PublicKey,
    pub signature: Signature,
    pub secret: AtomicSwapSecret,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegacyAtomicSwapFulfillment {
    pub sender: UnlockHash,
    pub receiver: UnlockHash,
    #[serde(rename = "hashedsecret")]
    pub hashed_secret: Hash,
    #[serde(rename = "timelock")]
    pub time_lock: u64,
    pub pubkey: PublicKey,
    pub signature: Signature,
    pub secret: AtomicSwapSecret,
}

fn sign_extras(pubkey: &PublicKey, secret: &AtomicSwapSecret) -> Vec<SigExtra> {
    if secret.is_zero() {
        vec![SigExtra::PublicKey(pubkey.clone())]
    } else {
        vec![SigExtra::PublicKey(pubkey.clone()), SigExtra::Secret(secret.clone())]
    }
}

impl AtomicSwapFulfillment {
    pub fn is_standard(&self) -> Result<(), StandardnessError> {
        self.pubkey.strict_signature_check()?;
        Ok(())
    }

    pub fn sign<T: SigHashInput>(&mut self, ctx: &SignContext<T>) -> Result<(), SignError> {
        let digest = digest_for_version(ctx.transaction, ctx.transaction_version, &sign_extras(&self.pubkey, &self.secret));
        self.signature = self.pubkey.sign(ctx.private_key, &digest.0)?;
        Ok(())
    }
}

impl LegacyAtomicSwapFulfillment {
    pub fn is_standard(&self) -> Result<(), StandardnessError> {
        self.pubkey.strict_signature_check()?;
        Ok(())
    }

    pub fn sign<T: SigHashInput>(&mut self, ctx: &SignContext<T>) -> Result<(), SignError> {
        let digest = digest_for_version(ctx.transaction, ctx.transaction_version, &sign_extras(&self.pubkey, &self.secret));
        self.signature = self.pubkey.sign(ctx.private_key, &digest.0)?;
        Ok(())
    }
}

impl Encodable for AtomicSwapFulfillment {
    fn encode<W: WriteCodec>(&self, w: &mut W) {
        self.pubkey.encode(w);
        self.signature.encode(w);
        self.secret.encode(w);
    }
}

impl Decodable for AtomicSwapFulfillment {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> {
        Ok(AtomicSwapFulfillment {
            pubkey: PublicKey::decode(r)?,
            signature: Signature::decode(r)?,
            secret: AtomicSwapSecret::decode(r)?,
        })
    }
}

impl Encodable for LegacyAtomicSwapFulfillment {
    fn encode<W: WriteCodec>(&self, w: &mut W) {
        self.sender.encode(w);
        self.receiver.encode(w);
        self.hashed_secret.encode(w);
        w.write_u64(self.time_lock);
        self.pubkey.encode(w);
        self.signature.encode(w);
        self.secret.encode(w);
    }
}

impl Decodable for LegacyAtomicSwapFulfillment {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> {
        Ok(LegacyAtomicSwapFulfillment {
            sender: UnlockHash::decode(r)?,
            receiver: UnlockHash::decode(r)?,
            hashed_secret: Hash::decode(r)?,
            time_lock: r.read_u64()?,
            pubkey: PublicKey::decode(r)?,
            signature: Signature::decode(r)?,
            secret: AtomicSwapSecret::decode(r)?,
        })
    }
}

pub enum AtomicSwapVariant {
    Current(AtomicSwapFulfillment),
    Legacy(LegacyAtomicSwapFulfillment),
}

/// Binary dispatch (§4.5.1): try the 3-field current layout first; if decoding it does not
/// consume the whole payload, fall back to the 7-field legacy layout. Both codecs are
/// self-delimiting, so there is no ambiguity once the payload is fully scoped.
pub fn unmarshal_binary<'a, R: ReadCodec<'a>>(payload: &'a [u8]) -> Result<AtomicSwapVariant, CodecError> {
    let mut current_reader = R::from_bytes(payload);
    if let Ok(current) = AtomicSwapFulfillment::decode(&mut current_reader) {
        if current_reader.finish().is_ok() {
            return Ok(AtomicSwapVariant::Current(current));
        }
    }
    let mut legacy_reader = R::from_bytes(payload);
    let legacy = LegacyAtomicSwapFulfillment::decode(&mut legacy_reader)?;
    legacy_reader.finish()?;
    Ok(AtomicSwapVariant::Legacy(legacy))
}

/// The JSON superset used to classify tag=2 payloads (§4.5.1): every legacy field is optional,
/// defaulting to its zero value when absent.
#[derive(Deserialize)]
struct AtomicSwapJsonSuperset {
    #[serde(default)]
    sender: Option<UnlockHash>,
    #[serde(default)]
    receiver: Option<UnlockHash>,
    #[serde(default, rename = "hashedsecret")]
    hashed_secret: Option<Hash>,
    #[serde(default, rename = "timelock")]
    time_lock: Option<u64>,
    #[serde(rename = "publickey")]
    pubkey: PublicKey,
    signature: Signature,
    #[serde(default)]
    secret: AtomicSwapSecret,
}

/// Counts how many of `{sender, receiver, time_lock, hashed_secret}` are zero/missing and
/// classifies accordingly: `0` legacy, `4` current, anything else is `PartialLegacyFields`.
pub fn classify_json(value: serde_json::Value) -> Result<AtomicSwapVariant, serde_json::Error> {
    let superset: AtomicSwapJsonSuperset = serde_json::from_value(value)?;
    let zero_count = [
        superset.sender.is_none(),
        superset.receiver.is_none(),
        superset.hashed_secret.is_none(),
        superset.time_lock.map(|t| t == 0).unwrap_or(true),
    ]
    .iter()
    .filter(|zero| **zero)
    .count();

    match zero_count {
        4 => Ok(AtomicSwapVariant::Current(AtomicSwapFulfillment {
            pubkey: superset.pubkey,
            signature: superset.signature,
            secret: superset.secret,
        })),
        0 => Ok(AtomicSwapVariant::Legacy(LegacyAtomicSwapFulfillment {
            sender: superset.sender.expect("checked non-zero above"),
            receiver: superset.receiver.expect("checked non-zero above"),
            hashed_secret: superset.hashed_secret.expect("checked non-zero above"),
            time_lock: superset.time_lock.expect("checked non-zero above"),
            pubkey: superset.pubkey,
            signature: superset.signature,
            secret: superset.secret,
        })),
        _ => Err(serde::de::Error::custom(StructuralError::PartialLegacyFields)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{CodecAReader, CodecAWriter};

    fn sample_current() -> AtomicSwapFulfillment {
        AtomicSwapFulfillment {
            pubkey: PublicKey::new_ed25519([4; 32]).unwrap(),
            signature: Signature([9; 64]),
            secret: AtomicSwapSecret([0; 32]),
        }
    }

    #[test]
    fn binary_dispatch_picks_current_for_current_payload() {
        let current = sample_current();
        let mut w = CodecAWriter::default();
        current.encode(&mut w);
        let bytes = w.finish();
        match unmarshal_binary::<CodecAReader>(&bytes).unwrap() {
            AtomicSwapVariant::Current(decoded) => assert_eq!(decoded, current),
            AtomicSwapVariant::Legacy(_) => panic!("expected current layout"),
        }
    }

    #[test]
    fn binary_dispatch_picks_legacy_for_legacy_payload() {
        let legacy = LegacyAtomicSwapFulfillment {
            sender: UnlockHash::new(crate::unlock_hash::UnlockHashType::PubKey, Hash([1; 32])),
            receiver: UnlockHash::new(crate::unlock_hash::UnlockHashType::PubKey, Hash([2; 32])),
            hashed_secret: Hash([3; 32]),
            time_lock: 42,
            pubkey: PublicKey::new_ed25519([4; 32]).unwrap(),
            signature: Signature([9; 64]),
            secret: AtomicSwapSecret([0; 32]),
        };
        let mut w = CodecAWriter::default();
        legacy.encode(&mut w);
        let bytes = w.finish();
        match unmarshal_binary::<CodecAReader>(&bytes).unwrap() {
            AtomicSwapVariant::Legacy(decoded) => assert_eq!(decoded, legacy),
            AtomicSwapVariant::Current(_) => panic!("expected legacy layout"),
        }
    }

    #[test]
    fn json_partial_legacy_fields_is_an_error() {
        let sender = UnlockHash::new(crate::unlock_hash::UnlockHashType::PubKey, Hash([1; 32])).to_string();
        let pubkey = format!("ed25519:{}", hex::encode([4u8; 32]));
        let value = serde_json::json!({
            "sender": sender,
            "publickey": pubkey,
            "signature": hex::encode([9u8; 64]),
        });
        assert!(classify_json(value).is_err());
    }
}
