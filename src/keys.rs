//! Public-key wrapper: an algorithm tag plus raw key bytes, with sign/verify dispatch.

use crate::encoding::{CodecError, Decodable, Encodable, ReadCodec, WriteCodec};
use crate::hash::Signature;
use crate::specifier::Specifier;
use curve25519_dalek::edwards::CompressedEdwardsY;
use ed25519_dalek::{ExpandedSecretKey, PublicKey as DalekPublicKey, SecretKey as DalekSecretKey,
                    Signature as DalekSignature, Verifier};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ED25519_PUBLIC_KEY_LEN: usize = 32;
/// `ed25519_dalek::Keypair::to_bytes()` layout: 32-byte seed followed by the 32-byte public half.
const ED25519_PRIVATE_KEY_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("sign: unknown algorithm {0}")]
    UnknownSignAlgorithm(Specifier),
    #[error("invalid private key size for {algorithm}: expected {expected}, found {found}")]
    InvalidSecretKeySize { algorithm: Specifier, expected: usize, found: usize },
    #[error("invalid public key size for {algorithm}: expected {expected}, found {found}")]
    InvalidPublicKeySize { algorithm: Specifier, expected: usize, found: usize },
    #[error("public key is not a valid point on the curve")]
    CorruptPoint,
    #[error("signature verification failed")]
    SignatureInvalid,
    #[error("invalid public key string, expected '<algorithm>:<hex>': {0}")]
    InvalidString(String),
    #[error("invalid hex in public key: {0}")]
    InvalidHex(String),
    #[error("sign: no private key supplied for {0}")]
    NilKey(Specifier),
}

/// Algorithm tag + raw key bytes. Only `ed25519` is a known algorithm today; others round-trip
/// but cannot be used to sign, and verification against them is tolerated (soft-fork reservation,
/// see [`PublicKey::verify`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub algorithm: Specifier,
    pub key: Vec<u8>,
}

impl PublicKey {
    pub fn new_ed25519(key: [u8; 32]) -> Result<Self, KeyError> {
        let pk = PublicKey {
            algorithm: Specifier::ED25519,
            key: key.to_vec(),
        };
        pk.validate_ed25519_point()?;
        Ok(pk)
    }

    fn validate_ed25519_point(&self) -> Result<(), KeyError> {
        if self.key.len() != ED25519_PUBLIC_KEY_LEN {
            return Err(KeyError::InvalidPublicKeySize {
                algorithm: self.algorithm,
                expected: ED25519_PUBLIC_KEY_LEN,
                found: self.key.len(),
            });
        }
        CompressedEdwardsY::from_slice(&self.key)
            .decompress()
            .map(|_| ())
            .ok_or(KeyError::CorruptPoint)
    }

    /// Signs `message` with `private_key` (64 bytes: seed || public half). Dispatches on
    /// `self.algorithm`; unknown algorithms are a hard error here (signing commits to a specific
    /// scheme), unlike [`PublicKey::verify`].
    pub fn sign(&self, private_key: &[u8], message: &[u8]) -> Result<Signature, KeyError> {
        if !self.algorithm.is_ed25519() {
            return Err(KeyError::UnknownSignAlgorithm(self.algorithm));
        }
        if private_key.is_empty() {
            return Err(KeyError::NilKey(self.algorithm));
        }
        if private_key.len() != ED25519_PRIVATE_KEY_LEN {
            return Err(KeyError::InvalidSecretKeySize {
                algorithm: self.algorithm,
                expected: ED25519_PRIVATE_KEY_LEN,
                found: private_key.len(),
            });
        }
        let secret = DalekSecretKey::from_bytes(&private_key[..32]).map_err(|_| KeyError::InvalidSecretKeySize {
            algorithm: self.algorithm,
            expected: ED25519_PRIVATE_KEY_LEN,
            found: private_key.len(),
        })?;
        let dalek_pub = DalekPublicKey::from_bytes(&self.key).map_err(|_| KeyError::CorruptPoint)?;
        let expanded: ExpandedSecretKey = (&secret).into();
        let sig: DalekSignature = expanded.sign(message, &dalek_pub);
        Signature::try_from(sig.to_bytes().as_ref()).map_err(|_| KeyError::SignatureInvalid)
    }

    /// Verifies `signature` over `message`. Unknown algorithms return `Ok` unconditionally —
    /// this is the soft-fork reservation: a future algorithm can be adopted by block creators
    /// without breaking validation of transactions already accepted by older nodes (§4.8).
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), KeyError> {
        if !self.algorithm.is_ed25519() {
            return Ok(());
        }
        let dalek_pub = DalekPublicKey::from_bytes(&self.key).map_err(|_| KeyError::CorruptPoint)?;
        let dalek_sig = DalekSignature::from_bytes(&signature.0).map_err(|_| KeyError::SignatureInvalid)?;
        dalek_pub.verify(message, &dalek_sig).map_err(|_| KeyError::SignatureInvalid)
    }

    /// Rejects unless the algorithm is known and the key size matches it exactly. Unlike
    /// [`PublicKey::verify`], this never tolerates an unknown algorithm — it is used to decide
    /// `is_standard`, not whether a historical signature remains valid.
    pub fn strict_signature_check(&self) -> Result<(), KeyError> {
        if !self.algorithm.is_ed25519() {
            return Err(KeyError::UnknownSignAlgorithm(self.algorithm));
        }
        if self.key.len() != ED25519_PUBLIC_KEY_LEN {
            return Err(KeyError::InvalidPublicKeySize {
                algorithm: self.algorithm,
                expected: ED25519_PUBLIC_KEY_LEN,
                found: self.key.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}:{}", self.algorithm, hex::encode(&self.key)) }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (algorithm_str, hex_str) = s
            .split_once(':')
            .ok_or_else(|| KeyError::InvalidString(s.to_string()))?;
        let algorithm = Specifier::from_str(algorithm_str).map_err(|_| KeyError::InvalidString(s.to_string()))?;
        let key = hex::decode(hex_str).map_err(|_| KeyError::InvalidHex(hex_str.to_string()))?;
        let pk = PublicKey { algorithm, key };
        if pk.algorithm.is_ed25519() {
            pk.validate_ed25519_point()?;
        }
        Ok(pk)
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Encodable for PublicKey {
    fn encode<W: WriteCodec>(&self, w: &mut W) {
        self.algorithm.encode(w);
        w.write_bytes(&self.key);
    }
}

impl Decodable for PublicKey {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> {
        let algorithm = Specifier::decode(r)?;
        let key = r.read_bytes()?.to_vec();
        Ok(PublicKey { algorithm, key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keypair() -> ([u8; 64], PublicKey) {
        // deterministic ed25519 seed for test reproducibility
        let secret = DalekSecretKey::from_bytes(&[7u8; 32]).unwrap();
        let dalek_pub: DalekPublicKey = (&secret).into();
        let mut private = [0u8; 64];
        private[..32].copy_from_slice(&secret.to_bytes());
        private[32..].copy_from_slice(dalek_pub.as_bytes());
        let pk = PublicKey::new_ed25519(dalek_pub.to_bytes()).unwrap();
        (private, pk)
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let (private, pk) = test_keypair();
        let sig = pk.sign(&private, b"message").unwrap();
        pk.verify(b"message", &sig).unwrap();
    }

    #[test]
    fn verify_rejects_tampered_message() {
        let (private, pk) = test_keypair();
        let sig = pk.sign(&private, b"message").unwrap();
        assert!(pk.verify(b"tampered", &sig).is_err());
    }

    #[test]
    fn unknown_algorithm_verify_is_ok() {
        let pk = PublicKey {
            algorithm: Specifier::from_ascii(b"future"),
            key: vec![1, 2, 3],
        };
        assert!(pk.verify(b"anything", &Signature::default()).is_ok());
    }

    #[test]
    fn sign_with_no_private_key_is_nil_key_not_invalid_size() {
        let (_, pk) = test_keypair();
        assert!(matches!(pk.sign(&[], b"x"), Err(KeyError::NilKey(_))));
    }

    #[test]
    fn sign_with_wrong_size_private_key_is_invalid_size() {
        let (_, pk) = test_keypair();
        assert!(matches!(pk.sign(&[0u8; 10], b"x"), Err(KeyError::InvalidSecretKeySize { .. })));
    }

    #[test]
    fn unknown_algorithm_sign_is_error() {
        let pk = PublicKey {
            algorithm: Specifier::from_ascii(b"future"),
            key: vec![1, 2, 3],
        };
        assert!(matches!(pk.sign(&[0u8; 64], b"x"), Err(KeyError::UnknownSignAlgorithm(_))));
    }

    #[test]
    fn display_and_from_str_round_trip() {
        let (_, pk) = test_keypair();
        let s = pk.to_string();
        assert!(s.starts_with("ed25519:"));
        let parsed = PublicKey::from_str(&s).unwrap();
        assert_eq!(parsed, pk);
    }

    #[test]
    fn strict_check_rejects_unknown_algorithm() {
        let pk = PublicKey {
            algorithm: Specifier::from_ascii(b"future"),
            key: vec![0u8; 32],
        };
        assert!(pk.strict_signature_check().is_err());
    }
}
