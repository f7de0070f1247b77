//! Fixed-size 32-byte hash values and the designated object-hash function.

use crate::encoding::{encode_codec_a, CodecError, Decodable, Encodable, ReadCodec, WriteCodec};
use derive_more::{From, Into};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::convert::TryFrom;
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("invalid length: expected 32 byte hex string, found {0}")]
    InvalidLength(String),
    #[error("invalid slice length: expected 32 byte slice, found {0} byte(s)")]
    InvalidSliceLength(usize),
}

/// A 256 bit SHA-256 digest, used for atomic-swap preimages and the designated object hash.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord, From, Into)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    pub const ZERO: Hash = Hash([0u8; 32]);

    pub fn is_zero(&self) -> bool { self.0 == [0u8; 32] }

    pub fn to_hex(&self) -> String { hex::encode(self.0) }

    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        if s.len() != 64 {
            return Err(HashError::InvalidLength(s.to_string()));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| HashError::InvalidHex(s.to_string()))?;
        Ok(Hash(bytes))
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.to_hex()) }
}

impl FromStr for Hash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Hash::from_hex(s) }
}

impl TryFrom<&[u8]> for Hash {
    type Error = HashError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        if slice.len() != 32 {
            return Err(HashError::InvalidSliceLength(slice.len()));
        }
        let mut array = [0u8; 32];
        array.copy_from_slice(slice);
        Ok(Hash(array))
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Hash::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Encodable for Hash {
    fn encode<W: WriteCodec>(&self, w: &mut W) { w.write_raw(&self.0); }
}

impl Decodable for Hash {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> {
        let bytes = r.read_raw(32)?;
        let mut array = [0u8; 32];
        array.copy_from_slice(bytes);
        Ok(Hash(array))
    }
}

/// An ed25519 signature. 64 raw bytes; no curve validation is performed here, that is the
/// responsibility of the verifying [`crate::keys::PublicKey`].
#[derive(Clone, Debug, Eq, PartialEq, From, Into)]
pub struct Signature(pub [u8; 64]);

impl Default for Signature {
    fn default() -> Self { Signature([0u8; 64]) }
}

impl Signature {
    pub fn to_hex(&self) -> String { hex::encode(&self.0[..]) }

    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        if s.len() != 128 {
            return Err(HashError::InvalidLength(s.to_string()));
        }
        let mut bytes = [0u8; 64];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| HashError::InvalidHex(s.to_string()))?;
        Ok(Signature(bytes))
    }

    pub fn is_zero(&self) -> bool { self.0[..] == [0u8; 64][..] }
}

impl Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.to_hex()) }
}

impl TryFrom<&[u8]> for Signature {
    type Error = HashError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        if slice.len() != 64 {
            return Err(HashError::InvalidSliceLength(slice.len()));
        }
        let mut array = [0u8; 64];
        array.copy_from_slice(slice);
        Ok(Signature(array))
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Signature::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl Encodable for Signature {
    fn encode<W: WriteCodec>(&self, w: &mut W) { w.write_raw(&self.0); }
}

impl Decodable for Signature {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> {
        let bytes = r.read_raw(64)?;
        let mut array = [0u8; 64];
        array.copy_from_slice(bytes);
        Ok(Signature(array))
    }
}

/// A 32-byte atomic-swap secret (the hashlock preimage). The all-zero value signals refund
/// intent rather than an actual secret (§4.4.3).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AtomicSwapSecret(pub [u8; 32]);

impl AtomicSwapSecret {
    pub fn is_zero(&self) -> bool { self.0 == [0u8; 32] }

    pub fn hashed(&self) -> Hash { sha256(&self.0) }
}

impl Encodable for AtomicSwapSecret {
    fn encode<W: WriteCodec>(&self, w: &mut W) { w.write_raw(&self.0); }
}

impl Decodable for AtomicSwapSecret {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> {
        let bytes = r.read_raw(32)?;
        let mut array = [0u8; 32];
        array.copy_from_slice(bytes);
        Ok(AtomicSwapSecret(array))
    }
}

impl fmt::Display for AtomicSwapSecret {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", hex::encode(self.0)) }
}

impl Serialize for AtomicSwapSecret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for AtomicSwapSecret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.len() != 64 {
            return Err(serde::de::Error::custom(HashError::InvalidLength(s)));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&s, &mut bytes).map_err(|_| serde::de::Error::custom(HashError::InvalidHex(s)))?;
        Ok(AtomicSwapSecret(bytes))
    }
}

/// SHA-256 of a raw byte string.
pub fn sha256(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    let mut array = [0u8; 32];
    array.copy_from_slice(&digest);
    Hash(array)
}

/// The designated object-hash function: `HASH(x) = SHA-256(CodecA-encode(x))` (§6). Every
/// `unlock_hash()` derivation and the unlock-hash checksum are built from this primitive.
pub fn object_hash<T: Encodable>(item: &T) -> Hash { sha256(&encode_codec_a(item)) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_hash_round_trips() {
        let h = Hash::from_str(&"0".repeat(64)).unwrap();
        assert_eq!(h, Hash::default());
        assert!(h.is_zero());
    }

    #[test]
    fn invalid_length_is_rejected() {
        assert!(matches!(Hash::from_str("badc0de"), Err(HashError::InvalidLength(_))));
    }

    #[test]
    fn sha256_known_vector() {
        // sha256("") = e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855
        let h = sha256(b"");
        assert_eq!(h.to_hex(), "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b85");
    }

    #[test]
    fn atomic_swap_secret_hashes_to_sha256() {
        let secret = AtomicSwapSecret(*b"01234567890123456789012345678901");
        assert_eq!(secret.hashed(), sha256(&secret.0));
    }
}
