//! The unlock-hash value: a 1-byte type tag plus a 32-byte hash, with a checksummed string form.

use crate::encoding::{CodecError, Decodable, Encodable, ReadCodec, WriteCodec};
use crate::hash::Hash;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const CHECKSUM_LEN: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnlockHashError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("invalid length: expected a {expected}-byte hex string, found {found} bytes")]
    InvalidLength { expected: usize, found: usize },
    #[error("invalid checksum: expected {expected}, found {found}")]
    InvalidChecksum { expected: String, found: String },
}

/// The 1-byte unlock-hash type tag (§3). Any value other than the four named ones is
/// non-standard but still round-trips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum UnlockHashType {
    Nil,
    PubKey,
    AtomicSwap,
    MultiSig,
    NonStandard(u8),
}

impl UnlockHashType {
    pub fn to_u8(self) -> u8 {
        match self {
            UnlockHashType::Nil => 0,
            UnlockHashType::PubKey => 1,
            UnlockHashType::AtomicSwap => 2,
            UnlockHashType::MultiSig => 3,
            UnlockHashType::NonStandard(v) => v,
        }
    }

    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => UnlockHashType::Nil,
            1 => UnlockHashType::PubKey,
            2 => UnlockHashType::AtomicSwap,
            3 => UnlockHashType::MultiSig,
            other => UnlockHashType::NonStandard(other),
        }
    }
}

/// `{ type: u8, hash: Hash }`. Comparison is lexicographic on `type || hash` (§4.3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnlockHash {
    pub unlock_type: UnlockHashType,
    pub hash: Hash,
}

/// The all-zero unlock hash, used by [`crate::condition::NilCondition`].
pub const NIL_UNLOCK_HASH: UnlockHash = UnlockHash {
    unlock_type: UnlockHashType::Nil,
    hash: Hash::ZERO,
};

/// Sentinel address for a condition whose variant could not be resolved
/// ([`crate::condition::UnknownCondition`]).
pub const UNKNOWN_UNLOCK_HASH: UnlockHash = UnlockHash {
    unlock_type: UnlockHashType::NonStandard(0xff),
    hash: Hash::ZERO,
};

impl UnlockHash {
    pub fn new(unlock_type: UnlockHashType, hash: Hash) -> Self { UnlockHash { unlock_type, hash } }

    fn checksum(unlock_type: UnlockHashType, hash: &Hash) -> [u8; CHECKSUM_LEN] {
        let mut preimage = Vec::with_capacity(33);
        preimage.push(unlock_type.to_u8());
        preimage.extend_from_slice(&hash.0);
        let digest = crate::hash::sha256(&preimage);
        let mut checksum = [0u8; CHECKSUM_LEN];
        checksum.copy_from_slice(&digest.0[..CHECKSUM_LEN]);
        checksum
    }
}

impl PartialOrd for UnlockHash {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for UnlockHash {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.unlock_type.to_u8(), &self.hash.0).cmp(&(other.unlock_type.to_u8(), &other.hash.0))
    }
}

impl fmt::Display for UnlockHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let checksum = UnlockHash::checksum(self.unlock_type, &self.hash);
        write!(f, "{:02x}{}{}", self.unlock_type.to_u8(), self.hash.to_hex(), hex::encode(checksum))
    }
}

impl FromStr for UnlockHash {
    type Err = UnlockHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expected_len = (1 + 32 + CHECKSUM_LEN) * 2;
        if s.len() != expected_len {
            return Err(UnlockHashError::InvalidLength {
                expected: expected_len,
                found: s.len(),
            });
        }
        let bytes = hex::decode(s).map_err(|_| UnlockHashError::InvalidHex(s.to_string()))?;
        let unlock_type = UnlockHashType::from_u8(bytes[0]);
        let hash = Hash::try_from(&bytes[1..33]).expect("slice is 32 bytes");
        let found_checksum = &bytes[33..];
        let expected_checksum = UnlockHash::checksum(unlock_type, &hash);
        if found_checksum != expected_checksum {
            return Err(UnlockHashError::InvalidChecksum {
                expected: hex::encode(expected_checksum),
                found: hex::encode(found_checksum),
            });
        }
        Ok(UnlockHash { unlock_type, hash })
    }
}

impl Serialize for UnlockHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for UnlockHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        UnlockHash::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Encodable for UnlockHash {
    fn encode<W: WriteCodec>(&self, w: &mut W) {
        w.write_u8(self.unlock_type.to_u8());
        self.hash.encode(w);
    }
}

impl Decodable for UnlockHash {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> {
        let unlock_type = UnlockHashType::from_u8(r.read_u8()?);
        let hash = Hash::decode(r)?;
        Ok(UnlockHash { unlock_type, hash })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn round_trips_through_display_and_from_str() {
        let uh = UnlockHash::new(UnlockHashType::PubKey, Hash([0x63; 32]));
        let s = uh.to_string();
        let parsed = UnlockHash::from_str(&s).unwrap();
        assert_eq!(parsed, uh);
    }

    #[test]
    fn rejects_bad_checksum() {
        let uh = UnlockHash::new(UnlockHashType::PubKey, Hash([0x63; 32]));
        let mut s = uh.to_string();
        // flip the last checksum hex digit
        let last = s.pop().unwrap();
        let flipped = if last == '0' { '1' } else { '0' };
        s.push(flipped);
        assert!(matches!(UnlockHash::from_str(&s), Err(UnlockHashError::InvalidChecksum { .. })));
    }

    #[test]
    fn nil_unlock_hash_is_all_zero() {
        assert_eq!(NIL_UNLOCK_HASH.unlock_type.to_u8(), 0);
        assert!(NIL_UNLOCK_HASH.hash.is_zero());
    }

    #[test]
    fn ordering_is_lexicographic_on_type_then_hash() {
        let pub_key = UnlockHash::new(UnlockHashType::PubKey, Hash([0xff; 32]));
        let atomic_swap = UnlockHash::new(UnlockHashType::AtomicSwap, Hash([0x00; 32]));
        assert!(pub_key < atomic_swap, "type byte dominates the hash bytes");

        let low_hash = UnlockHash::new(UnlockHashType::PubKey, Hash([0x01; 32]));
        let high_hash = UnlockHash::new(UnlockHashType::PubKey, Hash([0x02; 32]));
        assert!(low_hash < high_hash);
    }
}
