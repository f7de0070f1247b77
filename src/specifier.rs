//! 16-byte NUL-padded ASCII tags used to name signature algorithms.

use crate::encoding::{CodecError, Decodable, Encodable, ReadCodec, WriteCodec};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Specifier(pub [u8; 16]);

impl Specifier {
    pub const ED25519: Specifier = Specifier::from_ascii(b"ed25519");

    pub const fn from_ascii(tag: &[u8]) -> Self {
        let mut bytes = [0u8; 16];
        let mut i = 0;
        while i < tag.len() && i < 16 {
            bytes[i] = tag[i];
            i += 1;
        }
        Specifier(bytes)
    }

    pub fn as_str(&self) -> &str {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(16);
        std::str::from_utf8(&self.0[..end]).unwrap_or("")
    }

    pub fn is_ed25519(&self) -> bool { *self == Specifier::ED25519 }
}

impl fmt::Debug for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "Specifier({:?})", self.as_str()) }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.as_str()) }
}

impl FromStr for Specifier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > 16 || !s.is_ascii() {
            return Err(());
        }
        Ok(Specifier::from_ascii(s.as_bytes()))
    }
}

impl Serialize for Specifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Specifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Specifier::from_str(&s).map_err(|_| serde::de::Error::custom("specifier must be <=16 ascii bytes"))
    }
}

impl Encodable for Specifier {
    fn encode<W: WriteCodec>(&self, w: &mut W) { w.write_raw(&self.0); }
}

impl Decodable for Specifier {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> {
        let bytes = r.read_raw(16)?;
        let mut array = [0u8; 16];
        array.copy_from_slice(bytes);
        Ok(Specifier(array))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ed25519_is_left_aligned_nul_padded() {
        assert_eq!(&Specifier::ED25519.0[..7], b"ed25519");
        assert_eq!(&Specifier::ED25519.0[7..], &[0u8; 9]);
        assert_eq!(Specifier::ED25519.as_str(), "ed25519");
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let parsed: Specifier = "ed25519".parse().unwrap();
        assert_eq!(parsed, Specifier::ED25519);
    }
}
