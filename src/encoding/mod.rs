//! The two binary wire formats this subsystem must round-trip byte-exactly.
//!
//! `CodecA` is the historical Sia-style fixed-width format: `u64` fields and byte-slice length
//! prefixes are always 8 raw little-endian bytes. `CodecR` is the Rivine-style varint format:
//! the same fields are base-128 little-endian-group varints. Both formats share a single
//! `Encodable`/`Decodable` implementation per type; only the `WriteCodec`/`ReadCodec`
//! implementation supplied by the caller changes how a `u64` or length prefix is laid out.
//!
//! This generalizes the upstream pattern of a single write-only `Encoder` (used there only to
//! feed a hasher) into a genuine bidirectional, dual-format codec, since this subsystem must
//! decode wire traffic received from peers, not merely hash outgoing data.

pub mod codec_a;
pub mod codec_r;

pub use codec_a::{CodecAReader, CodecAWriter};
pub use codec_r::{CodecRReader, CodecRWriter};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unexpected end of input: needed {needed} byte(s), {available} available")]
    UnexpectedEof { needed: usize, available: usize },
    #[error("trailing bytes after decode: {0} byte(s) left over")]
    TrailingBytes(usize),
    #[error("varint is malformed or exceeds 64 bits")]
    VarintOverflow,
    #[error("invalid boolean byte: {0}, expected 0 or 1")]
    InvalidBool(u8),
    #[error("length prefix {0} exceeds remaining input")]
    LengthOutOfRange(u64),
}

/// Sink half of a binary codec. Implemented once per wire format (`CodecAWriter`, `CodecRWriter`).
pub trait WriteCodec {
    fn write_u8(&mut self, v: u8);
    fn write_u64(&mut self, v: u64);
    fn write_raw(&mut self, data: &[u8]);

    fn write_bool(&mut self, v: bool) { self.write_u8(v as u8) }

    /// Length-prefixed byte string: a `u64` length (codec-specific encoding) followed by the raw bytes.
    fn write_bytes(&mut self, data: &[u8]) {
        self.write_u64(data.len() as u64);
        self.write_raw(data);
    }

    fn write_vec<T: Encodable>(&mut self, items: &[T])
    where
        Self: Sized,
    {
        self.write_u64(items.len() as u64);
        for item in items {
            item.encode(self);
        }
    }

    fn finish(self) -> Vec<u8>;
}

/// Source half of a binary codec. Implemented once per wire format (`CodecAReader`, `CodecRReader`).
///
/// Readers borrow from the input buffer: decoded byte strings are returned as slices into it,
/// avoiding a per-field allocation during decode.
pub trait ReadCodec<'a> {
    /// Builds a fresh reader scoped to exactly `buf`. Used by proxy/variant decoding to attempt
    /// a parse against a payload slice that has already been carved out by an outer length
    /// prefix, so a short or malformed inner value can never read past its own payload.
    fn from_bytes(buf: &'a [u8]) -> Self
    where
        Self: Sized;

    fn read_u8(&mut self) -> Result<u8, CodecError>;
    fn read_u64(&mut self) -> Result<u64, CodecError>;
    fn read_raw(&mut self, n: usize) -> Result<&'a [u8], CodecError>;

    fn read_bool(&mut self) -> Result<bool, CodecError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBool(other)),
        }
    }

    fn read_bytes(&mut self) -> Result<&'a [u8], CodecError> {
        let len = self.read_u64()?;
        if len > self.remaining() as u64 {
            return Err(CodecError::LengthOutOfRange(len));
        }
        self.read_raw(len as usize)
    }

    fn read_vec<T: Decodable>(&mut self) -> Result<Vec<T>, CodecError>
    where
        Self: Sized,
    {
        let len = self.read_u64()?;
        let mut out = Vec::with_capacity(len.min(4096) as usize);
        for _ in 0..len {
            out.push(T::decode(self)?);
        }
        Ok(out)
    }

    fn remaining(&self) -> usize;

    /// Consumes the reader, erroring if any bytes were left unconsumed.
    fn finish(self) -> Result<(), CodecError>;
}

pub trait Encodable {
    fn encode<W: WriteCodec>(&self, w: &mut W);
}

pub trait Decodable: Sized {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError>;
}

/// Encodes `item` with `CodecA` and returns the raw bytes. Used by the designated object-hash
/// function (`HASH(x) = SHA-256(CodecA-encode(x))`, see [`crate::hash::object_hash`]) and by
/// every `unlock_hash()` derivation.
pub fn encode_codec_a<T: Encodable>(item: &T) -> Vec<u8> {
    let mut w = CodecAWriter::default();
    item.encode(&mut w);
    w.finish()
}

pub fn encode_codec_r<T: Encodable>(item: &T) -> Vec<u8> {
    let mut w = CodecRWriter::default();
    item.encode(&mut w);
    w.finish()
}

impl Encodable for u64 {
    fn encode<W: WriteCodec>(&self, w: &mut W) { w.write_u64(*self); }
}

impl Decodable for u64 {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> { r.read_u64() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_a_u64_is_fixed_width() {
        let mut w = CodecAWriter::default();
        w.write_u64(1);
        assert_eq!(w.finish(), 1u64.to_le_bytes().to_vec());
    }

    #[test]
    fn codec_r_u64_is_varint() {
        let mut w = CodecRWriter::default();
        w.write_u64(300);
        // 300 = 0b1_0010_1100 -> low 7 bits 0101100 with continuation, then 0000010
        assert_eq!(w.finish(), vec![0b1010_1100, 0b0000_0010]);
    }

    #[test]
    fn round_trip_bytes_codec_a() {
        let mut w = CodecAWriter::default();
        w.write_bytes(b"hello");
        let buf = w.finish();
        let mut r = CodecAReader::new(&buf);
        assert_eq!(r.read_bytes().unwrap(), b"hello");
        r.finish().unwrap();
    }

    #[test]
    fn round_trip_bytes_codec_r() {
        let mut w = CodecRWriter::default();
        w.write_bytes(b"hello world");
        let buf = w.finish();
        let mut r = CodecRReader::new(&buf);
        assert_eq!(r.read_bytes().unwrap(), b"hello world");
        r.finish().unwrap();
    }

    #[test]
    fn trailing_bytes_is_an_error() {
        let mut w = CodecAWriter::default();
        w.write_u8(1);
        w.write_u8(2);
        let buf = w.finish();
        let mut r = CodecAReader::new(&buf);
        r.read_u8().unwrap();
        assert!(r.finish().is_err());
    }
}
