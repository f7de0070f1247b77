//! CodecA: the historical Sia-style fixed-width binary format.
//!
//! `u64` fields and length prefixes are always 8 raw little-endian bytes.

use super::{CodecError, ReadCodec, WriteCodec};

#[derive(Default)]
pub struct CodecAWriter {
    buffer: Vec<u8>,
}

impl WriteCodec for CodecAWriter {
    fn write_u8(&mut self, v: u8) { self.buffer.push(v); }

    fn write_u64(&mut self, v: u64) { self.buffer.extend_from_slice(&v.to_le_bytes()); }

    fn write_raw(&mut self, data: &[u8]) { self.buffer.extend_from_slice(data); }

    fn finish(self) -> Vec<u8> { self.buffer }
}

pub struct CodecAReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> CodecAReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self { CodecAReader { buf, pos: 0 } }
}

impl<'a> ReadCodec<'a> for CodecAReader<'a> {
    fn from_bytes(buf: &'a [u8]) -> Self { CodecAReader::new(buf) }

    fn read_u8(&mut self) -> Result<u8, CodecError> {
        let byte = *self
            .buf
            .get(self.pos)
            .ok_or(CodecError::UnexpectedEof { needed: 1, available: self.remaining() })?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_u64(&mut self) -> Result<u64, CodecError> {
        let bytes = self.read_raw(8)?;
        let mut array = [0u8; 8];
        array.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(array))
    }

    fn read_raw(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::UnexpectedEof { needed: n, available: self.remaining() });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn remaining(&self) -> usize { self.buf.len() - self.pos }

    fn finish(self) -> Result<(), CodecError> {
        if self.remaining() == 0 {
            Ok(())
        } else {
            Err(CodecError::TrailingBytes(self.remaining()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u64_round_trip() {
        let mut w = CodecAWriter::default();
        w.write_u64(u64::MAX);
        let buf = w.finish();
        let mut r = CodecAReader::new(&buf);
        assert_eq!(r.read_u64().unwrap(), u64::MAX);
    }

    #[test]
    fn short_read_is_eof() {
        let buf = [0u8; 3];
        let mut r = CodecAReader::new(&buf);
        assert!(r.read_u64().is_err());
    }
}
