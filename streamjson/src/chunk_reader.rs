// SPDX-License-Identifier: Apache-2.0

//! An in-memory [`Reader`] for documents that are already loaded.
//!
//! [`ChunkReader`] serves bytes from a slice, either as fast as the caller's
//! buffer allows or in fixed-size chunks. The chunked mode simulates network
//! packets or small file reads and is what the tests use to push multi-byte
//! characters and literals across chunk boundaries.
//!
//! For real I/O wrap a [`std::io::Read`] in [`IoReader`](crate::IoReader).
//!
//! # Examples
//!
//! ```rust
//! use streamjson::{ChunkReader, Configuration, StreamDecoder};
//!
//! let json = br#"{"name": "Alice", "age": 30}"#;
//! // Hand out at most 4 bytes per read
//! let reader = ChunkReader::new(json, 4);
//! let value = StreamDecoder::new(Configuration::default()).decode(reader).unwrap();
//! assert_eq!(value.get("age").and_then(|v| v.as_i64()), Some(30));
//! ```

use crate::Reader;

/// A [`Reader`] that reads from a byte slice, optionally in fixed-size chunks.
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    data: &'a [u8],
    pos: usize,
    chunk_size: usize,
}

impl<'a> ChunkReader<'a> {
    /// Create a reader that returns at most `chunk_size` bytes per `read()`
    /// call (minimum 1).
    pub fn new(data: &'a [u8], chunk_size: usize) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Create a reader limited only by the size of the caller's buffer.
    pub fn full_slice(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: usize::MAX,
        }
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

impl<'a> From<&'a str> for ChunkReader<'a> {
    fn from(s: &'a str) -> Self {
        ChunkReader::full_slice(s.as_bytes())
    }
}

impl Reader for ChunkReader<'_> {
    type Error = core::convert::Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let to_copy = self.remaining().min(buf.len()).min(self.chunk_size);
        if to_copy == 0 {
            return Ok(0);
        }

        let end = self.pos.saturating_add(to_copy);
        if let (Some(dest), Some(src)) = (buf.get_mut(..to_copy), self.data.get(self.pos..end)) {
            dest.copy_from_slice(src);
            self.pos = end;
            Ok(to_copy)
        } else {
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut reader: ChunkReader<'_>, buf_len: usize) -> Vec<Vec<u8>> {
        let mut buf = vec![0u8; buf_len];
        let mut reads = Vec::new();
        loop {
            let n = reader.read(&mut buf).unwrap();
            if n == 0 {
                return reads;
            }
            reads.push(buf[..n].to_vec());
        }
    }

    #[test]
    fn test_from_str_serves_whole_document() {
        let reads = drain(ChunkReader::from(r#"{"a":1}"#), 64);
        assert_eq!(reads, vec![br#"{"a":1}"#.to_vec()]);
    }

    #[test]
    fn test_remaining_tracks_reads() {
        let mut reader = ChunkReader::new(b"[true]", 4);
        assert_eq!(reader.remaining(), 6);
        let mut buf = [0u8; 16];
        assert_eq!(reader.read(&mut buf).unwrap(), 4);
        assert_eq!(reader.remaining(), 2);
        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_chunks_split_multibyte_characters() {
        // "é" is two bytes; a chunk size of 1 hands them out separately
        let reads = drain(ChunkReader::new("\"é\"".as_bytes(), 1), 8);
        assert_eq!(reads, vec![vec![b'"'], vec![0xC3], vec![0xA9], vec![b'"']]);
    }

    #[test]
    fn test_caller_buffer_caps_chunk() {
        let reads = drain(ChunkReader::new(b"[1,2,3]", 100), 3);
        assert_eq!(reads, vec![b"[1,".to_vec(), b"2,3".to_vec(), b"]".to_vec()]);
    }

    #[test]
    fn test_chunk_size_floor_is_one_byte() {
        let reads = drain(ChunkReader::new(b"[]", 0), 8);
        assert_eq!(reads, vec![b"[".to_vec(), b"]".to_vec()]);
    }

    #[test]
    fn test_empty_input() {
        assert!(drain(ChunkReader::from(""), 8).is_empty());
    }
}
