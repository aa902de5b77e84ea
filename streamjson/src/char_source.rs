// SPDX-License-Identifier: Apache-2.0

//! Pull-based character cursors over a [`Reader`].
//!
//! A [`CharacterSource`] hands the parser one character at a time and
//! refills its internal chunk from the reader whenever the chunk runs dry.
//! The sequence is single-pass and cannot be restarted.

use crate::config::{SourceKind, MAX_CHUNK_SIZE};
use crate::{ParseError, Reader};

/// Cursor over the characters of a document.
pub trait CharacterSource {
    /// Whether another character is available. May block on the reader.
    fn has_more(&mut self) -> Result<bool, ParseError>;

    /// Return the next character and move past it.
    ///
    /// Fails with [`ParseError::EndOfData`] when the source is exhausted.
    fn advance(&mut self) -> Result<char, ParseError>;
}

impl<S: CharacterSource + ?Sized> CharacterSource for &mut S {
    fn has_more(&mut self) -> Result<bool, ParseError> {
        (**self).has_more()
    }

    fn advance(&mut self) -> Result<char, ParseError> {
        (**self).advance()
    }
}

impl<S: CharacterSource + ?Sized> CharacterSource for Box<S> {
    fn has_more(&mut self) -> Result<bool, ParseError> {
        (**self).has_more()
    }

    fn advance(&mut self) -> Result<char, ParseError> {
        (**self).advance()
    }
}

/// Fixed-size chunk buffer shared by the source implementations.
#[derive(Debug)]
struct Chunk<R> {
    reader: R,
    buf: Vec<u8>,
    pos: usize,
    len: usize,
    exhausted: bool,
}

impl<R: Reader> Chunk<R> {
    fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            buf: vec![0u8; chunk_size.clamp(1, MAX_CHUNK_SIZE)],
            pos: 0,
            len: 0,
            exhausted: false,
        }
    }

    /// Ensure at least one unread byte, refilling from the reader if needed.
    fn fill(&mut self) -> Result<bool, ParseError> {
        if self.pos < self.len {
            return Ok(true);
        }
        if self.exhausted {
            return Ok(false);
        }
        let read = self.reader.read(&mut self.buf).map_err(|e| {
            log::debug!("reader failed: {e:?}");
            ParseError::ReaderError(format!("{e:?}"))
        })?;
        log::trace!("refilled chunk with {read} bytes");
        self.pos = 0;
        self.len = read.min(self.buf.len());
        if read == 0 {
            self.exhausted = true;
        }
        Ok(read > 0)
    }

    fn next_byte(&mut self) -> Result<Option<u8>, ParseError> {
        if !self.fill()? {
            return Ok(None);
        }
        let byte = self.buf.get(self.pos).copied();
        self.pos = self.pos.saturating_add(1);
        Ok(byte)
    }
}

/// Decodes UTF-8 from the reader, including sequences split across chunks.
#[derive(Debug)]
pub struct Utf8Source<R> {
    chunk: Chunk<R>,
}

impl<R: Reader> Utf8Source<R> {
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            chunk: Chunk::new(reader, chunk_size),
        }
    }

    /// Number of bytes in the sequence introduced by `lead`.
    fn sequence_len(lead: u8) -> Result<usize, ParseError> {
        match lead {
            0x00..=0x7F => Ok(1),
            0xC2..=0xDF => Ok(2),
            0xE0..=0xEF => Ok(3),
            0xF0..=0xF4 => Ok(4),
            _ => Err(ParseError::InvalidUtf8),
        }
    }
}

impl<R: Reader> CharacterSource for Utf8Source<R> {
    fn has_more(&mut self) -> Result<bool, ParseError> {
        self.chunk.fill()
    }

    fn advance(&mut self) -> Result<char, ParseError> {
        let lead = self.chunk.next_byte()?.ok_or(ParseError::EndOfData)?;
        let width = Self::sequence_len(lead)?;
        if width == 1 {
            return Ok(char::from(lead));
        }

        let mut bytes = [lead, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            // A truncated sequence at end of stream is malformed input
            *slot = self.chunk.next_byte()?.ok_or(ParseError::InvalidUtf8)?;
        }
        let encoded = bytes.get(..width).ok_or(ParseError::InvalidUtf8)?;
        let s = core::str::from_utf8(encoded)?;
        s.chars().next().ok_or(ParseError::InvalidUtf8)
    }
}

/// Maps each byte to the character with the same code point (ISO-8859-1).
#[derive(Debug)]
pub struct Latin1Source<R> {
    chunk: Chunk<R>,
}

impl<R: Reader> Latin1Source<R> {
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            chunk: Chunk::new(reader, chunk_size),
        }
    }
}

impl<R: Reader> CharacterSource for Latin1Source<R> {
    fn has_more(&mut self) -> Result<bool, ParseError> {
        self.chunk.fill()
    }

    fn advance(&mut self) -> Result<char, ParseError> {
        let byte = self.chunk.next_byte()?.ok_or(ParseError::EndOfData)?;
        Ok(char::from(byte))
    }
}

/// The built-in sources, selected by [`SourceKind`].
#[derive(Debug)]
pub enum Source<R> {
    Utf8(Utf8Source<R>),
    Latin1(Latin1Source<R>),
}

impl<R: Reader> Source<R> {
    pub fn new(kind: SourceKind, reader: R, chunk_size: usize) -> Self {
        match kind {
            SourceKind::Utf8 => Source::Utf8(Utf8Source::new(reader, chunk_size)),
            SourceKind::Latin1 => Source::Latin1(Latin1Source::new(reader, chunk_size)),
        }
    }
}

impl<R: Reader> CharacterSource for Source<R> {
    fn has_more(&mut self) -> Result<bool, ParseError> {
        match self {
            Source::Utf8(s) => s.has_more(),
            Source::Latin1(s) => s.has_more(),
        }
    }

    fn advance(&mut self) -> Result<char, ParseError> {
        match self {
            Source::Utf8(s) => s.advance(),
            Source::Latin1(s) => s.advance(),
        }
    }
}
