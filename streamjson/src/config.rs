// SPDX-License-Identifier: Apache-2.0

//! Static configuration of the decoder.

use core::fmt;
use core::str::FromStr;

use crate::ConfigurationError;

/// Read granularity used when nothing else is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Largest accepted chunk size (16 MiB).
pub const MAX_CHUNK_SIZE: usize = 1 << 24;

/// Nesting limit used when nothing else is configured.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Which built-in [`CharacterSource`](crate::CharacterSource) splits the byte
/// stream into characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceKind {
    /// UTF-8 decoding, multi-byte sequences may straddle chunks.
    #[default]
    Utf8,
    /// One character per byte (ISO-8859-1).
    Latin1,
}

impl FromStr for SourceKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(SourceKind::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" | "bytes" => Ok(SourceKind::Latin1),
            _ => Err(ConfigurationError::UnknownSource(s.to_owned())),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Utf8 => f.write_str("utf8"),
            SourceKind::Latin1 => f.write_str("latin1"),
        }
    }
}

/// Tunable parameters consumed when a [`StreamDecoder`](crate::StreamDecoder)
/// is built.
///
/// ```
/// use streamjson::{Configuration, SourceKind};
///
/// let config = Configuration::default()
///     .with_chunk_size(512)
///     .with_source("latin1".parse().unwrap());
/// assert_eq!(config.source, SourceKind::Latin1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Bytes requested from the reader per refill.
    pub chunk_size: usize,
    /// Character source implementation.
    pub source: SourceKind,
    /// Deepest nesting of objects and arrays the parser accepts.
    pub max_depth: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            source: SourceKind::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Configuration {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_source(mut self, source: SourceKind) -> Self {
        self.source = source;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check the parameters before any input is touched.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.chunk_size == 0 {
            return Err(ConfigurationError::ZeroChunkSize);
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigurationError::ChunkSizeTooLarge {
                requested: self.chunk_size,
                max: MAX_CHUNK_SIZE,
            });
        }
        Ok(())
    }
}
