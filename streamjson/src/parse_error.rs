// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// A separator or closing token arrived where the open structure does not
/// allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// `}` while the current node is not an object.
    NoObjectToEnd,
    /// `]` while the current node is not an array.
    NoArrayToEnd,
    /// `:` outside of an object key.
    NotInObjectContext,
    /// `,` outside of an array or object.
    NotInContainerContext,
    /// More `}` than `{` seen so far.
    UnopenedObject,
    /// More `]` than `[` seen so far.
    UnopenedArray,
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ContextError::NoObjectToEnd => "there is no object to end",
            ContextError::NoArrayToEnd => "there is no array to end",
            ContextError::NotInObjectContext => "not in object context",
            ContextError::NotInContainerContext => "not in array or object context",
            ContextError::UnopenedObject => "closing brace without matching opening brace",
            ContextError::UnopenedArray => "closing bracket without matching opening bracket",
        };
        f.write_str(msg)
    }
}

/// Errors that can occur while decoding a JSON document.
///
/// Every variant aborts the current parse; nothing of the partially built
/// tree is salvaged.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A character outside the grammar where a token was expected.
    UnknownCharacter { character: char, position: usize },
    /// End of stream before the closing quote of a string.
    UnterminatedString,
    /// End of stream (or an impossible prefix) before `true`, `false` or `null` matched.
    UnterminatedKeyword,
    /// A numeric span that is not a legal JSON number.
    InvalidNumberFormat,
    /// End of stream while containers are still open.
    UnexpectedEndOfStream { depth: usize },
    /// An object or array opened beyond the configured nesting limit.
    DepthLimitExceeded { limit: usize },
    /// A separator or end token in an illegal position.
    Context(ContextError),
    /// Invalid escape sequence character.
    InvalidEscapeSequence,
    /// Invalid hex digits in Unicode escape sequence.
    InvalidUnicodeHex,
    /// Valid hex but invalid Unicode codepoint (e.g. an unpaired surrogate).
    InvalidUnicodeCodepoint,
    /// A raw control character inside a string literal.
    UnescapedControlCharacter(char),
    /// The byte stream is not valid UTF-8.
    InvalidUtf8,
    /// Error from the underlying reader (I/O error, not end-of-stream).
    ReaderError(String),
    /// A character was requested from an exhausted source.
    EndOfData,
    /// The result was requested before the end of the stream.
    IncompleteDocument,
}

impl From<ContextError> for ParseError {
    fn from(err: ContextError) -> Self {
        ParseError::Context(err)
    }
}

impl From<core::str::Utf8Error> for ParseError {
    fn from(_: core::str::Utf8Error) -> Self {
        ParseError::InvalidUtf8
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownCharacter {
                character,
                position,
            } => write!(f, "Unknown character {character:?} at position {position}"),
            ParseError::UnterminatedString => {
                f.write_str("Unexpected end of stream while reading a string")
            }
            ParseError::UnterminatedKeyword => {
                f.write_str("Unexpected end of stream while reading a keyword")
            }
            ParseError::InvalidNumberFormat => f.write_str("Invalid number format"),
            ParseError::UnexpectedEndOfStream { depth } => {
                write!(f, "Unexpected end of stream with {depth} open container(s)")
            }
            ParseError::DepthLimitExceeded { limit } => {
                write!(f, "Nesting deeper than {limit} levels")
            }
            ParseError::Context(e) => write!(f, "Context error: {e}"),
            ParseError::UnescapedControlCharacter(c) => {
                write!(f, "Unescaped control character U+{:04X} in string", *c as u32)
            }
            ParseError::ReaderError(msg) => write!(f, "Reader error: {msg}"),
            _ => write!(f, "{self:?}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Problems with the parser setup, reported before any input is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The chunk size must be at least one byte.
    ZeroChunkSize,
    /// The chunk size exceeds the largest buffer the sources allocate.
    ChunkSizeTooLarge { requested: usize, max: usize },
    /// The named character source implementation does not exist.
    UnknownSource(String),
    /// The stream handle could not be opened for reading.
    InvalidStream { path: String, reason: String },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::ZeroChunkSize => f.write_str("chunk size must be positive"),
            ConfigurationError::ChunkSizeTooLarge { requested, max } => {
                write!(f, "chunk size {requested} exceeds the maximum of {max}")
            }
            ConfigurationError::UnknownSource(name) => {
                write!(f, "unknown character source implementation '{name}'")
            }
            ConfigurationError::InvalidStream { path, reason } => {
                write!(f, "cannot open stream '{path}': {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Top-level error of the configured entry points.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Configuration(ConfigurationError),
    Parse(ParseError),
}

impl From<ConfigurationError> for Error {
    fn from(err: ConfigurationError) -> Self {
        Error::Configuration(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(e) => write!(f, "Configuration error: {e}"),
            Error::Parse(e) => write!(f, "Parse error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Configuration(e) => Some(e),
            Error::Parse(e) => Some(e),
        }
    }
}
