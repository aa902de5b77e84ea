// SPDX-License-Identifier: Apache-2.0

use crate::escape_processor::EscapeProcessor;
use crate::grammar::{self, Keyword};
use crate::{
    CharacterSource, ContextError, JsonHandler, Number, ParseError, Value, DEFAULT_MAX_DEPTH,
};

/// Character-driven JSON parser.
///
/// Pulls characters from its [`CharacterSource`] one at a time and reports
/// exactly one event per token to a [`JsonHandler`]. Strings, keywords and
/// numbers are consumed as a run; a number's terminating character is kept
/// as lookahead and dispatched like any other character.
pub struct StreamParser<S: CharacterSource> {
    source: S,
    /// Unmatched `{` and `[` seen so far
    depth: usize,
    max_depth: usize,
    /// Character read past the end of a number, with its position
    lookahead: Option<(usize, char)>,
    /// Characters pulled from the source so far
    consumed: usize,
}

impl<S: CharacterSource> StreamParser<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            lookahead: None,
            consumed: 0,
        }
    }

    /// Fail with [`ParseError::DepthLimitExceeded`] once more than
    /// `max_depth` containers are open.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of characters read from the source.
    pub fn position(&self) -> usize {
        self.consumed
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Run the whole document through `handler`.
    ///
    /// On success the handler has seen a balanced event sequence followed by
    /// `end_of_stream`, and the depth is back to zero.
    pub fn parse<H: JsonHandler>(&mut self, handler: &mut H) -> Result<(), ParseError> {
        while let Some((position, c)) = self.next_char()? {
            if let Err(e) = self.dispatch(position, c, handler) {
                log::debug!("parse failed at position {position}: {e}");
                return Err(e);
            }
        }

        if self.depth != 0 {
            log::debug!("stream ended with {} open container(s)", self.depth);
            return Err(ParseError::UnexpectedEndOfStream { depth: self.depth });
        }
        log::trace!("end of stream after {} characters", self.consumed);
        handler.end_of_stream()
    }

    /// Next character, taking pending lookahead first.
    fn next_char(&mut self) -> Result<Option<(usize, char)>, ParseError> {
        if let Some(pending) = self.lookahead.take() {
            return Ok(Some(pending));
        }
        if !self.source.has_more()? {
            return Ok(None);
        }
        let c = self.source.advance()?;
        let position = self.consumed;
        self.consumed += 1;
        Ok(Some((position, c)))
    }

    fn dispatch<H: JsonHandler>(
        &mut self,
        position: usize,
        c: char,
        handler: &mut H,
    ) -> Result<(), ParseError> {
        log::trace!("dispatch {c:?} at {position}, depth {}", self.depth);
        match c {
            grammar::BEGIN_OBJECT => {
                self.open()?;
                handler.begin_object()
            }
            grammar::END_OBJECT => {
                self.depth = self
                    .depth
                    .checked_sub(1)
                    .ok_or(ContextError::UnopenedObject)?;
                handler.end_object()
            }
            grammar::BEGIN_ARRAY => {
                self.open()?;
                handler.begin_array()
            }
            grammar::END_ARRAY => {
                self.depth = self
                    .depth
                    .checked_sub(1)
                    .ok_or(ContextError::UnopenedArray)?;
                handler.end_array()
            }
            grammar::ARRAY_SEPARATOR => handler.array_separator(),
            grammar::KEY_VALUE_SEPARATOR => handler.key_value_separator(),
            grammar::STRING_ENCLOSURE => {
                let s = self.consume_string()?;
                handler.append_value(Value::String(s))
            }
            c if grammar::is_whitespace(c) => handler.whitespace(c),
            c if grammar::is_keyword_start(c) => {
                let keyword = self.consume_keyword(c)?;
                handler.append_value(keyword.value())
            }
            c if grammar::is_number_start(c) => {
                let number = self.consume_number(c)?;
                handler.append_value(Value::Number(number))
            }
            character => Err(ParseError::UnknownCharacter {
                character,
                position,
            }),
        }
    }

    fn open(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            log::debug!("nesting limit of {} reached", self.max_depth);
            return Err(ParseError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Consume up to and including the closing quote; the opening quote is
    /// already consumed.
    fn consume_string(&mut self) -> Result<String, ParseError> {
        let mut raw = String::new();
        let mut escaped = false;
        loop {
            let Some((_, c)) = self.next_char()? else {
                return Err(ParseError::UnterminatedString);
            };
            if escaped {
                escaped = false;
            } else if c == grammar::ESCAPE {
                escaped = true;
            } else if c == grammar::STRING_ENCLOSURE {
                break;
            }
            raw.push(c);
        }
        EscapeProcessor::unescape(&raw)
    }

    /// Consume until the lowercased span spells a keyword. Nothing past the
    /// keyword's last letter is read.
    fn consume_keyword(&mut self, first: char) -> Result<Keyword, ParseError> {
        let mut span = String::with_capacity(5);
        span.push(first.to_ascii_lowercase());
        loop {
            if let Some(keyword) = Keyword::lookup(&span) {
                return Ok(keyword);
            }
            if !Keyword::is_prefix(&span) {
                // No continuation can match any more
                return Err(ParseError::UnterminatedKeyword);
            }
            let Some((_, c)) = self.next_char()? else {
                return Err(ParseError::UnterminatedKeyword);
            };
            span.push(c.to_ascii_lowercase());
        }
    }

    /// Consume the run of number characters. The first character outside
    /// the run becomes lookahead.
    fn consume_number(&mut self, first: char) -> Result<Number, ParseError> {
        let mut span = String::new();
        span.push(first);
        while let Some((position, c)) = self.next_char()? {
            if grammar::is_number_char(c) {
                span.push(c);
            } else {
                self.lookahead = Some((position, c));
                break;
            }
        }
        Number::from_span(&span)
    }
}
