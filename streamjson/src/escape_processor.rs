// SPDX-License-Identifier: Apache-2.0

use crate::parse_error::ParseError;

/// Pure functions turning the raw span between two quotes into the decoded
/// string.
pub(crate) struct EscapeProcessor;

impl EscapeProcessor {
    /// Character denoted by `\<escape_char>`.
    pub(crate) fn process_simple_escape(escape_char: char) -> Result<char, ParseError> {
        match escape_char {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            '\\' => Ok('\\'),
            '"' => Ok('"'),
            '/' => Ok('/'),
            'b' => Ok('\u{08}'),
            'f' => Ok('\u{0C}'),
            _ => Err(ParseError::InvalidEscapeSequence),
        }
    }

    pub(crate) fn validate_hex_digit(c: char) -> Result<u32, ParseError> {
        c.to_digit(16).ok_or(ParseError::InvalidUnicodeHex)
    }

    /// U+D800..=U+DBFF
    pub(crate) fn is_high_surrogate(codepoint: u32) -> bool {
        (0xD800..=0xDBFF).contains(&codepoint)
    }

    /// U+DC00..=U+DFFF
    pub(crate) fn is_low_surrogate(codepoint: u32) -> bool {
        (0xDC00..=0xDFFF).contains(&codepoint)
    }

    pub(crate) fn combine_surrogate_pair(high: u32, low: u32) -> Result<u32, ParseError> {
        if !Self::is_high_surrogate(high) || !Self::is_low_surrogate(low) {
            return Err(ParseError::InvalidUnicodeCodepoint);
        }
        Ok(0x10000 + ((high & 0x3FF) << 10) + (low & 0x3FF))
    }

    /// Resolve one `\uXXXX` code unit against a pending high surrogate.
    ///
    /// Returns the finished character, or `None` together with the new
    /// pending high surrogate when `codepoint` opens a pair.
    pub(crate) fn process_unicode_escape(
        codepoint: u32,
        pending_high_surrogate: Option<u32>,
    ) -> Result<(Option<char>, Option<u32>), ParseError> {
        match pending_high_surrogate {
            Some(high) if Self::is_low_surrogate(codepoint) => {
                let combined = Self::combine_surrogate_pair(high, codepoint)?;
                let ch = char::from_u32(combined).ok_or(ParseError::InvalidUnicodeCodepoint)?;
                Ok((Some(ch), None))
            }
            // High surrogate not followed by low surrogate
            Some(_) => Err(ParseError::InvalidUnicodeCodepoint),
            None if Self::is_high_surrogate(codepoint) => Ok((None, Some(codepoint))),
            None => {
                // Lone low surrogates are rejected by from_u32
                let ch = char::from_u32(codepoint).ok_or(ParseError::InvalidUnicodeCodepoint)?;
                Ok((Some(ch), None))
            }
        }
    }

    /// Decode the raw content of a string literal (quotes excluded).
    pub(crate) fn unescape(raw: &str) -> Result<String, ParseError> {
        if let Some(c) = raw.chars().find(|c| u32::from(*c) < 0x20) {
            return Err(ParseError::UnescapedControlCharacter(c));
        }
        if !raw.contains('\\') {
            return Ok(raw.to_owned());
        }

        let mut out = String::with_capacity(raw.len());
        let mut collector = UnicodeEscapeCollector::new();
        let mut chars = raw.chars();

        while let Some(c) = chars.next() {
            if c != '\\' {
                if collector.has_pending_high_surrogate() {
                    return Err(ParseError::InvalidUnicodeCodepoint);
                }
                out.push(c);
                continue;
            }

            let escape = chars.next().ok_or(ParseError::InvalidEscapeSequence)?;
            if escape == 'u' {
                collector.reset();
                for _ in 0..4 {
                    let digit = chars.next().ok_or(ParseError::InvalidUnicodeHex)?;
                    collector.add_hex_digit(digit)?;
                }
                if let Some(ch) = collector.process_to_char()? {
                    out.push(ch);
                }
            } else {
                if collector.has_pending_high_surrogate() {
                    return Err(ParseError::InvalidUnicodeCodepoint);
                }
                out.push(Self::process_simple_escape(escape)?);
            }
        }

        if collector.has_pending_high_surrogate() {
            return Err(ParseError::InvalidUnicodeCodepoint);
        }
        Ok(out)
    }
}

/// Collects the 4 hex digits of a `\uXXXX` sequence and tracks a pending
/// high surrogate across consecutive escapes.
#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeCollector {
    codepoint: u32,
    hex_count: usize,
    pending_high_surrogate: Option<u32>,
}

impl UnicodeEscapeCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reset for a new escape; a pending high surrogate survives.
    pub(crate) fn reset(&mut self) {
        self.codepoint = 0;
        self.hex_count = 0;
    }

    /// True once the fourth digit is in.
    pub(crate) fn add_hex_digit(&mut self, digit: char) -> Result<bool, ParseError> {
        let value = EscapeProcessor::validate_hex_digit(digit)?;
        if self.hex_count >= 4 {
            return Err(ParseError::InvalidUnicodeHex);
        }
        self.codepoint = (self.codepoint << 4) | value;
        self.hex_count += 1;
        Ok(self.hex_count == 4)
    }

    /// Resolve the collected digits. `None` means a high surrogate is now
    /// waiting for its partner.
    pub(crate) fn process_to_char(&mut self) -> Result<Option<char>, ParseError> {
        if self.hex_count != 4 {
            return Err(ParseError::InvalidUnicodeHex);
        }
        let (ch, pending) =
            EscapeProcessor::process_unicode_escape(self.codepoint, self.pending_high_surrogate)?;
        self.pending_high_surrogate = pending;
        Ok(ch)
    }

    pub(crate) fn has_pending_high_surrogate(&self) -> bool {
        self.pending_high_surrogate.is_some()
    }
}
