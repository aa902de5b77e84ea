// SPDX-License-Identifier: Apache-2.0

//! Fixed token vocabulary of the JSON grammar.

use crate::Value;

pub const BEGIN_OBJECT: char = '{';
pub const END_OBJECT: char = '}';
pub const BEGIN_ARRAY: char = '[';
pub const END_ARRAY: char = ']';
pub const STRING_ENCLOSURE: char = '"';
pub const ESCAPE: char = '\\';
pub const ARRAY_SEPARATOR: char = ',';
pub const KEY_VALUE_SEPARATOR: char = ':';

/// Insignificant whitespace between tokens.
pub const WHITESPACE: [char; 4] = [' ', '\t', '\n', '\r'];

/// The literal keywords of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    True,
    False,
    Null,
}

impl Keyword {
    pub const ALL: [Keyword; 3] = [Keyword::True, Keyword::False, Keyword::Null];

    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
        }
    }

    pub fn value(self) -> Value {
        match self {
            Keyword::True => Value::Bool(true),
            Keyword::False => Value::Bool(false),
            Keyword::Null => Value::Null,
        }
    }

    /// The keyword spelled exactly by `span`, if any.
    pub fn lookup(span: &str) -> Option<Keyword> {
        Self::ALL.into_iter().find(|k| k.as_str() == span)
    }

    /// True if some keyword starts with `span`.
    pub fn is_prefix(span: &str) -> bool {
        Self::ALL.iter().any(|k| k.as_str().starts_with(span))
    }
}

pub fn is_whitespace(c: char) -> bool {
    WHITESPACE.contains(&c)
}

/// First letter of a keyword, in either case.
pub fn is_keyword_start(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 't' | 'f' | 'n')
}

pub fn is_number_start(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '+'
}

/// Characters a number scan keeps consuming.
pub fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')
}
