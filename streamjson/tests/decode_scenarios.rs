// SPDX-License-Identifier: Apache-2.0

// Whole-document decoding, each case run at several chunk sizes

use streamjson::{
    ChunkReader, Configuration, ContextError, Error, Map, ParseError, StreamDecoder, Value,
    DEFAULT_MAX_DEPTH,
};

fn decode_with_chunks(json: &str, chunk_size: usize) -> Result<Value, Error> {
    StreamDecoder::new(Configuration::default().with_chunk_size(chunk_size))
        .decode(ChunkReader::new(json.as_bytes(), chunk_size))
}

fn object(members: &[(&str, Value)]) -> Value {
    Value::Object(
        members
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<Map>(),
    )
}

macro_rules! decode_ok_tests {
    ($($name:ident: $json:expr => $expected:expr;)*) => {
        $(
            paste::paste! {
                #[test_log::test]
                fn [<test_decode_ $name>]() {
                    for chunk_size in [1, 2, 7, 4096] {
                        assert_eq!(
                            decode_with_chunks($json, chunk_size),
                            Ok($expected),
                            "input {:?} with chunk size {}",
                            $json,
                            chunk_size
                        );
                    }
                }
            }
        )*
    };
}

macro_rules! decode_err_tests {
    ($($name:ident: $json:expr => $expected:expr;)*) => {
        $(
            paste::paste! {
                #[test_log::test]
                fn [<test_reject_ $name>]() {
                    for chunk_size in [1, 3, 4096] {
                        assert_eq!(
                            decode_with_chunks($json, chunk_size),
                            Err(Error::Parse($expected)),
                            "input {:?} with chunk size {}",
                            $json,
                            chunk_size
                        );
                    }
                }
            }
        )*
    };
}

decode_ok_tests! {
    empty_stream: "" => Value::Null;
    whitespace_only: " \n\t " => Value::Null;
    empty_object: "{}" => Value::Object(Map::new());
    empty_array: "[]" => Value::Array(vec![]);
    string: r#""foobar""# => Value::from("foobar");
    nested_arrays: r#"["one",["inner"],"two"]"# => Value::Array(vec![
        Value::from("one"),
        Value::Array(vec![Value::from("inner")]),
        Value::from("two"),
    ]);
    ordered_object: r#"{"key1":"value1","key2":"value2"}"# => object(&[
        ("key1", Value::from("value1")),
        ("key2", Value::from("value2")),
    ]);
    numbers: "[123,456,1.23,-1]" => Value::Array(vec![
        Value::from(123i64),
        Value::from(456i64),
        Value::from(1.23),
        Value::from(-1i64),
    ]);
    exponents: "[1e2, -2.5E-1, 0]" => Value::Array(vec![
        Value::from(100.0),
        Value::from(-0.25),
        Value::from(0i64),
    ]);
    keywords_any_case: "[True, FALSE, Null]" => Value::Array(vec![
        Value::Bool(true),
        Value::Bool(false),
        Value::Null,
    ]);
    nested_object: r#"{"a": {"b": [1, {"c": null}]}, "d": true}"# => object(&[
        ("a", object(&[(
            "b",
            Value::Array(vec![Value::from(1i64), object(&[("c", Value::Null)])]),
        )])),
        ("d", Value::Bool(true)),
    ]);
    duplicate_key_last_wins: r#"{"a":1,"b":2,"a":3}"# => object(&[
        ("a", Value::from(3i64)),
        ("b", Value::from(2i64)),
    ]);
    non_string_keys_coerced: r#"{1:"one",true:"yes"}"# => object(&[
        ("1", Value::from("one")),
        ("true", Value::from("yes")),
    ]);
    multibyte_utf8: r#"["καλημέρα", "😀"]"# => Value::Array(vec![
        Value::from("καλημέρα"),
        Value::from("😀"),
    ]);
    escapes: r#""tab\there \"quoted\" \/ \\""# => Value::from("tab\there \"quoted\" / \\");
    missing_separator_tolerated: "[1 2]" => Value::Array(vec![
        Value::from(1i64),
        Value::from(2i64),
    ]);
    trailing_separator_tolerated: "[1,]" => Value::Array(vec![Value::from(1i64)]);
    last_root_value_wins: "1 2" => Value::from(2i64);
    big_integer_as_float: "18446744073709551616" => Value::from(18446744073709551616.0);
}

decode_err_tests! {
    bad_exponent: "1ea23" => ParseError::InvalidNumberFormat;
    unterminated_string: r#""foobar"# => ParseError::UnterminatedString;
    misspelled_keyword: "ture" => ParseError::UnterminatedKeyword;
    truncated_keyword: "[nul" => ParseError::UnterminatedKeyword;
    unclosed_object: r#"{"key":"value""# => ParseError::UnexpectedEndOfStream { depth: 1 };
    unclosed_nested: "[[[]" => ParseError::UnexpectedEndOfStream { depth: 2 };
    unknown_character: "a" => ParseError::UnknownCharacter { character: 'a', position: 0 };
    leading_zero: "[01]" => ParseError::InvalidNumberFormat;
    stray_object_end: "}" => ParseError::Context(ContextError::UnopenedObject);
    mismatched_closer: "[}" => ParseError::Context(ContextError::NoObjectToEnd);
    mismatched_array_closer: "{]" => ParseError::Context(ContextError::NoArrayToEnd);
    key_without_value: r#"{"a"}"# => ParseError::Context(ContextError::NoObjectToEnd);
    separator_outside_object: "[1:2]" => ParseError::Context(ContextError::NotInObjectContext);
    separator_at_root: "1,2" => ParseError::Context(ContextError::NotInContainerContext);
    bad_escape: r#""\q""# => ParseError::InvalidEscapeSequence;
    raw_newline_in_string: "\"a\nb\"" => ParseError::UnescapedControlCharacter('\n');
}

#[test]
fn test_invalid_utf8_rejected() {
    let decoder = StreamDecoder::default();
    assert_eq!(
        decoder.decode(ChunkReader::full_slice(b"[\"\xff\"]")),
        Err(Error::Parse(ParseError::InvalidUtf8))
    );
}

#[test]
fn test_nesting_up_to_limit() {
    let depth = DEFAULT_MAX_DEPTH;
    let json = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let mut value = decode_with_chunks(&json, 64).unwrap();
    let mut seen = 0;
    while let Value::Array(mut items) = value {
        seen += 1;
        value = items.pop().unwrap_or(Value::Null);
    }
    assert_eq!(seen, depth);
}

#[test_log::test]
fn test_very_deep_nesting_is_rejected() {
    let depth = 100_000;
    let arrays = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    assert_eq!(
        decode_with_chunks(&arrays, 4096),
        Err(Error::Parse(ParseError::DepthLimitExceeded {
            limit: DEFAULT_MAX_DEPTH
        }))
    );

    let objects = format!("{}{}", r#"{"a":"#.repeat(depth), "}".repeat(depth));
    assert_eq!(
        decode_with_chunks(&objects, 4096),
        Err(Error::Parse(ParseError::DepthLimitExceeded {
            limit: DEFAULT_MAX_DEPTH
        }))
    );
}

#[test]
fn test_configured_depth_limit() {
    let decoder = StreamDecoder::new(Configuration::default().with_max_depth(2));
    assert_eq!(
        decoder.decode(ChunkReader::from("[[1]]")),
        Ok(Value::Array(vec![Value::Array(vec![Value::from(1i64)])]))
    );
    assert_eq!(
        decoder.decode(ChunkReader::from("[[[1]]]")),
        Err(Error::Parse(ParseError::DepthLimitExceeded { limit: 2 }))
    );
}
