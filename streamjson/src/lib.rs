// SPDX-License-Identifier: Apache-2.0

//! A streaming JSON decoder.
//!
//! Input is pulled from a [`Reader`] in fixed-size chunks and decoded one
//! character at a time by a [`StreamParser`]. Every token becomes an event on
//! a [`JsonHandler`]; the bundled [`Decoder`] handler folds those events into a
//! [`Value`] tree.
//!
//! ```
//! use streamjson::{decode_str, Value};
//!
//! let value = decode_str(r#"{"key1": "value1", "key2": [1, 2.5, null]}"#).unwrap();
//! assert_eq!(value.get("key1"), Some(&Value::from("value1")));
//! assert_eq!(value.to_string(), r#"{"key1":"value1","key2":[1,2.5,null]}"#);
//! ```
//!
//! Custom handlers see the raw event stream, which is useful when the whole
//! document does not need to be materialized:
//!
//! ```
//! use streamjson::{ChunkReader, JsonHandler, ParseError, StreamDecoder, Value};
//!
//! #[derive(Default)]
//! struct CountStrings(usize);
//!
//! impl JsonHandler for CountStrings {
//!     fn begin_object(&mut self) -> Result<(), ParseError> { Ok(()) }
//!     fn end_object(&mut self) -> Result<(), ParseError> { Ok(()) }
//!     fn begin_array(&mut self) -> Result<(), ParseError> { Ok(()) }
//!     fn end_array(&mut self) -> Result<(), ParseError> { Ok(()) }
//!     fn append_value(&mut self, value: Value) -> Result<(), ParseError> {
//!         if value.as_str().is_some() {
//!             self.0 += 1;
//!         }
//!         Ok(())
//!     }
//!     fn key_value_separator(&mut self) -> Result<(), ParseError> { Ok(()) }
//!     fn array_separator(&mut self) -> Result<(), ParseError> { Ok(()) }
//! }
//!
//! let mut counter = CountStrings::default();
//! StreamDecoder::default()
//!     .parse(ChunkReader::from(r#"["a", 1, {"b": "c"}]"#), &mut counter)
//!     .unwrap();
//! assert_eq!(counter.0, 3);
//! ```

mod parse_error;
pub use parse_error::{ConfigurationError, ContextError, Error, ParseError};

pub mod grammar;

mod reader;
pub use reader::{IoReader, Reader};

mod chunk_reader;
pub use chunk_reader::ChunkReader;

mod char_source;
pub use char_source::{CharacterSource, Latin1Source, Source, Utf8Source};

mod config;
pub use config::{
    Configuration, SourceKind, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_DEPTH, MAX_CHUNK_SIZE,
};

mod escape_processor;

mod json_number;
pub use json_number::Number;

mod value;
pub use value::{Map, Value};

mod decoder;
pub use decoder::{Decoder, JsonHandler};

mod stream_parser;
pub use stream_parser::StreamParser;

mod stream_decoder;
pub use stream_decoder::{decode_reader, decode_str, StreamDecoder};
