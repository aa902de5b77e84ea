// SPDX-License-Identifier: Apache-2.0

use streamjson::{
    decode_reader, ChunkReader, Configuration, ConfigurationError, Error, ParseError, Reader,
    SourceKind, StreamDecoder, Value, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE,
};

#[test]
fn test_defaults() {
    let config = Configuration::default();
    assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
    assert_eq!(config.source, SourceKind::Utf8);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_source_kind_from_text() {
    assert_eq!("UTF-8".parse::<SourceKind>(), Ok(SourceKind::Utf8));
    assert_eq!("iso-8859-1".parse::<SourceKind>(), Ok(SourceKind::Latin1));
    assert_eq!(
        "ebcdic".parse::<SourceKind>(),
        Err(ConfigurationError::UnknownSource("ebcdic".to_string()))
    );
}

#[test]
fn test_zero_chunk_size() {
    let decoder = StreamDecoder::new(Configuration::default().with_chunk_size(0));
    let result = decoder.decode(ChunkReader::from("{}"));
    assert_eq!(
        result,
        Err(Error::Configuration(ConfigurationError::ZeroChunkSize))
    );
}

#[test]
fn test_oversized_chunk_rejected_before_allocating() {
    let decoder = StreamDecoder::new(Configuration::default().with_chunk_size(usize::MAX / 2));
    assert_eq!(
        decoder.decode(ChunkReader::from("[]")),
        Err(Error::Configuration(ConfigurationError::ChunkSizeTooLarge {
            requested: usize::MAX / 2,
            max: MAX_CHUNK_SIZE
        }))
    );

    let decoder = StreamDecoder::new(Configuration::default().with_chunk_size(MAX_CHUNK_SIZE));
    assert_eq!(decoder.decode(ChunkReader::from("[]")), Ok(Value::Array(vec![])));
}

#[test]
fn test_missing_file_reports_path() {
    let err = StreamDecoder::default()
        .decode_path("does/not/exist.json")
        .unwrap_err();
    match err {
        Error::Configuration(ConfigurationError::InvalidStream { path, .. }) => {
            assert_eq!(path, "does/not/exist.json");
        }
        other => panic!("Expected InvalidStream, got: {:?}", other),
    }
}

#[test]
fn test_chunk_size_one_splits_multibyte_characters() {
    let decoder = StreamDecoder::new(Configuration::default().with_chunk_size(1));
    let value = decoder.decode(ChunkReader::from(r#"{"€":"日本"}"#)).unwrap();
    assert_eq!(value.get("€").and_then(Value::as_str), Some("日本"));
}

#[test]
fn test_latin1_bytes_are_code_points() {
    let decoder = StreamDecoder::new(Configuration::default().with_source(SourceKind::Latin1));
    let value = decoder
        .decode(ChunkReader::full_slice(b"{\"na\xefve\":\"\xa9\"}"))
        .unwrap();
    assert_eq!(value.get("naïve").and_then(Value::as_str), Some("©"));
}

struct FailingReader {
    served: bool,
}

impl Reader for FailingReader {
    type Error = &'static str;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.served {
            return Err("connection reset");
        }
        self.served = true;
        let data = b"[1, 2";
        let n = data.len().min(buf.len());
        buf[..n].copy_from_slice(&data[..n]);
        Ok(n)
    }
}

#[test]
fn test_reader_failure_surfaces() {
    let result = StreamDecoder::default().decode(FailingReader { served: false });
    assert_eq!(
        result,
        Err(Error::Parse(ParseError::ReaderError(
            "\"connection reset\"".to_string()
        )))
    );
}

#[test]
fn test_decode_std_reader() {
    let cursor = std::io::Cursor::new(br#"{"stdin": [true]}"#.to_vec());
    let value = decode_reader(cursor).unwrap();
    assert_eq!(value.to_string(), r#"{"stdin":[true]}"#);
}

#[test]
fn test_error_display() {
    let err = Error::from(ConfigurationError::ZeroChunkSize);
    assert!(!err.to_string().is_empty());
    let err = Error::from(ParseError::UnterminatedString);
    assert!(std::error::Error::source(&err).is_some());
}
