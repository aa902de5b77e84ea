// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::path::Path;

use crate::{
    CharacterSource, Configuration, ConfigurationError, Decoder, Error, IoReader, JsonHandler,
    Reader, Source, StreamParser, Value,
};

/// Configured entry point: wraps a reader in the configured character source
/// and runs it through a [`StreamParser`].
///
/// ```
/// use streamjson::{ChunkReader, Configuration, StreamDecoder};
///
/// let decoder = StreamDecoder::new(Configuration::default().with_chunk_size(2));
/// let value = decoder
///     .decode(ChunkReader::from(r#"{"key1":"value1","key2":[1,2]}"#))
///     .unwrap();
/// assert_eq!(value.get("key1").and_then(|v| v.as_str()), Some("value1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StreamDecoder {
    config: Configuration,
}

impl StreamDecoder {
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Decode the single document read from `reader`.
    pub fn decode<R: Reader>(&self, reader: R) -> Result<Value, Error> {
        let mut decoder = Decoder::new();
        self.parse(reader, &mut decoder)?;
        Ok(decoder.into_result()?)
    }

    /// Feed the events of `reader`'s document to `handler`.
    pub fn parse<R: Reader, H: JsonHandler>(&self, reader: R, handler: &mut H) -> Result<(), Error> {
        self.config.validate()?;
        log::debug!(
            "parsing {} input in chunks of {} bytes, max depth {}",
            self.config.source,
            self.config.chunk_size,
            self.config.max_depth
        );
        let source = Source::new(self.config.source, reader, self.config.chunk_size);
        StreamParser::new(source)
            .with_max_depth(self.config.max_depth)
            .parse(handler)?;
        Ok(())
    }

    /// Decode the file at `path`.
    pub fn decode_path<P: AsRef<Path>>(&self, path: P) -> Result<Value, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ConfigurationError::InvalidStream {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.decode(IoReader::new(file))
    }

    /// Decode from an already constructed character source. Chunking and
    /// encoding are the source's business, so only the parse itself runs.
    pub fn decode_source<S: CharacterSource>(&self, source: S) -> Result<Value, Error> {
        let mut decoder = Decoder::new();
        StreamParser::new(source)
            .with_max_depth(self.config.max_depth)
            .parse(&mut decoder)?;
        Ok(decoder.into_result()?)
    }
}

/// Decode a complete JSON text with the default configuration.
pub fn decode_str(json: &str) -> Result<Value, Error> {
    StreamDecoder::default().decode(crate::ChunkReader::from(json))
}

/// Decode everything `reader` yields with the default configuration.
pub fn decode_reader<R: std::io::Read>(reader: R) -> Result<Value, Error> {
    StreamDecoder::default().decode(IoReader::new(reader))
}
