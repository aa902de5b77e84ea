// SPDX-License-Identifier: Apache-2.0

// Decodes a document read in small chunks, then replays its events

use streamjson::{
    ChunkReader, Configuration, JsonHandler, ParseError, StreamDecoder, Value,
};

/// Prints each event with its nesting depth.
struct Tracer {
    depth: usize,
}

impl JsonHandler for Tracer {
    fn begin_object(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        println!("  {}BeginObject (depth: {})", "  ".repeat(self.depth - 1), self.depth);
        Ok(())
    }
    fn end_object(&mut self) -> Result<(), ParseError> {
        println!("  {}EndObject", "  ".repeat(self.depth.saturating_sub(1)));
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }
    fn begin_array(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        println!("  {}BeginArray (depth: {})", "  ".repeat(self.depth - 1), self.depth);
        Ok(())
    }
    fn end_array(&mut self) -> Result<(), ParseError> {
        println!("  {}EndArray", "  ".repeat(self.depth.saturating_sub(1)));
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }
    fn append_value(&mut self, value: Value) -> Result<(), ParseError> {
        println!("  {}Value: {}", "  ".repeat(self.depth), value);
        Ok(())
    }
    fn key_value_separator(&mut self) -> Result<(), ParseError> {
        Ok(())
    }
    fn array_separator(&mut self) -> Result<(), ParseError> {
        Ok(())
    }
    fn end_of_stream(&mut self) -> Result<(), ParseError> {
        println!("  EndOfStream");
        Ok(())
    }
}

fn main() -> Result<(), streamjson::Error> {
    let json = br#"{"name": "hello\nworld", "items": [1, 2.5, true, null], "count": 42}"#;
    let config = Configuration::default().with_chunk_size(8);

    println!("Input JSON: {}", String::from_utf8_lossy(json));
    println!("Chunk size: {} bytes", config.chunk_size);

    let decoder = StreamDecoder::new(config);
    let value = decoder.decode(ChunkReader::new(json, 8))?;
    println!("Decoded: {value}");
    if let Some(items) = value.get("items").and_then(Value::as_array) {
        println!("items has {} entries", items.len());
    }

    println!("Events:");
    decoder.parse(ChunkReader::new(json, 8), &mut Tracer { depth: 0 })?;
    Ok(())
}
