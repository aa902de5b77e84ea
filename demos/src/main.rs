// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use streamjson::{
    Configuration, IoReader, JsonHandler, ParseError, SourceKind, StreamDecoder, Value,
    DEFAULT_CHUNK_SIZE, DEFAULT_MAX_DEPTH,
};

#[derive(Parser)]
#[command(
    name = "streamjson-cat",
    about = "Decode a JSON document from a file or stdin and print it back compactly"
)]
struct Args {
    /// Input file; stdin when omitted
    path: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, help = "Bytes pulled from the input per read")]
    chunk_size: usize,

    #[arg(long, default_value_t = SourceKind::Utf8, help = "Input encoding: utf8|latin1")]
    source: SourceKind,

    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, help = "Deepest object/array nesting accepted")]
    max_depth: usize,

    #[arg(long, help = "Print the parser events instead of the decoded value")]
    events: bool,
}

/// Prints one line per event, indented by nesting depth.
#[derive(Default)]
struct EventPrinter {
    depth: usize,
    count: usize,
}

impl EventPrinter {
    fn line(&mut self, text: &str) {
        self.count += 1;
        println!("{}{}", "  ".repeat(self.depth), text);
    }
}

impl JsonHandler for EventPrinter {
    fn begin_object(&mut self) -> Result<(), ParseError> {
        self.line("BeginObject");
        self.depth += 1;
        Ok(())
    }
    fn end_object(&mut self) -> Result<(), ParseError> {
        self.depth = self.depth.saturating_sub(1);
        self.line("EndObject");
        Ok(())
    }
    fn begin_array(&mut self) -> Result<(), ParseError> {
        self.line("BeginArray");
        self.depth += 1;
        Ok(())
    }
    fn end_array(&mut self) -> Result<(), ParseError> {
        self.depth = self.depth.saturating_sub(1);
        self.line("EndArray");
        Ok(())
    }
    fn append_value(&mut self, value: Value) -> Result<(), ParseError> {
        self.line(&format!("Value {value}"));
        Ok(())
    }
    fn key_value_separator(&mut self) -> Result<(), ParseError> {
        self.line("KeyValueSeparator");
        Ok(())
    }
    fn array_separator(&mut self) -> Result<(), ParseError> {
        self.line("ArraySeparator");
        Ok(())
    }
    fn end_of_stream(&mut self) -> Result<(), ParseError> {
        self.line("EndOfStream");
        Ok(())
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Configuration::default()
        .with_chunk_size(args.chunk_size)
        .with_source(args.source)
        .with_max_depth(args.max_depth);
    log::debug!("configuration: {config:?}");
    let decoder = StreamDecoder::new(config);

    let input: Box<dyn Read> = match &args.path {
        Some(path) => Box::new(File::open(path).map_err(|e| {
            format!("unable to open '{}': {e}", path.display())
        })?),
        None => Box::new(io::stdin().lock()),
    };
    let reader = IoReader::new(input);

    if args.events {
        let mut printer = EventPrinter::default();
        decoder.parse(reader, &mut printer)?;
        log::info!("{} events", printer.count);
    } else {
        let value = decoder.decode(reader)?;
        println!("{value}");
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
