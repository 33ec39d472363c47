use json_store::{Depth, JsonEntity, JsonStoreError};
use serde_json::{json, Value};

use clap::{Parser, ValueEnum};
use std::error::Error;
use std::io::{self, Read};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Mode {
    /// Raw text at the path.
    Dump,
    String,
    Number,
    Bool,
    Null,
    Exists,
    /// Kind of the value at the path.
    Kind,
    /// Fully resolved value with its kind.
    Value,
    /// Scalars converted, containers kept raw.
    Simple,
    /// Everything converted recursively.
    Nested,
    /// Elements of the array at the path, raw.
    Array,
    /// Members of the object at the path, raw.
    Entries,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The dot path, e.g. `a.b.2.c`. Empty means the whole document.
    #[arg(short, long, default_value = "")]
    path: String,

    #[arg(short, long, value_enum, default_value_t = Mode::Dump)]
    mode: Mode,

    /// Read numbers and booleans whatever kind the value is tagged with.
    #[arg(long)]
    coerce: bool,
}

fn run(args: &Args, document: &str) -> Result<Value, JsonStoreError> {
    let doc = JsonEntity::new(document);
    let path = args.path.as_str();
    let not_found = || JsonStoreError::NotFound(args.path.clone());

    let result = match args.mode {
        Mode::Dump => doc.dump(path).map(|s| json!(s)),
        Mode::String => doc.as_str(path).map(|s| json!(s)),
        Mode::Number if args.coerce => doc.coerce_number(path).map(|n| json!(n)),
        Mode::Number => doc.as_number(path).map(|n| json!(n)),
        Mode::Bool if args.coerce => doc.coerce_bool(path).map(|b| json!(b)),
        Mode::Bool => doc.as_bool(path).map(|b| json!(b)),
        Mode::Null => doc.is_null(path).map(|b| json!(b)),
        Mode::Exists => Some(json!(doc.exists(path))),
        Mode::Kind => doc.capture(path).map(|e| json!(e.kind().as_str())),
        Mode::Value => match doc.try_value(path)? {
            Some((value, kind)) => Some(json!({"kind": kind.as_str(), "value": value})),
            None => None,
        },
        Mode::Simple => doc.try_serialize(path, Depth::Simple)?,
        Mode::Nested => doc.try_serialize(path, Depth::Nested)?,
        Mode::Array => doc
            .as_array(path)
            .map(|items| items.iter().map(|e| json!(e.text())).collect()),
        Mode::Entries => doc.entries(path).map(|entries| {
            entries
                .iter()
                .map(|(k, e)| json!([k, e.text()]))
                .collect()
        }),
    };
    result.ok_or_else(not_found)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut document = String::new();
    io::stdin()
        .read_to_string(&mut document)
        .map_err(JsonStoreError::from)?;
    log::debug!("read {} bytes, mode {:?}", document.len(), args.mode);

    let result = run(&args, &document)?;
    println!("{}", result);
    Ok(())
}
