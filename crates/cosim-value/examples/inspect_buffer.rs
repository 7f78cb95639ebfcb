//! Prints every extraction of a tagged value buffer.
//!
//! Usage: `inspect_buffer <file> [tag]`, where `tag` is a data type name such
//! as `double`, `named_point` or `any` (default). Set `RUST_LOG=debug` to see
//! sentinel recoveries.

use std::fs;

use cosim_value::{
    extract_from_bytes, value_from_bytes, Complex, DataType, NamedPoint, Time, Value,
};
use tracing_subscriber::EnvFilter;

fn show<T: std::fmt::Debug>(label: &str, result: Result<T, cosim_value::ExtractError>) {
    match result {
        Ok(v) => println!("  {:<16} {:?}", label, v),
        Err(e) => println!("  {:<16} error ({}): {}", label, e.kind().as_str(), e),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().expect("usage: inspect_buffer <file> [tag]");
    let tag: DataType = args
        .next()
        .as_deref()
        .unwrap_or("any")
        .parse()
        .expect("unknown data type name");

    let data = fs::read(&path).expect("Failed to read file");
    println!("Reading: {} ({} bytes, tag {} / code {})", path, data.len(), tag, tag.code());

    match value_from_bytes(&data, tag) {
        Ok(value) => println!("Decoded: {:?} [{}]", value, value.data_type()),
        Err(e) => {
            println!("Decode failed: {}", e);
            return;
        }
    }

    println!("\n=== Extractions ===");
    show("f64", extract_from_bytes::<f64>(&data, tag));
    show("f32", extract_from_bytes::<f32>(&data, tag));
    show("i64", extract_from_bytes::<i64>(&data, tag));
    show("i32", extract_from_bytes::<i32>(&data, tag));
    show("bool", extract_from_bytes::<bool>(&data, tag));
    show("char", extract_from_bytes::<char>(&data, tag));
    show("string", extract_from_bytes::<String>(&data, tag));
    show("complex", extract_from_bytes::<Complex>(&data, tag));
    show("vector", extract_from_bytes::<Vec<f64>>(&data, tag));
    show("complex_vector", extract_from_bytes::<Vec<Complex>>(&data, tag));
    show("named_point", extract_from_bytes::<NamedPoint>(&data, tag));
    show("time", extract_from_bytes::<Time>(&data, tag));
    show("value", extract_from_bytes::<Value>(&data, tag));
}
