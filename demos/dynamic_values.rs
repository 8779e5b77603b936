//! Working with Value and the limits of the key/value grammar.
//!
//! Run with: cargo run --example dynamic_values

use nulfield::{decode, encode, to_value, value, Value};
use serde::Serialize;
use std::error::Error;

#[derive(Debug, Serialize)]
struct Release {
    name: String,
    version: (u32, u32, u32),
}

fn main() -> Result<(), Box<dyn Error>> {
    let release = Release {
        name: "nulfield".to_string(),
        version: (0, 1, 0),
    };

    let release_value = to_value(&release)?;
    println!("As Value: {}", release_value);

    if let Some(map) = release_value.as_map() {
        if let Some(Value::Array(parts)) = map.get(&value!("version")) {
            println!("version has {} parts", parts.len());
        }
    }

    // Nested containers flatten into one stream of fields, and the decoder
    // simply pairs them up again.
    let bytes = encode(&[release_value])?;
    println!("\nDecoded entries:");
    for entry in decode(&bytes)? {
        println!("  {}", entry);
    }

    // Booleans and nulls have no field form.
    match encode(&[value!({"debug": true})]) {
        Ok(_) => println!("\nunexpectedly encoded a bool"),
        Err(e) => println!("\nRejected: {}", e),
    }

    Ok(())
}
