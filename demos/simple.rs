//! Encoding a struct and reading the fields back.
//!
//! Run with: cargo run --example simple

use nulfield::{decode, to_bytes, Entry};
use serde::Serialize;
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    email: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let user = User {
        id: 42,
        name: "Alice Johnson".to_string(),
        email: "alice@example.com".to_string(),
    };

    let bytes = to_bytes(&user)?;
    println!("Encoded {} bytes: {:?}\n", bytes.len(), String::from_utf8_lossy(&bytes));

    for entry in decode(&bytes)? {
        match entry {
            Entry::Pair(key, value) => println!("{:>6} = {}", key, value),
            Entry::Key(key) => println!("{:>6} (no value)", key),
        }
    }

    Ok(())
}
