//! Building values with the value! macro.
//!
//! Run with: cargo run --example macro

use nulfield::{decode, encode, value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let settings = value!({
        "host": "localhost",
        "port": 8080,
        "ratio": 0.75
    });
    println!("Value: {}", settings);

    let bytes = encode(&[settings])?;
    println!("Bytes: {:?}", bytes);

    for entry in decode(&bytes)? {
        println!("  {}", entry);
    }

    // Integers and floats keep their own text form.
    let numbers = encode(&[value!(42), value!(42.0), value!(1e16)])?;
    println!("Numbers: {:?}", String::from_utf8_lossy(&numbers));

    Ok(())
}
