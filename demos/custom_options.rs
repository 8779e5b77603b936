//! Customizing encoding and decoding with options.
//!
//! Run with: cargo run --example custom_options

use nulfield::{
    decode_with_options, encode_with_options, value, DecodeOptions, EncodeOptions, Value,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let values = [value!("id"), value!(7), value!("tags"), value!(["a", "b"])];

    let delimited = encode_with_options(&values, EncodeOptions::new())?;
    println!("Delimited:    {:?}", String::from_utf8_lossy(&delimited));

    let concatenated = encode_with_options(&values, EncodeOptions::concatenated())?;
    println!("Concatenated: {:?}", String::from_utf8_lossy(&concatenated));

    // Raw bytes containing the separator would shift every later field.
    let risky = [value!("blob"), Value::from(&b"a\0b"[..])];
    let strict = EncodeOptions::new().with_strict_fields(true);
    match encode_with_options(&risky, strict) {
        Ok(_) => println!("\nunexpectedly accepted a separator"),
        Err(e) => println!("\nStrict mode: {}", e),
    }

    // Bound buffers from untrusted sources before decoding.
    let limited = DecodeOptions::new().with_max_input_len(8);
    match decode_with_options(&delimited, limited) {
        Ok(entries) => println!("Decoded {} entries", entries.len()),
        Err(e) => println!("Limited decode: {}", e),
    }

    Ok(())
}
