use nulfield::{
    decode, decode_with_options, encode, encode_with_options, from_reader, to_bytes, to_value,
    to_writer, value, DecodeOptions, EncodeOptions, Entry, Error, Number, Value,
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    tags: Vec<String>,
}

#[derive(Serialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

fn pair(k: &str, v: &str) -> Entry {
    Entry::Pair(k.to_string(), v.to_string())
}

#[test]
fn test_flat_pairs_round_trip() {
    let pairs = [("host", "localhost"), ("port", "8080"), ("mode", "")];
    let values: Vec<Value> = pairs
        .iter()
        .flat_map(|(k, v)| [Value::from(*k), Value::from(*v)])
        .collect();

    let bytes = encode(&values).unwrap();
    let entries = decode(&bytes).unwrap();

    let expected: Vec<Entry> = pairs.iter().map(|(k, v)| pair(k, v)).collect();
    assert_eq!(entries, expected);
}

#[test]
fn test_empty_inputs() {
    assert!(encode(&[]).unwrap().is_empty());
    assert!(decode(&[]).unwrap().is_empty());
}

#[test]
fn test_bare_trailing_key() {
    let mut bytes = encode(&[value!("k"), value!("v")]).unwrap();
    bytes.extend_from_slice(b"dangling");

    let entries = decode(&bytes).unwrap();
    assert_eq!(entries, vec![pair("k", "v"), Entry::Key("dangling".to_string())]);
}

#[test]
fn test_integer_and_float_render_differently() {
    let int_bytes = encode(&[value!(42)]).unwrap();
    let float_bytes = encode(&[value!(42.0)]).unwrap();

    assert_eq!(int_bytes, b"42\0");
    assert_eq!(float_bytes, b"42.0\0");
    assert_ne!(int_bytes, float_bytes);
}

#[test]
fn test_container_flattening() {
    let bytes = encode(&[value!([["a", "b"], "c"])]).unwrap();
    assert_eq!(bytes, b"a\0b\0c\0");

    let entries = decode(&bytes).unwrap();
    assert_eq!(entries, vec![pair("a", "b")]);
}

#[test]
fn test_mapping_flattening() {
    let bytes = encode(&[value!({"k1": "v1", "k2": "v2"})]).unwrap();
    assert_eq!(bytes, b"k1\0v1\0k2\0v2\0");
    assert_eq!(decode(&bytes).unwrap(), vec![pair("k1", "v1"), pair("k2", "v2")]);
}

#[test]
fn test_unsupported_type_rejected_without_partial_output() {
    let result = encode(&[value!("fine"), value!({"nested": [1, null]})]);
    assert_eq!(result, Err(Error::unsupported_type("null")));
}

#[test]
fn test_malformed_utf8_rejected_without_partial_output() {
    let result = decode(b"good\0pair\0bad\xc3\x28\0value\0");
    match result {
        Err(Error::InvalidEncoding { start, end, .. }) => {
            assert_eq!((start, end), (10, 15));
        }
        other => panic!("Expected InvalidEncoding, got {:?}", other),
    }
}

#[test]
fn test_mixed_leaves_regroup_as_pairs() {
    let bytes = encode(&[value!("a"), value!(1), value!([2, 3])]).unwrap();
    assert_eq!(bytes, b"a\x001\x002\x003\0");
    assert_eq!(decode(&bytes).unwrap(), vec![pair("a", "1"), pair("2", "3")]);
}

#[test]
fn test_concatenated_buffer_decodes_as_single_key() {
    let bytes =
        encode_with_options(&[value!("a"), value!(1), value!([2, 3])], EncodeOptions::concatenated())
            .unwrap();
    assert_eq!(bytes, b"a123");
    assert_eq!(decode(&bytes).unwrap(), vec![Entry::Key("a123".to_string())]);
}

#[test]
fn test_raw_bytes_with_separator_shift_roles() {
    let bytes = encode(&[value!("k"), Value::from(&b"x\0y"[..]), value!("k2"), value!("v2")]).unwrap();
    let entries = decode(&bytes).unwrap();
    assert_eq!(entries, vec![pair("k", "x"), pair("y", "k2")]);

    let strict = EncodeOptions::new().with_strict_fields(true);
    let err = encode_with_options(&[value!("k"), Value::from(&b"x\0y"[..])], strict).unwrap_err();
    assert_eq!(err, Error::SeparatorInField { index: 1 });
}

#[test]
fn test_struct_through_serde() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let bytes = to_bytes(&user).unwrap();
    assert_eq!(bytes, b"id\x00123\0name\0Alice\0tags\0admin\0developer\0");

    // "developer" lands in the key role with nothing after its separator.
    let entries = decode(&bytes).unwrap();
    assert_eq!(
        entries,
        vec![pair("id", "123"), pair("name", "Alice"), pair("tags", "admin")]
    );
}

#[test]
fn test_float_fields_through_serde() {
    let products = vec![
        Product {
            sku: "WIDGET-001".to_string(),
            price: 29.0,
            quantity: 2,
        },
        Product {
            sku: "GADGET-002".to_string(),
            price: 0.00001,
            quantity: 10,
        },
    ];

    let bytes = to_bytes(&products).unwrap();
    let entries = decode(&bytes).unwrap();
    assert_eq!(
        entries,
        vec![
            pair("sku", "WIDGET-001"),
            pair("price", "29.0"),
            pair("quantity", "2"),
            pair("sku", "GADGET-002"),
            pair("price", "1e-05"),
            pair("quantity", "10"),
        ]
    );
}

#[derive(Serialize)]
struct Reading {
    sensor: &'static str,
    celsius: f32,
}

#[test]
fn test_f32_fields_render_shortest_digits() {
    let bytes = to_bytes(&Reading {
        sensor: "t1",
        celsius: 0.1,
    })
    .unwrap();
    assert_eq!(bytes, b"sensor\0t1\0celsius\x000.1\0");

    assert_eq!(encode(&[Value::from(0.1f32)]).unwrap(), b"0.1\0");
    assert_eq!(encode(&[Value::from(-2.75f32)]).unwrap(), b"-2.75\0");
}

#[test]
fn test_btreemap_iteration_order() {
    let mut map = BTreeMap::new();
    map.insert("zeta", 1);
    map.insert("alpha", 2);

    let bytes = to_bytes(&map).unwrap();
    assert_eq!(bytes, b"alpha\x002\0zeta\x001\0");
}

#[test]
fn test_to_value_large_integers() {
    let value = to_value(&u128::MAX).unwrap();
    match value {
        Value::Number(Number::BigInt(ref bi)) => {
            assert_eq!(bi.to_string(), "340282366920938463463374607431768211455");
        }
        other => panic!("Expected BigInt, got {:?}", other),
    }
    assert_eq!(
        encode(&[value]).unwrap(),
        b"340282366920938463463374607431768211455\0"
    );
}

#[test]
fn test_writer_and_reader() {
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &[("k1", "v1"), ("k2", "v2")]).unwrap();

    let entries = from_reader(std::io::Cursor::new(buffer)).unwrap();
    assert_eq!(entries, vec![pair("k1", "v1"), pair("k2", "v2")]);
}

#[test]
fn test_decode_limit() {
    let bytes = encode(&[value!("key"), value!("value")]).unwrap();

    let roomy = DecodeOptions::new().with_max_input_len(bytes.len());
    assert_eq!(decode_with_options(&bytes, roomy).unwrap(), vec![pair("key", "value")]);

    let tight = DecodeOptions::new().with_max_input_len(bytes.len() - 1);
    assert_eq!(
        decode_with_options(&bytes, tight),
        Err(Error::InputTooLarge {
            len: bytes.len(),
            max: bytes.len() - 1
        })
    );
}
