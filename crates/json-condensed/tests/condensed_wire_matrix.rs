use json_condensed::condensed::constants::*;
use json_condensed::{
    decode_condensed, encode_condensed, CondensedError, Number, Precision, Value,
};

fn obj(fields: &[(&str, Value)]) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect(),
    )
}

fn int(value: i64) -> Value {
    Value::from(value)
}

#[test]
fn integer_narrowing_matrix() {
    let cases: Vec<(i64, Vec<u8>)> = vec![
        // Minimal integers: one byte, sign-extended 5-bit payload.
        (0, vec![0x40]),
        (1, vec![0x41]),
        (15, vec![0x4f]),
        (-1, vec![0x5f]),
        (-16, vec![0x50]),
        // Very short integers: 12-bit signed, high nibble in the tag.
        (16, vec![0x10, 0x10]),
        (-17, vec![0x1f, 0xef]),
        (2047, vec![0x17, 0xff]),
        (-2048, vec![0x18, 0x00]),
        // Signed/unsigned 16-bit.
        (2048, vec![0x09, 0x00, 0x08]),
        (-2049, vec![0x09, 0xff, 0xf7]),
        (32767, vec![0x09, 0xff, 0x7f]),
        (-32768, vec![0x09, 0x00, 0x80]),
        (32768, vec![0x08, 0x00, 0x80]),
        (65535, vec![0x08, 0xff, 0xff]),
        // Signed/unsigned 32-bit.
        (65536, vec![0x0b, 0x00, 0x00, 0x01, 0x00]),
        (2147483647, vec![0x0b, 0xff, 0xff, 0xff, 0x7f]),
        (-2147483648, vec![0x0b, 0x00, 0x00, 0x00, 0x80]),
        (2147483648, vec![0x0a, 0x00, 0x00, 0x00, 0x80]),
        (4294967295, vec![0x0a, 0xff, 0xff, 0xff, 0xff]),
        // 64-bit.
        (
            4294967296,
            vec![0x0d, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00],
        ),
        (
            i64::MIN,
            vec![0x0d, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80],
        ),
    ];
    for (value, expected) in cases {
        let encoded = encode_condensed(&int(value));
        assert_eq!(encoded, expected, "wire bytes for {value}");
        assert_eq!(
            decode_condensed(&encoded).unwrap(),
            int(value),
            "roundtrip for {value}"
        );
    }
}

#[test]
fn integral_doubles_past_i64_use_the_unsigned_long_tag() {
    let value = Value::from(9_223_372_036_854_775_808.0);
    let encoded = encode_condensed(&value);
    assert_eq!(
        encoded,
        [0x0c, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80]
    );
    assert_eq!(decode_condensed(&encoded).unwrap(), value);
    // Past u64 the value takes the double form instead.
    let huge = Value::from(1e20);
    assert_eq!(encode_condensed(&huge)[0], DOUBLE);
    assert_eq!(decode_condensed(&encode_condensed(&huge)).unwrap(), huge);
}

#[test]
fn float_precision_selection() {
    // Low mantissa bits all clear: the 15-bit form is exact.
    let half = encode_condensed(&Value::from(0.5));
    assert_eq!(half, [0x9e, 0x00]);
    assert_eq!(decode_condensed(&half).unwrap(), Value::from(0.5));

    // Magnitude outside the 15-bit exponent range picks single precision.
    let single = encode_condensed(&Value::from(1.0e-20));
    assert_eq!(single[0], FLOAT);
    assert_eq!(&single[1..], (1.0e-20f32).to_le_bytes());

    // Magnitude outside f32 entirely picks double precision.
    let double = encode_condensed(&Value::from(1.0e300));
    assert_eq!(double[0], DOUBLE);
    assert_eq!(&double[1..], 1.0e300f64.to_le_bytes());

    // Non-finite values are carried bit-exactly as doubles.
    let infinite = encode_condensed(&Value::from(f64::INFINITY));
    assert_eq!(infinite[0], DOUBLE);
    assert_eq!(
        decode_condensed(&infinite).unwrap().as_number().unwrap(),
        f64::INFINITY
    );
}

#[test]
fn half_precision_tolerance_and_hint() {
    let value = Value::from(3.14159);
    let encoded = encode_condensed(&value);
    assert_eq!(encoded.len(), 2);
    let decoded = decode_condensed(&encoded).unwrap();
    let back = decoded.as_number().unwrap();
    assert!(((back - 3.14159) / 3.14159).abs() <= 1.0 / 256.0);
    match decoded {
        Value::Number(n) => assert_eq!(n.hint, Some(Precision::Half)),
        _ => panic!("expected number"),
    }
}

#[test]
fn string_length_boundary() {
    let short = "s".repeat(29);
    let encoded = encode_condensed(&Value::from(short.as_str()));
    assert_eq!(encoded[0], SHORT_STRING | 29);
    assert_eq!(encoded.len(), 30);

    let long = "l".repeat(30);
    let encoded = encode_condensed(&Value::from(long.as_str()));
    assert_eq!(encoded[0], LONG_STRING);
    assert_eq!(encoded.len(), 32);
    assert_eq!(*encoded.last().unwrap(), TERMINATOR);
    assert_eq!(
        decode_condensed(&encoded).unwrap(),
        Value::from(long.as_str())
    );
}

#[test]
fn array_length_boundary() {
    let shorter: Vec<Value> = (0..14).map(|_| Value::Null).collect();
    let encoded = encode_condensed(&Value::Array(shorter.clone()));
    assert_eq!(encoded[0], SHORT_ARRAY | 14);
    assert_eq!(encoded.len(), 15);

    let longer: Vec<Value> = (0..15).map(|_| Value::Null).collect();
    let encoded = encode_condensed(&Value::Array(longer.clone()));
    assert_eq!(encoded[0], LONG_ARRAY);
    assert_eq!(*encoded.last().unwrap(), TERMINATOR);
    assert_eq!(decode_condensed(&encoded).unwrap(), Value::Array(longer));
}

#[test]
fn unique_object_encodings() {
    // One field: small unique with the inline shape key, no terminator.
    let one = obj(&[("k", Value::Null)]);
    assert_eq!(encode_condensed(&one), [0x31, b'k' | 0x80, NIL]);

    // Six fields: large unique with a terminated shape key.
    let six = obj(&[
        ("a", int(1)),
        ("b", int(2)),
        ("c", int(3)),
        ("d", int(4)),
        ("e", int(5)),
        ("f", int(6)),
    ]);
    let encoded = encode_condensed(&six);
    assert_eq!(
        encoded,
        [
            LARGE_UNIQUE_OBJECT,
            b'a' | 0x80,
            b'b' | 0x80,
            b'c' | 0x80,
            b'd' | 0x80,
            b'e' | 0x80,
            b'f' | 0x80,
            TERMINATOR,
            0x41,
            0x42,
            0x43,
            0x44,
            0x45,
            0x46,
        ]
    );
    assert_eq!(decode_condensed(&encoded).unwrap(), six);
}

#[test]
fn shape_encoded_fields_travel_in_sorted_key_order() {
    let scrambled = obj(&[("b", int(2)), ("a", int(1))]);
    let sorted = obj(&[("a", int(1)), ("b", int(2))]);
    assert_eq!(encode_condensed(&scrambled), encode_condensed(&sorted));
    assert_eq!(
        encode_condensed(&scrambled),
        [0x32, 0xe1, 0xe2, 0x41, 0x42]
    );
}

#[test]
fn empty_key_uses_the_shape_encoding() {
    // A lone "" key frames as a bare marker byte; it is representable and
    // does not force the hashtable fallback.
    let value = obj(&[("", int(5))]);
    let encoded = encode_condensed(&value);
    assert_eq!(encoded, [0x31, 0x80, 0x45]);
    assert_eq!(decode_condensed(&encoded).unwrap(), value);
}

#[test]
fn empty_key_sorts_first_in_shape_encoding() {
    let value = obj(&[("a", int(1)), ("", int(2))]);
    let encoded = encode_condensed(&value);
    assert_eq!(encoded, [0x32, 0x80, 0xe1, 0x42, 0x41]);
    assert_eq!(decode_condensed(&encoded).unwrap(), value);
}

#[test]
fn hashtable_fallback_for_high_bit_keys() {
    let value = obj(&[("caf\u{e9}", Value::Bool(true))]);
    let encoded = encode_condensed(&value);
    assert_eq!(encoded[0], HASHTABLE);
    assert_eq!(&encoded[1..7], b"caf\xc3\xa9\x00");
    assert_eq!(decode_condensed(&encoded).unwrap(), value);
}

#[test]
fn hashtable_empty_key_value_travels_last() {
    // An empty key only reaches the hashtable path alongside a key the
    // shape framing cannot carry; its value is written after the others,
    // marked by the extra terminator before the list terminator.
    let value = obj(&[("", int(2)), ("caf\u{e9}", int(1))]);
    let encoded = encode_condensed(&value);
    assert_eq!(
        encoded,
        [
            HASHTABLE, b'c', b'a', b'f', 0xc3, 0xa9, TERMINATOR, TERMINATOR, TERMINATOR,
            0x41, 0x42,
        ]
    );
    assert_eq!(decode_condensed(&encoded).unwrap(), value);
}

#[test]
fn repeated_shapes_use_the_common_band() {
    let element = |n: i64| obj(&[("a", int(n)), ("b", int(n + 1))]);
    let value = Value::Array(vec![element(1), element(3), element(5)]);
    let encoded = encode_condensed(&value);
    assert_eq!(
        encoded,
        [
            0x23, // three elements
            COMMON_OBJECT, 0xe1, 0xe2, TERMINATOR, 0x41, 0x42, // defines shape 0
            COMMON_OBJECT, 0x43, 0x44, COMMON_OBJECT, 0x45, 0x46,
        ]
    );
    assert_eq!(decode_condensed(&encoded).unwrap(), value);
}

#[test]
fn many_shapes_spill_into_uncommon_and_rare_bands() {
    // 300 distinct shapes, each seen twice, with equal counts: ties break
    // on the shape-key bytes, so key sNNN gets index NNN (skipping 5).
    let mut elements = Vec::new();
    for i in 0..300 {
        let key = format!("s{i:03}");
        let entries = obj(&[(key.as_str(), int(1))]);
        elements.push(entries.clone());
        elements.push(entries);
    }
    let value = Value::Array(elements);
    let encoded = encode_condensed(&value);

    // Shape s006 lands at index 7 -> UNCOMMON_OBJECT with payload 1.
    let uncommon = [UNCOMMON_OBJECT, 0x01];
    assert!(
        encoded
            .windows(uncommon.len())
            .any(|window| window == uncommon),
        "expected an uncommon-band reference"
    );
    // Shape s299 lands at index 300 -> RARE_OBJECT, big-endian 300 - 262.
    let rare = [RARE_OBJECT, 0x00, 0x26];
    assert!(
        encoded.windows(rare.len()).any(|window| window == rare),
        "expected a rare-band reference"
    );
    assert_eq!(decode_condensed(&encoded).unwrap(), value);
}

#[test]
fn shape_reuse_shrinks_payloads() {
    let element = |n: i64| {
        obj(&[
            ("id", int(n)),
            ("name", Value::from("sensor")),
            ("enabled", Value::Bool(n % 2 == 0)),
        ])
    };
    let value = Value::Array((0..40).map(element).collect());
    let condensed = encode_condensed(&value);
    let text = json_condensed::encode_text(&value);
    assert!(condensed.len() * 3 < text.len());
}

#[test]
fn reserved_and_unknown_tags_fail() {
    assert_eq!(
        decode_condensed(&[0x7e]),
        Err(CondensedError::VersionTooLow(0x7e))
    );
    assert_eq!(
        decode_condensed(&[0x3d]),
        Err(CondensedError::VersionTooLow(0x3d))
    );
    assert_eq!(
        decode_condensed(&[0x04]),
        Err(CondensedError::ReservedTag(0x04))
    );
    for tag in [0x05u8, 0x06, 0x07] {
        assert_eq!(
            decode_condensed(&[tag]),
            Err(CondensedError::UnknownTag(tag, 0))
        );
    }
    assert_eq!(
        decode_condensed(&[0x00]),
        Err(CondensedError::UnexpectedTerminator(0))
    );
}

#[test]
fn truncated_input_fails_at_every_tag() {
    let cases: Vec<Vec<u8>> = vec![
        vec![],
        vec![0x9e],                   // half missing mantissa
        vec![0x63, b'a'],             // short string cut
        vec![0x7f, b'a'],             // long string missing terminator
        vec![0x10],                   // very short integer missing low byte
        vec![0x09, 0x01],             // 16-bit integer cut
        vec![0x0b, 0x01, 0x02],       // 32-bit integer cut
        vec![0x0d, 0x01],             // 64-bit integer cut
        vec![0x0e, 0x01, 0x02],       // float cut
        vec![0x0f, 0x01],             // double cut
        vec![0x22, 0x41],             // short array missing an element
        vec![0x2f, 0x41],             // long array missing terminator
        vec![0x31],                   // small unique missing shape key
        vec![0x36, 0xe1],             // large unique missing terminator
        vec![0x37, b'a'],             // hashtable key cut
        vec![0x38, 0xe1],             // shape definition cut
        vec![0x3e],                   // uncommon index missing
        vec![0x3f, 0x00],             // rare index cut
        vec![0x32, 0xe1, 0xe2, 0x41], // fields truncated
    ];
    for bytes in cases {
        assert_eq!(
            decode_condensed(&bytes),
            Err(CondensedError::UnexpectedEof),
            "for {bytes:02x?}"
        );
    }
}

#[test]
fn dangling_shape_reference_fails() {
    // A first reference must carry its key list; an empty one is invalid.
    assert_eq!(
        decode_condensed(&[COMMON_OBJECT, TERMINATOR]),
        Err(CondensedError::InvalidShapeRef(0))
    );
    assert_eq!(
        decode_condensed(&[UNCOMMON_OBJECT, 0x00, TERMINATOR]),
        Err(CondensedError::InvalidShapeRef(6))
    );
    assert_eq!(
        decode_condensed(&[RARE_OBJECT, 0x00, 0x00, TERMINATOR]),
        Err(CondensedError::InvalidShapeRef(262))
    );
}

#[test]
fn decoded_integer_tags_leave_no_hint() {
    for bytes in [vec![0x41u8], vec![0x09, 0x00, 0x08]] {
        match decode_condensed(&bytes).unwrap() {
            Value::Number(Number { hint, .. }) => assert_eq!(hint, None),
            other => panic!("expected number, got {other:?}"),
        }
    }
}

#[test]
fn trailing_bytes_are_ignored() {
    assert_eq!(decode_condensed(&[0x03, 0xff, 0xff]).unwrap(), Value::Bool(true));
}
