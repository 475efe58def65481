//! End-to-end: JSON-shaped input through decode and back through encode.

use objbind::{decode_as, encode, DecodeOptions, EncodeOptions, Primitive, Record};
use serde_json::json;

#[derive(Record)]
#[allow(dead_code)]
struct X {
    x: i64,
    y: String,
}

#[derive(Record)]
#[allow(dead_code)]
struct A {
    q: String,
    a: String,
    b: i64,
    c: Vec<X>,
}

#[test]
fn json_round_trip_with_coercion_and_extras() {
    let input = json!({
        "q": 9,
        "a": "Mark",
        "b": 3,
        "c": [
            {"x": 15, "y": "male"},
            {"x": 9, "y": "female", "z": 13}
        ]
    });
    let typed = decode_as::<A>(&Primitive::from(input), &DecodeOptions::default()).unwrap();
    let tree = encode(&typed, &EncodeOptions::default());
    assert_eq!(
        serde_json::Value::from(tree),
        json!({
            "q": "9",
            "a": "Mark",
            "b": 3,
            "c": [
                {"x": 15, "y": "male"},
                {"x": 9, "y": "female", "z": 13}
            ]
        })
    );
}

#[test]
fn json_round_trip_drops_extras_when_not_reserved() {
    let input = json!({
        "q": "9",
        "a": "Mark",
        "b": 3,
        "c": [{"x": 9, "y": "female", "z": 13}]
    });
    let opts = DecodeOptions::default().reserve_extra_attr(false);
    let typed = decode_as::<A>(&Primitive::from(input), &opts).unwrap();
    let tree = encode(&typed, &EncodeOptions::default());
    assert_eq!(
        serde_json::Value::from(tree),
        json!({
            "q": "9",
            "a": "Mark",
            "b": 3,
            "c": [{"x": 9, "y": "female"}]
        })
    );
}

#[derive(Record)]
#[allow(dead_code)]
struct Flat {
    name: String,
    count: i64,
    ratio: f64,
    active: bool,
}

#[test]
fn scalar_only_records_round_trip_exactly() {
    // Exactly the declared fields, no extras, no missing: encode(decode(v)) == v.
    let input = Primitive::from(json!({
        "name": "unit",
        "count": 4,
        "ratio": 0.5,
        "active": true
    }));
    let typed = decode_as::<Flat>(&input, &DecodeOptions::default()).unwrap();
    let tree = encode(&typed, &EncodeOptions::default());
    assert_eq!(tree, input);
}

#[test]
fn sequence_order_is_preserved_through_both_directions() {
    let input = json!({
        "q": "q",
        "a": "a",
        "b": 1,
        "c": [
            {"x": 3, "y": "c"},
            {"x": 1, "y": "a"},
            {"x": 2, "y": "b"}
        ]
    });
    let typed = decode_as::<A>(&Primitive::from(input.clone()), &DecodeOptions::default()).unwrap();
    let tree = encode(&typed, &EncodeOptions::default());
    let out = serde_json::Value::from(tree);
    let xs: Vec<i64> = out["c"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["x"].as_i64().unwrap())
        .collect();
    assert_eq!(xs, vec![3, 1, 2]);
}
