//! Tests for the generated descriptor registration: derive output must be
//! indistinguishable from hand-built registration.

use std::collections::HashMap;

use objbind::{
    decode_as, resolved_fields, DecodeError, DecodeOptions, DescriptorBuilder, Primitive, Record,
    ScalarKind, TypeRef,
};
use serde_json::json;

#[derive(Record)]
#[allow(dead_code)]
struct Person {
    name: String,
    age: i64,
}

#[test]
fn derived_descriptors_match_hand_built_ones() {
    let built = DescriptorBuilder::new("Person")
        .field("name", TypeRef::str())
        .field("age", TypeRef::int())
        .build();
    let derived = Person::descriptor();
    assert_eq!(derived.name, built.name);
    assert_eq!(derived.fields, built.fields);
    assert_eq!(derived.constructible, built.constructible);
}

#[derive(Record)]
#[allow(dead_code)]
struct Kitchen {
    #[record(rename = "ovenCount")]
    oven_count: i64,
}

#[test]
fn renamed_fields_use_the_mapped_name() {
    let fields = resolved_fields(Kitchen::descriptor());
    assert!(fields.contains_key("ovenCount"));
    assert!(!fields.contains_key("oven_count"));
}

#[derive(Record)]
#[allow(dead_code)]
struct Mixed {
    label: Option<String>,
    blob: Vec<u8>,
    tags: Vec<String>,
    lookup: HashMap<String, i64>,
    owner: Person,
}

#[test]
fn field_types_map_by_shape() {
    let fields = resolved_fields(Mixed::descriptor());
    assert_eq!(fields["label"], TypeRef::Scalar(ScalarKind::Str));
    assert_eq!(fields["blob"], TypeRef::Scalar(ScalarKind::Bytes));
    assert_eq!(fields["tags"], TypeRef::seq(TypeRef::str()));
    assert_eq!(fields["tags"].element_type(), Some(&TypeRef::str()));
    assert_eq!(fields["lookup"], TypeRef::map(TypeRef::int()));
    match &fields["owner"] {
        TypeRef::Record(f) => assert_eq!(f().name, "Person"),
        other => panic!("expected record ref, got {:?}", other),
    }
}

#[derive(Record)]
#[record(base = "Person")]
#[allow(dead_code)]
struct Employee {
    title: String,
    age: f64,
}

#[test]
fn base_fields_merge_in_declaration_order_with_own_overrides() {
    let fields = resolved_fields(Employee::descriptor());
    let names: Vec<_> = fields.keys().copied().collect();
    assert_eq!(names, vec!["name", "age", "title"]);
    // The override keeps the inherited position but takes the derived type.
    assert_eq!(fields["age"], TypeRef::float());
}

#[test]
fn inherited_fields_decode_like_own_fields() {
    let input = Primitive::from(json!({
        "name": "Sam",
        "age": 31.5,
        "title": "developer"
    }));
    let typed = decode_as::<Employee>(&input, &DecodeOptions::default()).unwrap();
    let rec = typed.as_record().unwrap();
    let rec = rec.borrow();
    assert_eq!(
        rec.get("name").and_then(|t| t.as_prim()).cloned(),
        Some(Primitive::Str("Sam".to_string()))
    );
    assert_eq!(
        rec.get("title").and_then(|t| t.as_prim()).cloned(),
        Some(Primitive::Str("developer".to_string()))
    );
}

#[derive(Record)]
#[record(requires_args)]
#[allow(dead_code)]
struct Opaque {
    token: String,
}

#[test]
fn requires_args_marks_the_type_unconstructible() {
    let err = objbind::ensure_constructible(Opaque::descriptor()).unwrap_err();
    assert_eq!(
        err,
        DecodeError::NotZeroArgConstructible {
            type_name: "Opaque"
        }
    );
    let input = Primitive::from(json!({"token": "t"}));
    let err = decode_as::<Opaque>(&input, &DecodeOptions::default()).unwrap_err();
    assert_eq!(
        err,
        DecodeError::ConstructorRequiresArguments {
            type_name: "Opaque"
        }
    );
}
