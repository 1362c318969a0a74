use num_bigint::BigInt;
use serde_ziggy::{from_value, parse, ziggy, Struct, Value};

#[test]
fn test_ziggy_macro_null() {
    let value = ziggy!(null);
    assert_eq!(value, Value::Null);
}

#[test]
fn test_ziggy_macro_booleans() {
    let true_val = ziggy!(true);
    assert_eq!(true_val, Value::Bool(true));

    let false_val = ziggy!(false);
    assert_eq!(false_val, Value::Bool(false));
}

#[test]
fn test_ziggy_macro_numbers() {
    let int_val = ziggy!(42);
    assert_eq!(int_val, Value::Int(BigInt::from(42)));

    let float_val = ziggy!(3.5);
    assert_eq!(float_val, Value::Float(3.5));

    let negative_val = ziggy!(-123);
    assert_eq!(negative_val, Value::Int(BigInt::from(-123)));

    let big = ziggy!(u128::MAX);
    assert_eq!(big, Value::Int(BigInt::from(u128::MAX)));
}

#[test]
fn test_ziggy_macro_strings() {
    let string_val = ziggy!("hello world");
    assert_eq!(string_val, Value::Bytes(b"hello world".to_vec()));

    let empty_string = ziggy!("");
    assert_eq!(empty_string, Value::Bytes(vec![]));
}

#[test]
fn test_ziggy_macro_arrays() {
    let empty_array = ziggy!([]);
    assert_eq!(empty_array, Value::Array(vec![]));

    let mixed_array = ziggy!([1, "hello", true, null, -2.5]);
    assert_eq!(
        mixed_array,
        Value::Array(vec![
            Value::from(1),
            Value::from("hello"),
            Value::Bool(true),
            Value::Null,
            Value::Float(-2.5),
        ])
    );
}

#[test]
fn test_ziggy_macro_maps() {
    let empty_map = ziggy!({});
    assert_eq!(empty_map, Value::Map(vec![]));

    let simple_map = ziggy!({
        "name": "Alice",
        "age": 30
    });
    let entries = simple_map.as_map().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(simple_map.get("name").and_then(Value::as_str), Some("Alice"));
    assert_eq!(simple_map.get("age").and_then(Value::as_i64), Some(30));
}

#[test]
fn test_ziggy_macro_structs() {
    let point = ziggy!(Point { .x = 1, .y = 2 });
    assert_eq!(
        point,
        Value::Struct(Struct::named("Point").with_field("x", 1).with_field("y", 2))
    );

    let anonymous = ziggy!({ x = 1, y = 2, });
    assert_eq!(anonymous.as_struct().and_then(|s| s.name.as_deref()), None);
    assert_eq!(anonymous.get("y").and_then(Value::as_i64), Some(2));
}

#[test]
fn test_ziggy_macro_matches_parser() {
    let built = ziggy!(Config {
        .name = "edge",
        .ports = [80, 443],
        .owner = { .id = 7, .email = @email("ops@example.com") },
        .weights = { "eu": 0.7, "us": 0.3 },
        .mode = Active(null),
        .labels = {},
    });
    let parsed = parse(
        r#"Config {
            .name = "edge",
            .ports = [80, 443],
            .owner = {.id = 7, .email = email "ops@example.com"},
            .weights = {"eu": 0.7, "us": 0.3},
            .mode = Active null,
            .labels = {},
        }"#,
    )
    .unwrap();
    assert_eq!(built, parsed);
}

#[test]
fn test_ziggy_macro_nested() {
    let nested = ziggy!({
        "user": {
            .id = 123,
            .name = "Bob",
            .active = true
        },
        "tags": ["admin", "developer"],
        "count": 42
    });

    let user = nested.get("user").and_then(Value::as_struct).unwrap();
    assert_eq!(user.get("id"), Some(&Value::from(123)));
    assert_eq!(user.get("name"), Some(&Value::from("Bob")));
    assert_eq!(user.get("active"), Some(&Value::Bool(true)));

    let tags = nested.get("tags").and_then(Value::as_array).unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].as_str(), Some("admin"));

    assert_eq!(nested.get("count").and_then(Value::as_u64), Some(42));
}

#[test]
fn test_ziggy_macro_interpolation() {
    let id = 9u64;
    let names = vec!["a", "b"];
    let inner = ziggy!(Leaf {});
    let value = ziggy!({ .id = id, .names = names, .child = inner });

    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Node {
        id: u64,
        names: Vec<String>,
        child: Value,
    }

    let node: Node = from_value(value).unwrap();
    assert_eq!(node.id, 9);
    assert_eq!(node.names, ["a", "b"]);
    assert_eq!(node.child, Value::Struct(Struct::named("Leaf")));
}

#[test]
fn test_ziggy_value_methods() {
    let null_val = ziggy!(null);
    assert!(null_val.is_null());
    assert!(!null_val.is_bool());
    assert!(!null_val.is_int());
    assert!(!null_val.is_bytes());
    assert!(!null_val.is_array());
    assert!(!null_val.is_map());
    assert!(!null_val.is_struct());

    let bool_val = ziggy!(true);
    assert!(bool_val.is_bool());
    assert_eq!(bool_val.as_bool(), Some(true));

    let str_val = ziggy!("hello");
    assert!(str_val.is_bytes());
    assert_eq!(str_val.as_str(), Some("hello"));

    let tag_val = ziggy!(date("2024-01-15"));
    assert!(tag_val.is_tag());
    assert_eq!(tag_val.as_tag(), Some(("date", &Value::from("2024-01-15"))));
    assert_eq!(tag_val.untagged().as_str(), Some("2024-01-15"));
    assert!(tag_val.as_date().is_none());
}
