//! Property-based tests - pragmatic approach testing core roundtrip guarantees
//!
//! Generated `Value` trees must survive the writer and the reader unchanged,
//! and typed values must survive the full serde round trip.

use num_bigint::BigInt;
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_ziggy::{from_str, parse, to_string, to_string_pretty, Fields, Struct, Value};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,6}".prop_filter("keywords are not identifiers", |s| {
        !matches!(s.as_str(), "true" | "false" | "null")
    })
}

fn multiline_text() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<String>(), 2..5).prop_map(|lines| lines.join("\n"))
}

fn ends_a_line_with_cr(text: &str) -> bool {
    text.split('\n').any(|line| line.ends_with('\r'))
}

fn single_line_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..24)
        .prop_map(|bytes| bytes.into_iter().filter(|b| *b != b'\n').collect())
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<i128>().prop_map(|i| Value::Int(BigInt::from(i) * BigInt::from(u64::MAX))),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::Float),
        single_line_bytes().prop_map(Value::Bytes),
        any::<String>()
            .prop_filter("single line", |s| !s.contains('\n'))
            .prop_map(Value::from),
        multiline_text().prop_map(Value::from),
    ]
}

fn fields(inner: BoxedStrategy<Value>, min: usize) -> impl Strategy<Value = Fields> {
    prop::collection::vec((identifier(), inner), min..4)
        .prop_map(|pairs| pairs.into_iter().collect())
        .prop_filter("duplicate names collapse", move |fields: &Fields| fields.len() >= min)
}

fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec((inner.clone(), inner.clone()), 0..4).prop_map(Value::Map),
            (identifier(), inner.clone()).prop_map(|(name, v)| Value::tag(name, v)),
            fields(inner.clone(), 1).prop_map(|fields| Value::Struct(Struct { name: None, fields })),
            (identifier(), fields(inner, 0)).prop_map(|(name, fields)| {
                Value::Struct(Struct {
                    name: Some(name),
                    fields,
                })
            }),
        ]
    })
}

proptest! {
    #[test]
    fn prop_value_roundtrip(v in value()) {
        let compact = to_string(&v).unwrap();
        prop_assert_eq!(&parse(&compact).unwrap(), &v, "compact text: {}", compact);
        let pretty = to_string_pretty(&v).unwrap();
        prop_assert_eq!(&parse(&pretty).unwrap(), &v, "pretty text: {}", pretty);
    }

    #[test]
    fn prop_value_through_serde(v in value()) {
        prop_assert_eq!(from_str::<Value>(&to_string(&v).unwrap()).unwrap(), v.clone());
        prop_assert_eq!(serde_ziggy::to_value(&v).unwrap(), v);
    }

    #[test]
    fn prop_writer_is_deterministic(v in value()) {
        prop_assert_eq!(to_string(&v).unwrap(), to_string(&v).unwrap());
        prop_assert_eq!(v.to_string(), to_string(&v).unwrap());
    }

    #[test]
    fn prop_multiline_bytes_fidelity(text in multiline_text()) {
        let written = to_string(&text).unwrap();
        if ends_a_line_with_cr(&text) {
            prop_assert!(written.starts_with('"'));
        } else {
            prop_assert!(written.starts_with("\\\\"));
        }
        prop_assert_eq!(from_str::<String>(&written).unwrap(), text.clone());
        let pretty = to_string_pretty(&vec![text.clone()]).unwrap();
        prop_assert_eq!(from_str::<Vec<String>>(&pretty).unwrap(), vec![text]);
    }

    #[test]
    fn prop_quoted_bytes_fidelity(bytes in single_line_bytes()) {
        let value = Value::Bytes(bytes);
        let written = to_string(&value).unwrap();
        prop_assert!(written.starts_with('"'));
        prop_assert_eq!(parse(&written).unwrap(), value);
    }

    // Typed round trips
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u128(n in any::<u128>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&b));
    }

    #[test]
    fn prop_f64(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert!(roundtrip(&f));
    }

    #[test]
    fn prop_string(s in any::<String>().prop_filter("single line", |s| !s.contains('\n'))) {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(&opt));
    }

    #[test]
    fn prop_tuple_i32_bool(t in (any::<i32>(), any::<bool>())) {
        prop_assert!(roundtrip(&t));
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
struct Record {
    id: u32,
    label: String,
    score: Option<f64>,
    kind: Kind,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
enum Kind {
    Plain,
    Weighted(i64),
    Pair(u8, bool),
    Named { alias: String },
}

fn kind() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::Plain),
        any::<i64>().prop_map(Kind::Weighted),
        (any::<u8>(), any::<bool>()).prop_map(|(a, b)| Kind::Pair(a, b)),
        "[a-z]{0,6}".prop_map(|alias| Kind::Named { alias }),
    ]
}

fn record() -> impl Strategy<Value = Record> {
    (
        any::<u32>(),
        "[a-zA-Z0-9 \n\r\u{1b}]{0,16}",
        proptest::option::of(-1e6f64..1e6f64),
        kind(),
    )
        .prop_map(|(id, label, score, kind)| Record {
            id,
            label,
            score,
            kind,
        })
}

proptest! {
    #[test]
    fn prop_records(records in prop::collection::vec(record(), 0..8)) {
        prop_assert!(roundtrip(&records));
        let pretty = to_string_pretty(&records).unwrap();
        prop_assert_eq!(from_str::<Vec<Record>>(&pretty).unwrap(), records);
    }
}
