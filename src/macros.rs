//! The `ziggy!` macro for building [`Value`](crate::Value)s with Ziggy-like syntax.
//!
//! ```rust
//! use serde_ziggy::{ziggy, Value};
//!
//! let config = ziggy!({
//!     .name = "demo",
//!     .ports = [80, 443],
//!     .limits = { "cpu": 2, "mem": "1G" },
//!     .owner = User { .id = 7 },
//!     .created = date("2024-01-15"),
//! });
//! assert_eq!(
//!     config.to_string(),
//!     "{name = \"demo\", ports = [80, 443], limits = {\"cpu\": 2, \"mem\": \"1G\"}, \
//!      owner = User {id = 7}, created = date \"2024-01-15\"}"
//! );
//! ```
//!
//! Anything else is treated as a Rust expression and converted with
//! [`to_value`](crate::to_value). `Name(...)` is always read as a tag, so wrap
//! function calls in parentheses: `ziggy!([(compute(1))])`.

#[macro_export]
macro_rules! ziggy {
    ($($tt:tt)+) => {
        $crate::ziggy_internal!($($tt)+)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! ziggy_internal {
    // Array elements, munched one token at a time up to each comma.
    (@elems $items:ident ()) => {};

    (@elems $items:ident [$($v:tt)+] (, $($rest:tt)*)) => {
        $items.push($crate::ziggy_internal!($($v)+));
        $crate::ziggy_internal!(@elems $items ($($rest)*));
    };

    (@elems $items:ident [$($v:tt)+] ()) => {
        $items.push($crate::ziggy_internal!($($v)+));
    };

    (@elems $items:ident [$($v:tt)*] ($next:tt $($rest:tt)*)) => {
        $crate::ziggy_internal!(@elems $items [$($v)* $next] ($($rest)*));
    };

    (@elems $items:ident ($($rest:tt)+)) => {
        $crate::ziggy_internal!(@elems $items [] ($($rest)+));
    };

    // Map entries: `key: value`
    (@entries $entries:ident ()) => {};

    (@entries $entries:ident ($key:tt : $($rest:tt)+)) => {
        $crate::ziggy_internal!(@entry $entries $key [] ($($rest)+));
    };

    (@entry $entries:ident $key:tt [$($v:tt)+] (, $($rest:tt)*)) => {
        $entries.push(($crate::ziggy_internal!($key), $crate::ziggy_internal!($($v)+)));
        $crate::ziggy_internal!(@entries $entries ($($rest)*));
    };

    (@entry $entries:ident $key:tt [$($v:tt)+] ()) => {
        $entries.push(($crate::ziggy_internal!($key), $crate::ziggy_internal!($($v)+)));
    };

    (@entry $entries:ident $key:tt [$($v:tt)*] ($next:tt $($rest:tt)*)) => {
        $crate::ziggy_internal!(@entry $entries $key [$($v)* $next] ($($rest)*));
    };

    // Struct fields: `.name = value`, the dot is optional
    (@fields $fields:ident ()) => {};

    (@fields $fields:ident (. $($rest:tt)+)) => {
        $crate::ziggy_internal!(@fields $fields ($($rest)+));
    };

    (@fields $fields:ident ($name:ident = $($rest:tt)+)) => {
        $crate::ziggy_internal!(@field $fields $name [] ($($rest)+));
    };

    (@field $fields:ident $name:ident [$($v:tt)+] (, $($rest:tt)*)) => {
        $fields.insert(stringify!($name).to_string(), $crate::ziggy_internal!($($v)+));
        $crate::ziggy_internal!(@fields $fields ($($rest)*));
    };

    (@field $fields:ident $name:ident [$($v:tt)+] ()) => {
        $fields.insert(stringify!($name).to_string(), $crate::ziggy_internal!($($v)+));
    };

    (@field $fields:ident $name:ident [$($v:tt)*] ($next:tt $($rest:tt)*)) => {
        $crate::ziggy_internal!(@field $fields $name [$($v)* $next] ($($rest)*));
    };

    (@struct $name:expr, $($body:tt)*) => {{
        let mut fields = $crate::Fields::new();
        $crate::ziggy_internal!(@fields fields ($($body)*));
        $crate::Value::Struct($crate::Struct { name: $name, fields })
    }};

    (@map $($body:tt)*) => {{
        let mut entries = ::std::vec::Vec::new();
        $crate::ziggy_internal!(@entries entries ($($body)*));
        $crate::Value::Map(entries)
    }};

    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(::std::vec::Vec::new())
    };

    ([ $($tt:tt)+ ]) => {{
        let mut items = ::std::vec::Vec::new();
        $crate::ziggy_internal!(@elems items ($($tt)+));
        $crate::Value::Array(items)
    }};

    ({}) => {
        $crate::Value::Map(::std::vec::Vec::new())
    };

    ({ . $($tt:tt)+ }) => {
        $crate::ziggy_internal!(@struct None, . $($tt)+)
    };

    ({ $field:ident = $($tt:tt)+ }) => {
        $crate::ziggy_internal!(@struct None, $field = $($tt)+)
    };

    ({ $($tt:tt)+ }) => {
        $crate::ziggy_internal!(@map $($tt)+)
    };

    ($name:ident {}) => {
        $crate::Value::Struct($crate::Struct::named(stringify!($name)))
    };

    ($name:ident { . $($tt:tt)+ }) => {
        $crate::ziggy_internal!(@struct Some(stringify!($name).to_string()), . $($tt)+)
    };

    ($name:ident { $field:ident = $($tt:tt)+ }) => {
        $crate::ziggy_internal!(@struct Some(stringify!($name).to_string()), $field = $($tt)+)
    };

    ($name:ident { $($tt:tt)+ }) => {
        $crate::Value::tag(stringify!($name), $crate::ziggy_internal!(@map $($tt)+))
    };

    (@ $tag:ident ( $($tt:tt)+ )) => {
        $crate::Value::tag(stringify!($tag), $crate::ziggy_internal!($($tt)+))
    };

    ($tag:ident ( $($tt:tt)+ )) => {
        $crate::Value::tag(stringify!($tag), $crate::ziggy_internal!($($tt)+))
    };

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Struct, Value};
    use num_bigint::BigInt;

    #[test]
    fn test_ziggy_macro_primitives() {
        assert_eq!(ziggy!(null), Value::Null);
        assert_eq!(ziggy!(true), Value::Bool(true));
        assert_eq!(ziggy!(false), Value::Bool(false));
        assert_eq!(ziggy!(42), Value::Int(BigInt::from(42)));
        assert_eq!(ziggy!(-7), Value::Int(BigInt::from(-7)));
        assert_eq!(ziggy!(3.5), Value::Float(3.5));
        assert_eq!(ziggy!("hello"), Value::Bytes(b"hello".to_vec()));
    }

    #[test]
    fn test_ziggy_macro_arrays() {
        assert_eq!(ziggy!([]), Value::Array(vec![]));

        let arr = ziggy!([1, -2, "three", [null],]);
        match arr {
            Value::Array(vec) => {
                assert_eq!(vec.len(), 4);
                assert_eq!(vec[0], Value::from(1));
                assert_eq!(vec[1], Value::from(-2));
                assert_eq!(vec[2], Value::from("three"));
                assert_eq!(vec[3], Value::Array(vec![Value::Null]));
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_ziggy_macro_maps() {
        assert_eq!(ziggy!({}), Value::Map(vec![]));

        let map = ziggy!({
            "name": "Alice",
            7: [1 + 1],
        });
        assert_eq!(
            map,
            Value::Map(vec![
                (Value::from("name"), Value::from("Alice")),
                (Value::from(7), Value::Array(vec![Value::from(2)])),
            ])
        );
    }

    #[test]
    fn test_ziggy_macro_structs() {
        let dotted = ziggy!({ .x = 1, .y = -1 });
        let bare = ziggy!({ x = 1, y = -1 });
        let expected = Value::Struct(Struct::new().with_field("x", 1).with_field("y", -1));
        assert_eq!(dotted, expected);
        assert_eq!(bare, expected);

        assert_eq!(ziggy!(Empty {}), Value::Struct(Struct::named("Empty")));
        assert_eq!(
            ziggy!(Point { .x = 1, .y = 2 }),
            Value::Struct(Struct::named("Point").with_field("x", 1).with_field("y", 2))
        );
    }

    #[test]
    fn test_ziggy_macro_tags() {
        assert_eq!(ziggy!(date("2024-01-15")), Value::tag("date", "2024-01-15"));
        assert_eq!(ziggy!(@date("2024-01-15")), Value::tag("date", "2024-01-15"));
        assert_eq!(
            ziggy!(Env { "HOME": "/root" }),
            Value::tag("Env", Value::Map(vec![(Value::from("HOME"), Value::from("/root"))]))
        );
        assert_eq!(
            ziggy!([Green(5), Red(null)]),
            Value::Array(vec![Value::tag("Green", 5), Value::tag("Red", Value::Null)])
        );
    }

    #[test]
    fn test_ziggy_macro_expressions() {
        let name = "dynamic";
        let count = 3u8;
        assert_eq!(
            ziggy!({ .name = name, .count = (count * 2) }),
            Value::Struct(Struct::new().with_field("name", "dynamic").with_field("count", 6))
        );
        let nested = ziggy!([1]);
        assert_eq!(ziggy!([nested]), Value::Array(vec![Value::Array(vec![Value::from(1)])]));
    }
}
