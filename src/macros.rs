#[macro_export]
macro_rules! gval {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array($crate::Array::new(vec![]))
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array($crate::Array::new(vec![$($crate::gval!($elem)),*]))
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::gval!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Fallback for any expression convertible into a value
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Array, Map, Value};

    #[test]
    fn gval_macro_primitives() {
        assert_eq!(gval!(null), Value::Null);
        assert_eq!(gval!(true), Value::Bool(true));
        assert_eq!(gval!(false), Value::Bool(false));
        assert_eq!(gval!(42), Value::Integer(42));
        assert_eq!(gval!(3.5), Value::Float(3.5));
        assert_eq!(gval!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn gval_macro_arrays() {
        assert_eq!(gval!([]), Value::Array(Array::new(vec![])));

        let arr = gval!([1, 2, 3]);
        match arr {
            Value::Array(arr) => {
                assert_eq!(arr.len(), 3);
                assert_eq!(arr.get(0), Some(&Value::Integer(1)));
                assert_eq!(arr.get(2), Some(&Value::Integer(3)));
                assert!(!arr.is_raw_scalar());
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn gval_macro_objects() {
        assert_eq!(gval!({}), Value::Object(Map::new()));

        let obj = gval!({
            "name": "Alice",
            "nums": [1, 2],
        });

        match obj {
            Value::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("name"), Some(&Value::String("Alice".to_string())));
                assert!(map.get("nums").is_some_and(Value::is_array));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn gval_macro_nests() {
        let value = gval!({"outer": {"inner": [null, true]}});
        let text = crate::to_string(&value).unwrap();
        assert_eq!(text, "{\"outer\": {\"inner\": [null, true]}}");
    }
}
