use dictkit::{validate, value, Descriptor, Value, ValueMap};

#[test]
fn test_macro_builds_nested_values() {
    let config = value!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging"],
        "limits": (10, 20),
        "debug": true,
        "proxy": None
    });

    let map = config.as_dict().unwrap();
    assert_eq!(map.len(), 6);
    assert_eq!(map.get(&Value::from("port")), Some(&Value::Int(8080)));
    assert_eq!(
        map.get(&Value::from("limits")),
        Some(&Value::Tuple(vec![Value::Int(10), Value::Int(20)]))
    );
    assert_eq!(map.get(&Value::from("proxy")), Some(&Value::None));
}

#[test]
fn test_macro_values_validate() {
    let descriptor = Descriptor::dict(
        Descriptor::str(),
        Descriptor::union([
            Descriptor::str(),
            Descriptor::int(),
            Descriptor::list(Descriptor::str()),
            Descriptor::tuple_of(Descriptor::int()),
            Descriptor::none(),
        ]),
    );
    let config = value!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging"],
        "limits": (10, 20),
        "debug": true,
        "proxy": None
    });
    // `debug` is a bool, and bool is an int
    assert!(validate(&config, &descriptor));
    assert!(!validate(&value!({"ratio": 0.5}), &descriptor));
}

#[test]
fn test_macro_non_string_keys() {
    let dict = value!({1: "one", None: "nothing", (0, 1): "pair"});
    let map = dict.as_dict().unwrap();
    assert_eq!(map.get(&Value::Int(1)), Some(&Value::from("one")));
    assert_eq!(map.get(&Value::None), Some(&Value::from("nothing")));
    assert_eq!(map.get(&value!((0, 1))), Some(&Value::from("pair")));
}

#[test]
fn test_macro_empty_forms() {
    assert_eq!(value!([]), Value::List(vec![]));
    assert_eq!(value!(()), Value::Tuple(vec![]));
    assert_eq!(value!({}), Value::Dict(ValueMap::new()));
}
