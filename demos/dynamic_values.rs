//! Building and validating Values at runtime.
//!
//! Run with: cargo run --example dynamic_values

use dictkit::{to_value, validate, value, Descriptor, Value};
use serde::Serialize;
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build config dynamically with value! macro
    let config = value!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging", "metrics"],
        "debug": true,
        "timeout": None
    });
    println!("Config: {}\n", config);

    let shape = Descriptor::dict(
        Descriptor::str(),
        Descriptor::union([
            Descriptor::str(),
            Descriptor::int(),
            Descriptor::list(Descriptor::str()),
            Descriptor::none(),
        ]),
    );
    println!("Matches {}: {}", shape, validate(&config, &shape));

    // Access values dynamically
    if let Some(map) = config.as_dict() {
        if let Some(host) = map.get(&Value::from("host")).and_then(Value::as_str) {
            println!("Accessing field 'host': {}", host);
        }
    }

    // Convert a struct to a Value and check it against a stricter shape
    let user = User {
        id: 1,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "user".to_string()],
    };
    let user_value = to_value(&user)?;
    println!("\nUser as value: {}", user_value);

    let strict = Descriptor::dict(Descriptor::str(), Descriptor::str());
    println!("Matches {}: {}", strict, validate(&user_value, &strict));

    // Iterables accept any restartable collection
    let words = Descriptor::iterable(Descriptor::str());
    for candidate in [value!(["a", "b"]), Value::from("abc"), value!({"k": 1}), value!([1])] {
        println!("{} is {}: {}", candidate, words, validate(&candidate, &words));
    }

    println!("\nAs JSON: {}", serde_json::to_string(&user_value)?);

    Ok(())
}
