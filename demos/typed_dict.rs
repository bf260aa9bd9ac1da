//! Typed dictionaries: kinds, enforced writes and multi-key operations.
//!
//! Run with: cargo run --example typed_dict

use dictkit::{Descriptor, Error, Function, KindRegistry, Signature, TypedDict, Value};
use std::error::Error as StdError;

fn main() -> Result<(), Box<dyn StdError>> {
    let registry = KindRegistry::global();

    let kind = registry.kind(Descriptor::str(), Descriptor::int())?;
    println!("Kind {} is named {}", kind.type_hint(), kind.name());

    let mut stock = TypedDict::new(kind.clone());
    stock.insert("apples", 12)?;
    stock.insert("pears", 4)?;

    // Rejected writes report what was expected and leave the dict alone
    match stock.insert("plums", "a few") {
        Err(Error::TypeConstraintViolation { role, expected, found }) => {
            println!("Rejected {}: expected {}, got {}", role, expected, found);
        }
        other => println!("Unexpected result: {:?}", other),
    }
    if let Err(err) = stock.insert(3, 3) {
        println!("Rejected: {}", err);
    }
    println!("Stock: {}", stock);

    // Asking again for the same pair gives the same kind
    let again = registry.kind(Descriptor::str(), Descriptor::int())?;
    println!("Same kind again: {}", kind.is(&again));

    // Multi-key operations are all-or-nothing
    let keys = [Value::from("apples"), Value::from("kiwis")];
    stock.set_many(&keys, [Value::from(10), Value::from(7)])?;
    println!("After set_many: {}", stock);

    let picked = stock.select(&keys)?;
    println!("Selected: {}", picked);

    if let Err(err) = stock.drop_in_place(&[Value::from("pears"), Value::from("grapes")]) {
        println!("Nothing dropped: {} ({} entries left)", err, stock.len());
    }
    let smaller = stock.drop_keys(&[Value::from("pears")])?;
    println!("Without pears: {}", smaller);

    // Callables are checked against their declared signature
    let handlers = registry.kind(
        Descriptor::str(),
        Descriptor::callable([Descriptor::str()], Descriptor::bool()),
    )?;
    let mut table = TypedDict::new(handlers);
    table.insert(
        "is_empty",
        Function::with_signature(
            "is_empty",
            Signature::new()
                .param("text", Descriptor::str())
                .returns(Descriptor::bool()),
        ),
    )?;
    if let Err(err) = table.insert("print", Function::new("print")) {
        println!("Rejected handler: {}", err);
    }

    // Derived bases give separate kinds with their own names
    registry.derive_base("Inventory", registry.root_base())?;
    let inventory = registry.parameterize("Inventory", &[Descriptor::str(), Descriptor::int()])?;
    println!("Derived kind: {}", inventory.type_hint());

    println!("\nRegistered kinds:");
    for kind in registry.kinds() {
        println!("  {}", kind.type_hint());
    }

    Ok(())
}
