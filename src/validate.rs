//! Runtime structural validation.
//!
//! [`validate`] decides whether a [`Value`] has the shape a [`Descriptor`]
//! describes. It recurses through nested descriptors without a depth limit and
//! never fails loudly: every answer, including "this combination makes no
//! sense", is a `bool`.
//!
//! ```rust
//! use dictkit::{validate, value, Descriptor};
//!
//! let scores = Descriptor::dict(Descriptor::str(), Descriptor::list(Descriptor::int()));
//!
//! assert!(validate(&value!({"alice": [1, 2], "bob": []}), &scores));
//! assert!(!validate(&value!({"alice": [1, "2"]}), &scores));
//! ```

use crate::descriptor::{CallableSpec, Descriptor, IoMode};
use crate::value::{Class, IoKind, Value};

/// Returns `true` if `value` matches `descriptor`.
///
/// # Examples
///
/// ```rust
/// use dictkit::{validate, Descriptor, Value};
///
/// let int_or_str = Descriptor::union([Descriptor::int(), Descriptor::str()]);
/// assert!(validate(&Value::from(5), &int_or_str));
/// assert!(validate(&Value::from("five"), &int_or_str));
/// assert!(!validate(&Value::from(5.0), &int_or_str));
/// ```
#[must_use]
pub fn validate(value: &Value, descriptor: &Descriptor) -> bool {
    if is_none_descriptor(descriptor) && !value.is_none() {
        return false;
    }

    // A class object must be exactly a plain class: kinds have their own
    // metaclass and do not qualify.
    if matches!(descriptor, Descriptor::Class(Class::Type)) {
        return matches!(value, Value::Type(class) if class.as_kind().is_none());
    }

    match descriptor {
        Descriptor::Any => true,
        Descriptor::None => value.is_none(),
        Descriptor::Class(class) => is_instance(value, class),
        Descriptor::Union(alternatives) => alternatives.iter().any(|alt| validate(value, alt)),
        Descriptor::Iterable(elem) => is_iterable_instance(value, elem.as_deref()),
        Descriptor::List(elem) => match value {
            Value::List(items) => all_match(items, elem),
            _ => false,
        },
        Descriptor::Set(elem) => match value {
            Value::Set(items) => items.iter().all(|item| validate(item, elem)),
            _ => false,
        },
        Descriptor::Tuple { elems, variadic } => is_tuple_instance(value, elems, *variadic),
        Descriptor::Dict(key, val) => is_dict_instance(value, key, val),
        Descriptor::Callable(spec) => is_callable_instance(value, spec.as_ref()),
        Descriptor::Io(mode) => is_io_instance(value, *mode),
    }
}

fn is_none_descriptor(descriptor: &Descriptor) -> bool {
    matches!(descriptor, Descriptor::None | Descriptor::Class(Class::NoneType))
}

fn is_instance(value: &Value, class: &Class) -> bool {
    value.class().is_subclass_of(class)
}

fn all_match(items: &[Value], elem: &Descriptor) -> bool {
    items.iter().all(|item| validate(item, elem))
}

fn is_iterable_instance(value: &Value, elem: Option<&Descriptor>) -> bool {
    let Some(mut elements) = value.elements() else {
        return false;
    };
    match elem {
        Some(elem) => elements.all(|item| validate(&item, elem)),
        None => true,
    }
}

fn is_tuple_instance(value: &Value, elems: &[Descriptor], variadic: bool) -> bool {
    let Value::Tuple(items) = value else {
        return false;
    };

    if variadic {
        let Some((repeated, leading)) = elems.split_last() else {
            return false;
        };
        if items.len() < leading.len() {
            return false;
        }
        let (head, rest) = items.split_at(leading.len());
        return head.iter().zip(leading).all(|(item, d)| validate(item, d))
            && all_match(rest, repeated);
    }

    items.len() == elems.len() && items.iter().zip(elems).all(|(item, d)| validate(item, d))
}

fn is_dict_instance(value: &Value, key: &Descriptor, val: &Descriptor) -> bool {
    let Some(map) = value.as_dict() else {
        return false;
    };
    map.iter()
        .all(|(k, v)| validate(k, key) && validate(v, val))
}

/// Compares the candidate's declared signature, not its behavior.
fn is_callable_instance(value: &Value, spec: Option<&CallableSpec>) -> bool {
    if !value.is_callable() {
        return false;
    }
    let Some(spec) = spec else {
        return true;
    };

    let Value::Callable(function) = value else {
        return false;
    };
    let Some(signature) = function.signature() else {
        return false;
    };
    match signature.return_type() {
        Some(ret) if ret.same_type(&spec.ret) => {}
        _ => return false,
    }

    match &spec.params {
        Some(expected) => {
            let declared = signature.params();
            declared.len() == expected.len()
                && declared.iter().zip(expected).all(|((_, got), want)| got.same_type(want))
        }
        None => true,
    }
}

fn is_io_instance(value: &Value, mode: Option<IoMode>) -> bool {
    let Value::Io(handle) = value else {
        return false;
    };
    match mode {
        None => true,
        Some(IoMode::Text) => handle.kind() == IoKind::Text,
        Some(IoMode::Binary) => handle.kind() == IoKind::Buffered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{CustomClass, Function, Instance, IoHandle, Signature};
    use crate::value;
    use std::sync::Arc;

    fn ints(items: &[i64]) -> Vec<Value> {
        items.iter().map(|i| Value::from(*i)).collect()
    }

    #[test]
    fn test_none_checks_come_first() {
        assert!(validate(&Value::None, &Descriptor::none()));
        assert!(!validate(&Value::from(0), &Descriptor::none()));
        assert!(validate(&Value::None, &Descriptor::class(Class::NoneType)));
        assert!(!validate(&Value::from(""), &Descriptor::class(Class::NoneType)));
        assert!(!validate(&Value::None, &Descriptor::int()));
        assert!(validate(&Value::None, &Descriptor::optional(Descriptor::int())));
    }

    #[test]
    fn test_any_and_object() {
        for v in [Value::None, Value::from(1), value!([1, "a"]), Value::from(Class::Int)] {
            assert!(validate(&v, &Descriptor::any()));
            assert!(validate(&v, &Descriptor::object()));
        }
    }

    #[test]
    fn test_type_object_must_be_a_plain_class() {
        assert!(validate(&Value::Type(Class::Int), &Descriptor::type_object()));
        assert!(!validate(&Value::from(1), &Descriptor::type_object()));
        assert!(!validate(&Value::from("int"), &Descriptor::type_object()));
    }

    #[test]
    fn test_bool_is_an_int() {
        assert!(validate(&Value::from(true), &Descriptor::int()));
        assert!(!validate(&Value::from(1), &Descriptor::bool()));
        assert!(!validate(&Value::from(1), &Descriptor::float()));
    }

    #[test]
    fn test_custom_class_inheritance() {
        let animal = Arc::new(CustomClass::new("Animal"));
        let dog = Arc::new(CustomClass::new("Dog").with_base(Class::Custom(Arc::clone(&animal))));
        let rex = Value::instance(Instance::new(Arc::clone(&dog)).with_attr("name", "Rex"));

        assert!(validate(&rex, &Descriptor::class(Class::Custom(animal))));
        assert!(validate(&rex, &Descriptor::class(Class::Custom(dog))));
        assert!(!validate(&rex, &Descriptor::str()));
    }

    #[test]
    fn test_list_homogeneity() {
        let d = Descriptor::list(Descriptor::int());
        assert!(validate(&Value::List(ints(&[1, 2, 3])), &d));
        assert!(!validate(&value!([1, "x"]), &d));
        assert!(validate(&Value::list([]), &d));
        assert!(!validate(&Value::Tuple(ints(&[1])), &d));
    }

    #[test]
    fn test_set_requires_set() {
        let d = Descriptor::set(Descriptor::str());
        assert!(validate(&Value::set([Value::from("a")]), &d));
        assert!(!validate(&value!(["a"]), &d));
        assert!(!validate(&Value::set([Value::from(1)]), &d));
    }

    #[test]
    fn test_fixed_tuple_arity() {
        let d = Descriptor::tuple([Descriptor::int(), Descriptor::str()]);
        assert!(validate(&value!((1, "a")), &d));
        assert!(!validate(&value!((1, "a", "b")), &d));
        assert!(!validate(&Value::tuple([Value::from(1)]), &d));
        assert!(!validate(&value!(("a", 1)), &d));
        assert!(validate(&Value::tuple([]), &Descriptor::tuple([])));
    }

    #[test]
    fn test_variadic_tuple() {
        let d = Descriptor::tuple_of(Descriptor::int());
        assert!(validate(&Value::tuple([]), &d));
        assert!(validate(&Value::Tuple(ints(&[1])), &d));
        assert!(validate(&Value::Tuple(ints(&[1, 2, 3])), &d));
        assert!(!validate(&value!((1, "a")), &d));
    }

    #[test]
    fn test_variadic_tuple_with_leading_positions() {
        let d = Descriptor::Tuple {
            elems: vec![Descriptor::str(), Descriptor::int()],
            variadic: true,
        };
        assert!(validate(&Value::tuple([Value::from("a")]), &d));
        assert!(validate(&value!(("a", 1, 2)), &d));
        assert!(!validate(&Value::tuple([]), &d));
        assert!(!validate(&value!((1, 2)), &d));
    }

    #[test]
    fn test_malformed_variadic_tuple_fails_closed() {
        let d = Descriptor::Tuple {
            elems: vec![],
            variadic: true,
        };
        assert!(!validate(&Value::tuple([]), &d));
    }

    #[test]
    fn test_dict_checks_keys_and_values() {
        let d = Descriptor::dict(Descriptor::str(), Descriptor::int());
        assert!(!validate(&value!({1: 1}), &d));
        assert!(!validate(&value!({"a": "b"}), &d));
        assert!(validate(&value!({"a": 1}), &d));
        assert!(validate(&value!({}), &d));
        assert!(!validate(&value!([["a", 1]]), &d));
    }

    #[test]
    fn test_iterables() {
        let any = Descriptor::any_iterable();
        assert!(validate(&Value::from("abc"), &any));
        assert!(validate(&value!({"a": 1}), &any));
        assert!(!validate(&Value::from(5), &any));

        let chars = Descriptor::iterable(Descriptor::str());
        assert!(validate(&Value::from("abc"), &chars));
        assert!(validate(&Value::from(""), &chars));
        assert!(validate(&value!({"a": 1, "b": 2}), &chars));
        assert!(!validate(&value!({"a": 1, 2: 2}), &chars));

        let bytes = Descriptor::iterable(Descriptor::int());
        assert!(validate(&Value::from(vec![1u8, 2, 3]), &bytes));
    }

    #[test]
    fn test_iterable_validation_is_repeatable() {
        let v = value!(["a", "b"]);
        let d = Descriptor::iterable(Descriptor::str());
        assert!(validate(&v, &d));
        assert!(validate(&v, &d));
    }

    #[test]
    fn test_nested_descriptors() {
        let d = Descriptor::list(Descriptor::dict(
            Descriptor::str(),
            Descriptor::tuple_of(Descriptor::optional(Descriptor::int())),
        ));
        assert!(validate(&value!([{"a": (1, None, 3)}, {}]), &d));
        assert!(!validate(&value!([{"a": (1, "x")}]), &d));
    }

    #[test]
    fn test_callables() {
        let func1 = Value::function(Function::with_signature(
            "func1",
            Signature::new()
                .param("x", Descriptor::int())
                .param("y", Descriptor::str())
                .returns(Descriptor::class(Class::List)),
        ));
        let func2 = Value::function(Function::with_signature(
            "func2",
            Signature::new().param("x", Descriptor::str()),
        ));
        let func3 = Value::function(Function::with_signature(
            "func3",
            Signature::new().returns(Descriptor::int()),
        ));
        let bare = Value::function(Function::new("bare"));

        let t1 = Descriptor::callable(
            [Descriptor::int(), Descriptor::str()],
            Descriptor::class(Class::List),
        );
        let t2 = Descriptor::callable([Descriptor::str()], Descriptor::none());
        let t3 = Descriptor::callable([], Descriptor::int());
        let t4 = Descriptor::any_callable();

        assert!(validate(&func1, &t1));
        assert!(!validate(&func1, &t3));
        assert!(!validate(&func2, &t2));
        assert!(validate(&func3, &t3));
        assert!(validate(&func3, &Descriptor::callable_returning(Descriptor::int())));
        assert!(!validate(&bare, &t1));
        assert!(validate(&bare, &t4));
        assert!(validate(&Value::Type(Class::Int), &t4));
        assert!(!validate(&Value::from("f"), &t4));
    }

    #[test]
    fn test_callable_parameters_match_by_equality() {
        let narrow = Value::function(Function::with_signature(
            "narrow",
            Signature::new()
                .param("x", Descriptor::object())
                .returns(Descriptor::none()),
        ));
        assert!(!validate(
            &narrow,
            &Descriptor::callable([Descriptor::int()], Descriptor::none())
        ));
    }

    #[test]
    fn test_callable_union_order_and_none_spelling() {
        let handler = Value::function(Function::with_signature(
            "handler",
            Signature::new()
                .param("x", Descriptor::union([Descriptor::int(), Descriptor::str()]))
                .returns(Descriptor::class(Class::NoneType)),
        ));

        let reordered = Descriptor::callable(
            [Descriptor::union([Descriptor::str(), Descriptor::int()])],
            Descriptor::none(),
        );
        assert!(validate(&handler, &reordered));
        assert!(validate(
            &handler,
            &Descriptor::callable_returning(Descriptor::class(Class::NoneType))
        ));
        assert!(!validate(
            &handler,
            &Descriptor::callable(
                [Descriptor::union([Descriptor::str(), Descriptor::float()])],
                Descriptor::none(),
            )
        ));
    }

    #[test]
    fn test_io_handles() {
        let text = Value::io(IoHandle::text("example.txt"));
        let binary = Value::io(IoHandle::buffered("example.bin"));
        let raw = Value::io(IoHandle::raw("example.raw"));

        assert!(validate(&text, &Descriptor::io()));
        assert!(validate(&text, &Descriptor::text_io()));
        assert!(!validate(&text, &Descriptor::binary_io()));

        assert!(validate(&binary, &Descriptor::io()));
        assert!(!validate(&binary, &Descriptor::text_io()));
        assert!(validate(&binary, &Descriptor::binary_io()));

        assert!(validate(&raw, &Descriptor::io()));
        assert!(!validate(&raw, &Descriptor::binary_io()));
        assert!(!validate(&Value::from("example.txt"), &Descriptor::io()));
        assert!(validate(&text, &Descriptor::class(Class::IoBase)));
    }

    #[test]
    fn test_empty_union_matches_nothing() {
        assert!(!validate(&Value::None, &Descriptor::union([])));
    }
}
