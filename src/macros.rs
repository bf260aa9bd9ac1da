/// Builds a [`Value`](crate::Value) from a Python-like literal.
///
/// - `None`, `true` and `false` are themselves
/// - `[a, b]` is a list and `(a, b)` a tuple
/// - `{k: v}` is a dict; keys may be any literal, `None` or a nested form
/// - anything else goes through `Value::from`
///
/// Nested elements must be single tokens or bracketed groups, so negative
/// numbers and other multi-token expressions are built outside the macro.
///
/// # Examples
///
/// ```rust
/// use dictkit::{value, Value};
///
/// let v = value!({"name": "Ada", "tags": ["x", None], (1, 2): 3.5});
/// assert_eq!(v.as_dict().map(|m| m.len()), Some(3));
/// assert_eq!(value!(()), Value::Tuple(vec![]));
/// ```
#[macro_export]
macro_rules! value {
    (None) => {
        $crate::Value::None
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::value!($elem)),*])
    };

    (()) => {
        $crate::Value::Tuple(vec![])
    };

    (( $($elem:tt),+ $(,)? )) => {
        $crate::Value::Tuple(vec![$($crate::value!($elem)),+])
    };

    ({}) => {
        $crate::Value::Dict($crate::ValueMap::new())
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {{
        let mut map = $crate::ValueMap::new();
        $(
            map.insert($crate::value!($key), $crate::value!($value));
        )*
        $crate::Value::Dict(map)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
