/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// ```rust
/// use nulfield::{value, Value};
///
/// let v = value!({
///     "name": "Alice",
///     "scores": [1, 2.5],
///     7: "seven"
/// });
/// assert_eq!(v.as_map().map(|m| m.len()), Some(3));
/// ```
#[macro_export]
macro_rules! value {
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
        $crate::Value::Array(vec![])
    };

    // Handle non-empty array
    ([ $($tt:tt)+ ]) => {
        $crate::Value::Array($crate::value!(@array [] $($tt)+))
    };

    // Handle empty map
    ({}) => {
        $crate::Value::Map($crate::ValueMap::new())
    };

    // Handle non-empty map
    ({ $($tt:tt)+ }) => {{
        let mut map = $crate::ValueMap::new();
        $crate::value!(@map map $($tt)+);
        $crate::Value::Map(map)
    }};

    // Array elements, one at a time; a negative literal is two tokens
    (@array [$($out:expr,)*]) => {
        vec![$($out,)*]
    };
    (@array [$($out:expr,)*] - $lit:literal $(, $($rest:tt)*)?) => {
        $crate::value!(@array [$($out,)* $crate::value!(-$lit),] $($($rest)*)?)
    };
    (@array [$($out:expr,)*] $elem:tt $(, $($rest:tt)*)?) => {
        $crate::value!(@array [$($out,)* $crate::value!($elem),] $($($rest)*)?)
    };

    // Map entries, one at a time
    (@map $map:ident) => {};
    (@map $map:ident $key:literal : - $lit:literal $(, $($rest:tt)*)?) => {
        $map.insert($crate::Value::from($key), $crate::value!(-$lit));
        $crate::value!(@map $map $($($rest)*)?);
    };
    (@map $map:ident $key:literal : $value:tt $(, $($rest:tt)*)?) => {
        $map.insert($crate::Value::from($key), $crate::value!($value));
        $crate::value!(@map $map $($($rest)*)?);
    };

    // Any other expression goes through `From`
    ($e:expr) => {
        $crate::Value::from($e)
    };
}
