/// Build a `Vec<Value>` parameter list.
///
/// ```ignore
/// let params = sqlprep::params!["SELECT * FROM t WHERE id = ?", 5];
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}

/// Build an [`Array`](crate::Array).
///
/// `array! { "k" => v, ... }` builds an associative array in insertion order,
/// `array![v, ...]` a list.
#[macro_export]
macro_rules! array {
    () => {
        $crate::Array::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut array = $crate::Array::new();
        $(array.insert($key, $value);)+
        array
    }};
    ($($value:expr),+ $(,)?) => {
        $crate::Array::list([$($crate::Value::from($value)),+])
    };
}
