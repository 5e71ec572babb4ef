//! Parameter values accepted by the preprocessor.
//!
//! [`Value`] is a closed set of variants; every formatting rule in the
//! preprocessor is a `match` over it. Ordered key/value collections are
//! represented by [`Array`], which keeps insertion order and distinguishes
//! positional from associative keys the way SQL fragments need it.
//!
//! # Example
//! ```ignore
//! use sqlprep::{Array, Value};
//!
//! let row = Array::new().with("name", "Jim").with("age", 30);
//! let ids = Value::from(vec![1, 2, 3]);
//! ```

use crate::error::{PrepError, PrepResult};
use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Key of an [`Array`] entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Positional key (`0, 1, 2, ...`).
    Index(i64),
    /// Associative key, usually a column name, optionally with an operator suffix.
    Name(String),
}

impl Key {
    /// Returns `true` for positional keys.
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }

    /// The associative name, if any.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Key::Index(index.into())
    }
}

/// An opaque table row: something with a primary key and column values.
///
/// Rows format as their primary key when used as a plain value, and as their
/// column map inside a multi-row insert.
///
/// Usually derived with `#[derive(TableRow)]`.
pub trait TableRow: fmt::Debug + Send + Sync {
    /// The primary key value.
    fn primary(&self) -> Value;

    /// Column name → value pairs, in column order.
    fn to_array(&self) -> Array;
}

/// An enum case, optionally backed by a scalar value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    case: String,
    backing: Option<Box<Value>>,
}

impl EnumValue {
    /// A case without a backing value. It has no SQL representation.
    pub fn unit(case: impl Into<String>) -> Self {
        Self {
            case: case.into(),
            backing: None,
        }
    }

    /// A case backed by a scalar (`bool`, integer, float or string).
    pub fn backed(case: impl Into<String>, value: impl Into<Value>) -> PrepResult<Self> {
        let value = value.into();
        if !value.is_scalar() {
            return Err(PrepError::invalid(format!(
                "enum backing value must be scalar, {} given",
                value.type_name()
            )));
        }
        Ok(Self {
            case: case.into(),
            backing: Some(Box::new(value)),
        })
    }

    pub fn case(&self) -> &str {
        &self.case
    }

    pub fn backing(&self) -> Option<&Value> {
        self.backing.as_deref()
    }
}

/// Raw SQL with its own parameters.
///
/// The SQL is preprocessed again when the literal is formatted, and its bound
/// values are merged into the enclosing statement's values.
///
/// # Example
/// ```ignore
/// use sqlprep::SqlLiteral;
///
/// let expr = SqlLiteral::new("NOW() - INTERVAL ? DAY").bind(7);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SqlLiteral {
    sql: String,
    params: Vec<Value>,
}

impl SqlLiteral {
    /// Create a literal without parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Create a literal with a parameter list.
    pub fn with_params(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Append a parameter.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

impl fmt::Display for SqlLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Insertion-ordered key → value collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    entries: Vec<(Key, Value)>,
}

impl Array {
    /// Create an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Build a list (keys `0..n`) from values.
    pub fn list<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        let mut array = Self::new();
        for value in values {
            array.push(value);
        }
        array
    }

    /// Insert or replace the value under `key`, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Chainable variant of [`Array::insert`].
    pub fn with(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Append under the next positional index.
    ///
    /// Once `i64::MAX` is taken the key saturates and the entry there is replaced.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        let next = self
            .entries
            .iter()
            .filter_map(|(k, _)| match k {
                Key::Index(i) => Some(i.saturating_add(1)),
                Key::Name(_) => None,
            })
            .max()
            .unwrap_or(0)
            .max(0);
        self.insert(Key::Index(next), value)
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` when the keys are exactly `0, 1, ..., len - 1` in order.
    pub fn is_list(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, (k, _))| *k == Key::Index(i as i64))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Key, Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Array {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut array = Array::new();
        for (k, v) in iter {
            array.insert(k, v);
        }
        array
    }
}

impl IntoIterator for Array {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a (Key, Value);
    type IntoIter = std::slice::Iter<'a, (Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A parameter value.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// A string. Strings at template positions are SQL templates.
    Text(String),
    /// Binary stream contents.
    Stream(Bytes),
    DateTime(NaiveDateTime),
    Interval(TimeDelta),
    Enum(EnumValue),
    /// Any value that renders to a string (UUIDs, decimals, domain newtypes).
    Stringable(Arc<dyn fmt::Display + Send + Sync>),
    Row(Arc<dyn TableRow>),
    Literal(SqlLiteral),
    Array(Array),
}

impl Value {
    /// Wrap binary data as a stream value.
    pub fn stream(data: impl Into<Bytes>) -> Self {
        Value::Stream(data.into())
    }

    /// Wrap a displayable value; it is formatted through its string rendering.
    pub fn stringable(value: impl fmt::Display + Send + Sync + 'static) -> Self {
        Value::Stringable(Arc::new(value))
    }

    /// Wrap a table row.
    pub fn row(row: impl TableRow + 'static) -> Self {
        Value::Row(Arc::new(row))
    }

    /// Raw SQL without parameters.
    pub fn literal(sql: impl Into<String>) -> Self {
        Value::Literal(SqlLiteral::new(sql))
    }

    /// `bool`, integer, float or string.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Text(_)
        )
    }

    /// Values deferred to driver binding when parameters are in use.
    pub fn is_bindable(&self) -> bool {
        self.is_scalar() || matches!(self, Value::Stream(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Short type label used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "string",
            Value::Stream(_) => "stream",
            Value::DateTime(_) => "datetime",
            Value::Interval(_) => "interval",
            Value::Enum(_) => "enum",
            Value::Stringable(_) => "stringable",
            Value::Row(_) => "row",
            Value::Literal(_) => "literal",
            Value::Array(_) => "array",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Text(v) => f.debug_tuple("Text").field(v).finish(),
            Value::Stream(v) => f.debug_tuple("Stream").field(v).finish(),
            Value::DateTime(v) => f.debug_tuple("DateTime").field(v).finish(),
            Value::Interval(v) => f.debug_tuple("Interval").field(v).finish(),
            Value::Enum(v) => f.debug_tuple("Enum").field(v).finish(),
            Value::Stringable(v) => f
                .debug_tuple("Stringable")
                .field(&v.to_string())
                .finish(),
            Value::Row(v) => f.debug_tuple("Row").field(v).finish(),
            Value::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Value::Array(v) => f.debug_tuple("Array").field(v).finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Stream(a), Value::Stream(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Interval(a), Value::Interval(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Stringable(a), Value::Stringable(b)) => a.to_string() == b.to_string(),
            (Value::Row(a), Value::Row(b)) => Arc::ptr_eq(a, b),
            (Value::Literal(a), Value::Literal(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(v.into())
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl TryFrom<u64> for Value {
    type Error = PrepError;

    fn try_from(v: u64) -> PrepResult<Self> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| PrepError::invalid(format!("integer {v} is out of range")))
    }
}

impl TryFrom<usize> for Value {
    type Error = PrepError;

    fn try_from(v: usize) -> PrepResult<Self> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| PrepError::invalid(format!("integer {v} is out of range")))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Stream(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::DateTime(v.and_time(chrono::NaiveTime::MIN))
    }
}

impl<Tz: chrono::TimeZone> From<chrono::DateTime<Tz>> for Value {
    fn from(v: chrono::DateTime<Tz>) -> Self {
        Value::DateTime(v.naive_local())
    }
}

impl From<TimeDelta> for Value {
    fn from(v: TimeDelta) -> Self {
        Value::Interval(v)
    }
}

impl From<uuid::Uuid> for Value {
    fn from(v: uuid::Uuid) -> Self {
        Value::stringable(v)
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Value::Enum(v)
    }
}

impl From<SqlLiteral> for Value {
    fn from(v: SqlLiteral) -> Self {
        Value::Literal(v)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Value::Array(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(Array::list(v))
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::Array(Array::list(v))
    }
}

impl<K: Into<Key>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(v: BTreeMap<K, V>) -> Self {
        Value::Array(v.into_iter().collect())
    }
}

/// JSON documents convert to nested arrays. Integral numbers outside the
/// `i64` range fail with [`PrepError::InvalidValue`].
impl TryFrom<serde_json::Value> for Value {
    type Error = PrepError;

    fn try_from(v: serde_json::Value) -> PrepResult<Self> {
        match v {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if let (true, Some(f)) = (n.is_f64(), n.as_f64()) {
                    Ok(Value::Float(f))
                } else {
                    Err(PrepError::invalid(format!("integer {n} is out of range")))
                }
            }
            serde_json::Value::String(s) => Ok(Value::Text(s)),
            serde_json::Value::Array(items) => {
                let mut array = Array::with_capacity(items.len());
                for item in items {
                    array.push(Value::try_from(item)?);
                }
                Ok(Value::Array(array))
            }
            serde_json::Value::Object(map) => {
                let mut array = Array::with_capacity(map.len());
                for (key, item) in map {
                    array.insert(key, Value::try_from(item)?);
                }
                Ok(Value::Array(array))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_keeps_insertion_order_and_replaces_in_place() {
        let mut a = Array::new();
        a.insert("b", 1).insert("a", 2).insert("b", 3);
        let keys: Vec<String> = a.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(a.get(&Key::from("b")), Some(&Value::Int(3)));
    }

    #[test]
    fn push_uses_next_positional_index() {
        let mut a = Array::new();
        a.insert("name", "x").push(1).push(2);
        let keys: Vec<&Key> = a.keys().collect();
        assert_eq!(keys, [&Key::from("name"), &Key::Index(0), &Key::Index(1)]);
        assert!(!a.is_list());
        assert!(Array::list([1, 2, 3]).is_list());
    }

    #[test]
    fn push_after_max_index_replaces_last_entry() {
        let mut a = Array::new();
        a.insert(i64::MAX, "a").push("b");
        assert_eq!(a.len(), 1);
        assert_eq!(a.get(&Key::Index(i64::MAX)), Some(&Value::from("b")));
    }

    #[test]
    fn list_detection_requires_dense_zero_based_keys() {
        let sparse: Array = [(1i64, "a"), (2i64, "b")].into_iter().collect();
        assert!(!sparse.is_list());
        assert!(Array::new().is_list());
    }

    #[test]
    fn scalar_classification() {
        assert!(Value::from(1).is_scalar());
        assert!(Value::from("x").is_scalar());
        assert!(!Value::Null.is_scalar());
        assert!(!Value::stream(vec![1u8]).is_scalar());
        assert!(Value::stream(vec![1u8]).is_bindable());
        assert!(!Value::from(vec![1]).is_bindable());
    }

    #[test]
    fn enum_backing_must_be_scalar() {
        assert!(EnumValue::backed("Active", 1).is_ok());
        assert!(EnumValue::backed("Bad", vec![1]).is_err());
        assert_eq!(EnumValue::unit("Plain").backing(), None);
    }

    #[test]
    fn json_objects_keep_key_order() {
        let json = serde_json::json!({"z": 1, "a": [true, null], "m": 1.5});
        let Value::Array(a) = Value::try_from(json).unwrap() else {
            panic!("expected array");
        };
        let keys: Vec<String> = a.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(a.get(&Key::from("m")), Some(&Value::Float(1.5)));
        assert_eq!(
            a.get(&Key::from("a")),
            Some(&Value::from(vec![Value::Bool(true), Value::Null]))
        );
    }

    #[test]
    fn json_integers_out_of_range_are_rejected() {
        let err = Value::try_from(serde_json::json!(u64::MAX)).unwrap_err();
        assert!(matches!(err, PrepError::InvalidValue(_)));
        let nested = serde_json::json!({ "ids": [1, u64::MAX] });
        assert!(Value::try_from(nested).is_err());
        assert_eq!(
            Value::try_from(serde_json::json!(i64::MAX)).unwrap(),
            Value::Int(i64::MAX)
        );
        assert_eq!(Value::try_from(serde_json::json!(2.5)).unwrap(), Value::Float(2.5));
    }

    #[test]
    fn large_unsigned_values_are_rejected() {
        assert!(Value::try_from(u64::MAX).is_err());
        assert_eq!(Value::try_from(7u64).unwrap(), Value::Int(7));
    }

    #[test]
    fn uuid_is_stringable() {
        let id = uuid::Uuid::nil();
        assert_eq!(Value::from(id), Value::stringable(id));
        assert_eq!(Value::from(id).type_name(), "stringable");
    }
}
