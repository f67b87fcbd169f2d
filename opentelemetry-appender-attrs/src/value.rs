//! Front-end attribute values.
//!
//! [`Value`] is the closed set of value kinds a caller can attach to a log
//! event. Every kind has exactly one representation on the OpenTelemetry side;
//! see [`crate::convert`] for the mapping.
use opentelemetry::{Key, StringValue};
use std::{
    borrow::Cow,
    fmt,
    sync::Arc,
    time::{Duration, SystemTime},
};

/// A value attached to a log event.
#[derive(Clone, Default)]
pub enum Value {
    /// No value. Attributes holding it are not emitted.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed 64-bit integer.
    Int64(i64),
    /// An unsigned 64-bit integer.
    Uint64(u64),
    /// A 64-bit float.
    Float64(f64),
    /// A UTF-8 string.
    String(StringValue),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// A span of time.
    Duration(Duration),
    /// A point in time.
    Time(SystemTime),
    /// An ordered sequence of values.
    Slice(Vec<Value>),
    /// An ordered sequence of named values.
    Group(Vec<Attr>),
    /// A value computed when the record is converted.
    Lazy(LazyValue),
    /// Any other payload, rendered with its `Debug` implementation.
    Any(Arc<dyn fmt::Debug + Send + Sync>),
}

impl Value {
    /// Creates a [`Value::Lazy`] from a closure.
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Value::Lazy(LazyValue::new(f))
    }

    /// Creates a [`Value::Any`] from an opaque payload.
    pub fn any<T>(value: T) -> Self
    where
        T: fmt::Debug + Send + Sync + 'static,
    {
        Value::Any(Arc::new(value))
    }

    /// Creates a [`Value::Group`].
    pub fn group(attrs: impl IntoIterator<Item = Attr>) -> Self {
        Value::Group(attrs.into_iter().collect())
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::Int64(v) => f.debug_tuple("Int64").field(v).finish(),
            Value::Uint64(v) => f.debug_tuple("Uint64").field(v).finish(),
            Value::Float64(v) => f.debug_tuple("Float64").field(v).finish(),
            Value::String(v) => f.debug_tuple("String").field(&v.as_str()).finish(),
            Value::Bytes(v) => f.debug_tuple("Bytes").field(v).finish(),
            Value::Duration(v) => f.debug_tuple("Duration").field(v).finish(),
            Value::Time(v) => f.debug_tuple("Time").field(v).finish(),
            Value::Slice(v) => f.debug_tuple("Slice").field(v).finish(),
            Value::Group(v) => f.debug_tuple("Group").field(v).finish(),
            Value::Lazy(v) => fmt::Debug::fmt(v, f),
            Value::Any(v) => f.debug_tuple("Any").field(v).finish(),
        }
    }
}

macro_rules! impl_trivial_from {
    ($t:ty, $variant:path) => {
        impl From<$t> for Value {
            fn from(val: $t) -> Value {
                $variant(val.into())
            }
        }
    };
}

impl_trivial_from!(bool, Value::Bool);

impl_trivial_from!(i8, Value::Int64);
impl_trivial_from!(i16, Value::Int64);
impl_trivial_from!(i32, Value::Int64);
impl_trivial_from!(i64, Value::Int64);

impl_trivial_from!(u8, Value::Uint64);
impl_trivial_from!(u16, Value::Uint64);
impl_trivial_from!(u32, Value::Uint64);
impl_trivial_from!(u64, Value::Uint64);

impl_trivial_from!(f32, Value::Float64);
impl_trivial_from!(f64, Value::Float64);

impl_trivial_from!(&'static str, Value::String);
impl_trivial_from!(String, Value::String);
impl_trivial_from!(Cow<'static, str>, Value::String);
impl_trivial_from!(StringValue, Value::String);

impl_trivial_from!(Vec<u8>, Value::Bytes);
impl_trivial_from!(Duration, Value::Duration);
impl_trivial_from!(SystemTime, Value::Time);
impl_trivial_from!(LazyValue, Value::Lazy);

impl From<isize> for Value {
    fn from(val: isize) -> Value {
        Value::Int64(val as i64)
    }
}

impl From<usize> for Value {
    fn from(val: usize) -> Value {
        Value::Uint64(val as u64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(val: Option<T>) -> Value {
        val.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    /// Creates a [`Value::Slice`] from a sequence of `Into<Value>` values.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Slice(iter.into_iter().map(Into::into).collect())
    }
}

/// A zero-argument function producing a [`Value`].
///
/// The function runs while a record is converted, once per conversion, and
/// never for bridges that do not emit.
#[derive(Clone)]
pub struct LazyValue(Arc<dyn Fn() -> Value + Send + Sync>);

impl LazyValue {
    /// Wraps `f`.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        LazyValue(Arc::new(f))
    }

    /// Runs the function.
    pub fn resolve(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for LazyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Lazy(..)")
    }
}

/// A key-value pair attached to a log event.
#[derive(Debug, Clone)]
pub struct Attr {
    /// The attribute key.
    pub key: Key,
    /// The attribute value.
    pub value: Value,
}

impl Attr {
    /// Creates a new attribute.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        Attr {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates an attribute whose value is a group of attributes.
    pub fn group<K>(key: K, attrs: impl IntoIterator<Item = Attr>) -> Self
    where
        K: Into<Key>,
    {
        Attr::new(key, Value::group(attrs))
    }

    /// Creates an attribute whose value is computed at conversion time.
    pub fn lazy<K, F>(key: K, f: F) -> Self
    where
        K: Into<Key>,
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Attr::new(key, Value::lazy(f))
    }

    /// Creates an attribute holding an opaque payload.
    pub fn any<K, T>(key: K, value: T) -> Self
    where
        K: Into<Key>,
        T: fmt::Debug + Send + Sync + 'static,
    {
        Attr::new(key, Value::any(value))
    }
}

impl<K: Into<Key>, V: Into<Value>> From<(K, V)> for Attr {
    fn from((key, value): (K, V)) -> Self {
        Attr::new(key, value)
    }
}
