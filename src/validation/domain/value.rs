//! Dynamic value tree consumed and produced by validators.
//!
//! Input values are JSON-like: [`Value::Null`] is the absence-sentinel (a key
//! missing from a map is a different thing), and maps may carry non-string
//! keys so that they can be reported rather than silently coerced. The
//! remaining variants hold coerced outputs such as decimals and datetimes.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// Validated field map produced by dict and record validation.
pub type FieldMap = BTreeMap<String, Value>;

/// A dynamically typed value.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use validata::validation::domain::{Value, ValueKind};
///
/// let value = Value::from(json!({"id": 7, "tags": ["a", "b"]}));
/// assert_eq!(value.kind(), ValueKind::Dict);
/// assert_eq!(value.to_json(), json!({"id": 7, "tags": ["a", "b"]}));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absence-sentinel.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered sequence.
    List(Vec<Value>),
    /// A mapping. Keys are usually strings.
    Map(BTreeMap<MapKey, Value>),
    /// An exact decimal number.
    Decimal(Decimal),
    /// A datetime with an explicit UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// A datetime without timezone information.
    LocalDateTime(NaiveDateTime),
    /// A calendar date.
    Date(NaiveDate),
    /// A time of day.
    Time(NaiveTime),
}

/// Runtime kind of a [`Value`], used in type errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    /// [`Value::Null`].
    None,
    /// [`Value::Bool`].
    Bool,
    /// [`Value::Int`].
    Int,
    /// [`Value::Float`].
    Float,
    /// [`Value::Str`].
    Str,
    /// [`Value::List`].
    List,
    /// [`Value::Map`].
    Dict,
    /// [`Value::Decimal`].
    Decimal,
    /// [`Value::DateTime`] and [`Value::LocalDateTime`].
    DateTime,
    /// [`Value::Date`].
    Date,
    /// [`Value::Time`].
    Time,
}

impl ValueKind {
    /// Returns the stable name used in error payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::List => "list",
            Self::Dict => "dict",
            Self::Decimal => "decimal",
            Self::DateTime => "datetime",
            Self::Date => "date",
            Self::Time => "time",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of a [`Value::Map`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    /// A string key, the only kind accepted by dict validation.
    Str(String),
    /// An integer key.
    Int(i64),
    /// A boolean key.
    Bool(bool),
}

impl MapKey {
    /// Returns the key as a string slice if it is a string key.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(key) => Some(key),
            Self::Int(_) | Self::Bool(_) => None,
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(key) => f.write_str(key),
            Self::Int(key) => write!(f, "{key}"),
            Self::Bool(key) => write!(f, "{key}"),
        }
    }
}

impl From<&str> for MapKey {
    fn from(key: &str) -> Self {
        Self::Str(key.to_owned())
    }
}

impl From<String> for MapKey {
    fn from(key: String) -> Self {
        Self::Str(key)
    }
}

impl From<i64> for MapKey {
    fn from(key: i64) -> Self {
        Self::Int(key)
    }
}

impl From<bool> for MapKey {
    fn from(key: bool) -> Self {
        Self::Bool(key)
    }
}

impl Value {
    /// Returns the runtime kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::None,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::Str,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Dict,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::DateTime(_) | Self::LocalDateTime(_) => ValueKind::DateTime,
            Self::Date(_) => ValueKind::Date,
            Self::Time(_) => ValueKind::Time,
        }
    }

    /// Returns `true` for the absence-sentinel.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string slice if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Builds a map value from key/value pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use validata::validation::domain::Value;
    ///
    /// let value = Value::map([("a", Value::Int(1)), ("b", Value::Null)]);
    /// assert_eq!(value.to_json(), serde_json::json!({"a": 1, "b": null}));
    /// ```
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<MapKey>,
        V: Into<Self>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Renders this value as JSON.
    ///
    /// Decimals and temporal values become ISO/decimal strings, non-string
    /// map keys are rendered with their display form, and non-finite floats
    /// become `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(value) => serde_json::Value::Bool(*value),
            Self::Int(value) => serde_json::Value::from(*value),
            Self::Float(value) => serde_json::Number::from_f64(*value)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Str(value) => serde_json::Value::String(value.clone()),
            Self::List(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_json()))
                    .collect(),
            ),
            Self::Decimal(value) => serde_json::Value::String(value.to_string()),
            Self::DateTime(value) => {
                serde_json::Value::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, false))
            }
            Self::LocalDateTime(value) => {
                serde_json::Value::String(value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
            Self::Date(value) => serde_json::Value::String(value.format("%Y-%m-%d").to_string()),
            Self::Time(value) => serde_json::Value::String(value.format("%H:%M:%S%.f").to_string()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map(Self::Int)
                .or_else(|| number.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            serde_json::Value::String(value) => Self::Str(value),
            serde_json::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (MapKey::Str(key), Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::LocalDateTime(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<FieldMap> for Value {
    fn from(fields: FieldMap) -> Self {
        Self::Map(
            fields
                .into_iter()
                .map(|(key, value)| (MapKey::Str(key), value))
                .collect(),
        )
    }
}
