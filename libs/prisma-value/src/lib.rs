pub mod arithmetic;

mod error;

use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive};
use chrono::prelude::*;
use serde::ser::SerializeMap;
use serde::{ser::Serializer, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};

pub use error::ConversionFailure;
pub type PrismaValueResult<T> = std::result::Result<T, ConversionFailure>;
pub type PrismaListValue = Vec<PrismaValue>;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, PartialOrd, Ord)]
#[serde(untagged)]
pub enum PrismaValue {
    String(String),
    Boolean(bool),
    Enum(String),
    Int(i64),
    List(PrismaListValue),

    #[serde(serialize_with = "serialize_json")]
    Json(String),

    /// A collections of key-value pairs constituting an object.
    #[serde(serialize_with = "serialize_object")]
    Object(Vec<(String, PrismaValue)>),

    #[serde(serialize_with = "serialize_null")]
    Null,

    #[serde(serialize_with = "serialize_date")]
    DateTime(DateTime<FixedOffset>),

    #[serde(serialize_with = "serialize_decimal")]
    Float(BigDecimal),

    #[serde(serialize_with = "serialize_bigint")]
    BigInt(i64),
}

/// Stringify a date to the following format
/// 1999-05-01T00:00:00.000Z
pub fn stringify_datetime(datetime: &DateTime<FixedOffset>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses an RFC 3339 and ISO 8601 date and time string such as 1996-12-19T16:39:57-08:00,
/// then returns a new DateTime with a parsed FixedOffset.
pub fn parse_datetime(datetime: &str) -> chrono::ParseResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(datetime)
}

impl TryFrom<serde_json::Value> for PrismaValue {
    type Error = ConversionFailure;

    fn try_from(v: serde_json::Value) -> PrismaValueResult<Self> {
        match v {
            serde_json::Value::String(s) => Ok(PrismaValue::String(s)),
            serde_json::Value::Array(v) => {
                let vals: PrismaValueResult<Vec<PrismaValue>> = v.into_iter().map(PrismaValue::try_from).collect();
                Ok(PrismaValue::List(vals?))
            }
            serde_json::Value::Null => Ok(PrismaValue::Null),
            serde_json::Value::Bool(b) => Ok(PrismaValue::Boolean(b)),
            serde_json::Value::Number(num) => match num.as_i64() {
                Some(i) => Ok(PrismaValue::Int(i)),
                None => {
                    let fl = num
                        .as_f64()
                        .ok_or_else(|| ConversionFailure::new("JSON number", "PrismaValue::Float"))?;

                    PrismaValue::try_from(fl)
                }
            },
            serde_json::Value::Object(obj) => {
                let pairs = obj
                    .into_iter()
                    .map(|(k, v)| PrismaValue::try_from(v).map(|v| (k, v)))
                    .collect::<PrismaValueResult<Vec<_>>>()?;

                Ok(PrismaValue::Object(pairs))
            }
        }
    }
}

fn serialize_date<S>(date: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    stringify_datetime(date).serialize(serializer)
}

fn serialize_null<S>(serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    Option::<u8>::None.serialize(serializer)
}

fn serialize_bigint<S>(int: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    int.to_string().serialize(serializer)
}

fn serialize_decimal<S>(decimal: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match decimal.to_f64() {
        Some(f) => f.serialize(serializer),
        None => decimal.to_string().serialize(serializer),
    }
}

fn serialize_json<S>(json: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match serde_json::from_str::<serde_json::Value>(json) {
        Ok(value) => value.serialize(serializer),
        Err(_) => json.serialize(serializer),
    }
}

fn serialize_object<S>(obj: &Vec<(String, PrismaValue)>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(obj.len()))?;

    for (k, v) in obj {
        map.serialize_entry(k, v)?;
    }

    map.end()
}

impl PrismaValue {
    pub fn as_enum_value(&self) -> Option<&str> {
        match self {
            PrismaValue::Enum(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            PrismaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&PrismaListValue> {
        match self {
            PrismaValue::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Vec<(String, PrismaValue)>> {
        match self {
            PrismaValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PrismaValue::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, PrismaValue::Int(_) | PrismaValue::BigInt(_) | PrismaValue::Float(_))
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            PrismaValue::String(s) => Some(s),
            PrismaValue::Enum(ev) => Some(ev),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<PrismaListValue> {
        match self {
            PrismaValue::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<Vec<(String, PrismaValue)>> {
        match self {
            PrismaValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Looks up the value of a key in an object value.
    pub fn get_field(&self, key: &str) -> Option<&PrismaValue> {
        self.as_object()
            .and_then(|pairs| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v))
    }

    pub fn as_boolean(&self) -> Option<&bool> {
        match self {
            PrismaValue::Boolean(bool) => Some(bool),
            _ => None,
        }
    }

    /// Numeric view of the value, used to compare numbers of different representations.
    pub fn as_decimal(&self) -> Option<BigDecimal> {
        match self {
            PrismaValue::Int(i) | PrismaValue::BigInt(i) => BigDecimal::from_i64(*i),
            PrismaValue::Float(f) => Some(f.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for PrismaValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrismaValue::String(x) => x.fmt(f),
            PrismaValue::Float(x) => x.fmt(f),
            PrismaValue::Boolean(x) => x.fmt(f),
            PrismaValue::DateTime(x) => stringify_datetime(x).fmt(f),
            PrismaValue::Enum(x) => x.fmt(f),
            PrismaValue::Int(x) => x.fmt(f),
            PrismaValue::Null => "null".fmt(f),
            PrismaValue::Json(x) => x.fmt(f),
            PrismaValue::BigInt(x) => x.fmt(f),
            PrismaValue::List(x) => {
                let as_string = format!("{x:?}");
                as_string.fmt(f)
            }
            PrismaValue::Object(pairs) => {
                let joined = pairs
                    .iter()
                    .map(|(key, value)| format!(r#""{key}": {value}"#))
                    .collect::<Vec<_>>()
                    .join(", ");

                write!(f, "{{ {joined} }}")
            }
        }
    }
}

impl From<&str> for PrismaValue {
    fn from(s: &str) -> Self {
        PrismaValue::from(s.to_string())
    }
}

impl From<String> for PrismaValue {
    fn from(s: String) -> Self {
        PrismaValue::String(s)
    }
}

impl TryFrom<f64> for PrismaValue {
    type Error = ConversionFailure;

    fn try_from(f: f64) -> PrismaValueResult<PrismaValue> {
        BigDecimal::from_f64(f)
            .map(|d| PrismaValue::Float(d.normalized()))
            .ok_or_else(|| ConversionFailure::new("f64", "Decimal"))
    }
}

impl From<bool> for PrismaValue {
    fn from(b: bool) -> Self {
        PrismaValue::Boolean(b)
    }
}

impl From<i32> for PrismaValue {
    fn from(i: i32) -> Self {
        PrismaValue::Int(i64::from(i))
    }
}

impl From<i64> for PrismaValue {
    fn from(i: i64) -> Self {
        PrismaValue::Int(i)
    }
}

impl From<PrismaListValue> for PrismaValue {
    fn from(s: PrismaListValue) -> Self {
        PrismaValue::List(s)
    }
}

impl TryFrom<PrismaValue> for i64 {
    type Error = ConversionFailure;

    fn try_from(value: PrismaValue) -> PrismaValueResult<i64> {
        match value {
            PrismaValue::Int(i) | PrismaValue::BigInt(i) => Ok(i),
            _ => Err(ConversionFailure::new("PrismaValue", "i64")),
        }
    }
}

impl TryFrom<PrismaValue> for String {
    type Error = ConversionFailure;

    fn try_from(pv: PrismaValue) -> PrismaValueResult<String> {
        match pv {
            PrismaValue::String(s) => Ok(s),
            _ => Err(ConversionFailure::new("PrismaValue", "String")),
        }
    }
}

impl FromStr for PrismaValue {
    type Err = ConversionFailure;

    /// Parses a JSON document into a value.
    fn from_str(s: &str) -> PrismaValueResult<Self> {
        let json: serde_json::Value =
            serde_json::from_str(s).map_err(|_| ConversionFailure::new("JSON string", "PrismaValue"))?;

        PrismaValue::try_from(json)
    }
}
