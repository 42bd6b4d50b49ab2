use super::ValueRecord;
use crate::{Error, Result};

#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "serde_json::Value")
)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// 64-bit floating point number
    F64(f64),

    /// Signed 64-bit integer
    I64(i64),

    /// A list of values. Never valid as a key or data value; kept so that
    /// caller input can be represented and rejected with a precise error.
    List(Vec<Value>),

    /// Null value
    #[default]
    Null,

    /// Nested key-map. Valid only directly under a row key, where it wraps
    /// the physical columns of a compound key.
    Record(ValueRecord),

    /// String value
    String(String),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for values that can be rendered as a single SQL
    /// scalar: null, booleans, integers, finite floats and strings.
    pub fn is_scalar(&self) -> bool {
        match self {
            Self::Null | Self::Bool(_) | Self::I64(_) | Self::String(_) => true,
            Self::F64(v) => v.is_finite(),
            Self::List(_) | Self::Record(_) => false,
        }
    }

    /// Name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::F64(v) if !v.is_finite() => "non-finite F64",
            Self::F64(_) => "F64",
            Self::I64(_) => "I64",
            Self::List(_) => "List",
            Self::Null => "Null",
            Self::Record(_) => "Record",
            Self::String(_) => "String",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            Self::I64(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn to_i64(self) -> Result<i64> {
        match self {
            Self::I64(v) => Ok(v),
            value => Err(Error::type_conversion(value, "i64")),
        }
    }

    /// Reads a boolean, accepting the `0`/`1` integers SQLite stores booleans as.
    pub fn to_bool(self) -> Result<bool> {
        match self {
            Self::Bool(v) => Ok(v),
            Self::I64(0) => Ok(false),
            Self::I64(1) => Ok(true),
            value => Err(Error::type_conversion(value, "bool")),
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

macro_rules! impl_from_int {
    ( $($t:ty),+ ) => {
        $(
            impl From<$t> for Value {
                fn from(src: $t) -> Self {
                    Self::I64(src.into())
                }
            }
        )+
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(src: f32) -> Self {
        Self::F64(src.into())
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<ValueRecord> for Value {
    fn from(src: ValueRecord) -> Self {
        Self::Record(src)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(src: Vec<T>) -> Self {
        Self::List(src.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<u64> for Value {
    type Error = Error;

    fn try_from(src: u64) -> Result<Self> {
        i64::try_from(src).map(Self::I64).map_err(|_| u64_out_of_range(src, "I64 conversion"))
    }
}

/// Integers are stored as `I64`; larger `u64`s are refused rather than
/// rounded.
pub(crate) fn u64_out_of_range(src: u64, location: &str) -> Error {
    crate::err!("{src} exceeds i64::MAX").context(Error::unsupported_value_type("u64", location))
}
