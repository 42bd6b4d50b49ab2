use super::{value::u64_out_of_range, Value, ValueRecord};
use crate::Error;

impl TryFrom<serde_json::Value> for Value {
    type Error = Error;

    fn try_from(src: serde_json::Value) -> Result<Self, Error> {
        use serde_json::Value as Json;

        Ok(match src {
            Json::Null => Value::Null,
            Json::Bool(v) => Value::Bool(v),
            Json::Number(v) => match (v.as_i64(), v.as_u64()) {
                (Some(v), _) => Value::I64(v),
                (None, Some(v)) => return Err(u64_out_of_range(v, "JSON number")),
                (None, None) => Value::F64(v.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(v) => Value::String(v),
            Json::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Json::Object(fields) => Value::Record(fields.try_into()?),
        })
    }
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for ValueRecord {
    type Error = Error;

    fn try_from(src: serde_json::Map<String, serde_json::Value>) -> Result<Self, Error> {
        src.into_iter()
            .map(|(name, value)| Ok::<_, Error>((name, Value::try_from(value)?)))
            .collect()
    }
}
