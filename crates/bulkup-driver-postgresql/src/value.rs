use bulkup_core::{
    stmt::{self, Value as CoreValue},
    Error, Result,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use postgres::{
    types::{private::BytesMut, to_sql_checked, FromSql, IsNull, Kind, ToSql, Type},
    Column, Row,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

type BoxError = Box<dyn std::error::Error + Sync + Send>;

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Converts a PostgreSQL value within a row to a core value.
    ///
    /// Types without a core counterpart (enums, numerics, UUIDs, dates and
    /// times) are read as their text rendering.
    pub fn from_sql(row: &Row, index: usize, column: &Column) -> Result<Self> {
        // NOTE: the inner representation of the PostgreSQL type enum is not
        // accessible, so each type is matched manually.
        let ty = column.type_();

        let value = if *ty == Type::TEXT
            || *ty == Type::VARCHAR
            || *ty == Type::BPCHAR
            || *ty == Type::NAME
        {
            get::<String>(row, index)?.map(stmt::Value::String)
        } else if matches!(ty.kind(), Kind::Enum(_)) {
            get::<Label>(row, index)?.map(|label| stmt::Value::String(label.0))
        } else if *ty == Type::BOOL {
            get::<bool>(row, index)?.map(stmt::Value::Bool)
        } else if *ty == Type::INT2 {
            get::<i16>(row, index)?.map(|v| stmt::Value::I64(v.into()))
        } else if *ty == Type::INT4 {
            get::<i32>(row, index)?.map(|v| stmt::Value::I64(v.into()))
        } else if *ty == Type::INT8 {
            get::<i64>(row, index)?.map(stmt::Value::I64)
        } else if *ty == Type::FLOAT4 {
            get::<f32>(row, index)?.map(|v| stmt::Value::F64(v.into()))
        } else if *ty == Type::FLOAT8 {
            get::<f64>(row, index)?.map(stmt::Value::F64)
        } else if *ty == Type::NUMERIC {
            get::<Decimal>(row, index)?.map(|v| stmt::Value::String(v.to_string()))
        } else if *ty == Type::UUID {
            get::<Uuid>(row, index)?.map(|v| stmt::Value::String(v.to_string()))
        } else if *ty == Type::TIMESTAMP {
            get::<NaiveDateTime>(row, index)?.map(|v| stmt::Value::String(v.to_string()))
        } else if *ty == Type::TIMESTAMPTZ {
            get::<DateTime<Utc>>(row, index)?.map(|v| stmt::Value::String(v.to_rfc3339()))
        } else if *ty == Type::DATE {
            get::<NaiveDate>(row, index)?.map(|v| stmt::Value::String(v.to_string()))
        } else if *ty == Type::TIME {
            get::<NaiveTime>(row, index)?.map(|v| stmt::Value::String(v.to_string()))
        } else {
            return Err(Error::unsupported_value_type(
                ty.name(),
                format!("result column `{}`", column.name()),
            ));
        };

        Ok(Value(value.unwrap_or(stmt::Value::Null)))
    }
}

fn get<'a, T: FromSql<'a>>(row: &'a Row, index: usize) -> Result<Option<T>> {
    row.try_get::<_, Option<T>>(index).map_err(Error::driver)
}

impl ToSql for Value {
    /// Parameter types are inferred by PostgreSQL from the column each
    /// placeholder is compared with or assigned to, so integers and floats
    /// are narrowed to whatever width the column has and strings are parsed
    /// into the column's type.
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> std::result::Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        match &self.0 {
            stmt::Value::Null => Ok(IsNull::Yes),
            stmt::Value::Bool(value) if <bool as ToSql>::accepts(ty) => value.to_sql(ty, out),
            stmt::Value::I64(value) => match *ty {
                Type::INT2 => i16::try_from(*value)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*value)?.to_sql(ty, out),
                Type::INT8 => value.to_sql(ty, out),
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::FLOAT8 => (*value as f64).to_sql(ty, out),
                Type::NUMERIC => Decimal::from(*value).to_sql(ty, out),
                _ => Err(mismatch(&self.0, ty)),
            },
            stmt::Value::F64(value) => match *ty {
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::FLOAT8 => value.to_sql(ty, out),
                Type::NUMERIC => Decimal::try_from(*value)?.to_sql(ty, out),
                _ => Err(mismatch(&self.0, ty)),
            },
            stmt::Value::String(value) => string_to_sql(value, ty, out),
            value => Err(mismatch(value, ty)),
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(ty.kind(), Kind::Enum(_))
            || <bool as ToSql>::accepts(ty)
            || <i64 as ToSql>::accepts(ty)
            || <i32 as ToSql>::accepts(ty)
            || <i16 as ToSql>::accepts(ty)
            || <f64 as ToSql>::accepts(ty)
            || <f32 as ToSql>::accepts(ty)
            || <String as ToSql>::accepts(ty)
            || <Decimal as ToSql>::accepts(ty)
            || <Uuid as ToSql>::accepts(ty)
            || <NaiveDateTime as ToSql>::accepts(ty)
            || <DateTime<Utc> as ToSql>::accepts(ty)
            || <NaiveDate as ToSql>::accepts(ty)
            || <NaiveTime as ToSql>::accepts(ty)
    }

    to_sql_checked!();
}

fn string_to_sql(
    value: &str,
    ty: &Type,
    out: &mut BytesMut,
) -> std::result::Result<IsNull, BoxError> {
    // Enum values travel as their label, in both text and binary format.
    if let Kind::Enum(_) = ty.kind() {
        out.extend_from_slice(value.as_bytes());
        return Ok(IsNull::No);
    }

    match *ty {
        Type::NUMERIC => parse::<Decimal>(value, ty)?.to_sql(ty, out),
        Type::UUID => parse::<Uuid>(value, ty)?.to_sql(ty, out),
        Type::TIMESTAMP => parse_timestamp(value)
            .ok_or_else(|| unparsable(value, ty))?
            .to_sql(ty, out),
        Type::TIMESTAMPTZ => parse_timestamptz(value)
            .ok_or_else(|| unparsable(value, ty))?
            .to_sql(ty, out),
        Type::DATE => parse::<NaiveDate>(value, ty)?.to_sql(ty, out),
        Type::TIME => parse::<NaiveTime>(value, ty)?.to_sql(ty, out),
        _ if <String as ToSql>::accepts(ty) => value.to_sql(ty, out),
        _ => Err(mismatch(&CoreValue::from(value), ty)),
    }
}

fn parse<T: FromStr>(value: &str, ty: &Type) -> std::result::Result<T, BoxError> {
    value.parse().map_err(|_| unparsable(value, ty))
}

/// Accepts `2024-05-01T10:30:00`, `2024-05-01 10:30:00` and RFC 3339 strings
/// with an offset, which are converted to UTC.
fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::from_str(value)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| parse_timestamptz(value).map(|v| v.naive_utc()))
}

/// Strings without an offset are read as UTC.
fn parse_timestamptz(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(v) => Some(v.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::from_str(value)
            .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|v| v.and_utc()),
    }
}

fn mismatch(value: &CoreValue, ty: &Type) -> BoxError {
    Box::new(
        bulkup_core::err!("parameter type is {}", ty.name())
            .context(Error::type_conversion(value.clone(), "PostgreSQL parameter")),
    )
}

fn unparsable(value: &str, ty: &Type) -> BoxError {
    Box::new(
        bulkup_core::err!("`{value}` is not a valid {}", ty.name())
            .context(Error::type_conversion(CoreValue::from(value), "PostgreSQL parameter")),
    )
}

/// An enum label read from a result row.
struct Label(String);

impl<'a> FromSql<'a> for Label {
    fn from_sql(_: &Type, raw: &'a [u8]) -> std::result::Result<Self, BoxError> {
        Ok(Label(std::str::from_utf8(raw)?.to_string()))
    }

    fn accepts(ty: &Type) -> bool {
        matches!(ty.kind(), Kind::Enum(_))
    }
}
