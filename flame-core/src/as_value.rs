use crate::{Error, Result, Value, truncate_long};
use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};
use std::any;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// `as_value` is used when a Rust value becomes a statement parameter,
/// `try_from_value` when a value read from a row is decoded back.
///
/// Conversions accept the canonical variant of the type and, where it is
/// lossless, other variants too (narrower integers, integral decimals,
/// textual representations returned by loosely typed backends). Out of range
/// values are always an error.
///
/// ```rust
/// use flame_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert_eq!(v, Value::Int32(42));
/// let n: i64 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    fn as_value(self) -> Value;
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(value.into())
    }
}

fn conversion_error<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {} value {} to {}",
        value.type_name(),
        value,
        any::type_name::<T>(),
    ))
}

macro_rules! impl_as_value_integer {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_value(self) -> Value {
                $destination(self)
            }
            fn try_from_value(value: Value) -> Result<Self> {
                if let $destination(v) = value {
                    return Ok(v);
                }
                let wide = match &value {
                    Value::Decimal(v) if v.is_integer() => v.to_i128(),
                    Value::Varchar(v) => v.trim().parse::<i128>().ok(),
                    v => v.as_integer(),
                };
                let Some(wide) = wide else {
                    return Err(conversion_error::<Self>(&value));
                };
                <$source>::try_from(wide).map_err(|_| {
                    Error::msg(format!(
                        "Value {} is out of range for {}",
                        wide,
                        any::type_name::<Self>(),
                    ))
                })
            }
        }
    };
}
impl_as_value_integer!(i8, Value::Int8);
impl_as_value_integer!(i16, Value::Int16);
impl_as_value_integer!(i32, Value::Int32);
impl_as_value_integer!(i64, Value::Int64);
impl_as_value_integer!(u8, Value::UInt8);
impl_as_value_integer!(u16, Value::UInt16);
impl_as_value_integer!(u32, Value::UInt32);
impl_as_value_integer!(u64, Value::UInt64);

impl AsValue for bool {
    fn as_value(self) -> Value {
        Value::Boolean(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(v) => Ok(v),
            Value::Varchar(ref v) => match v.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(conversion_error::<Self>(&value)),
            },
            ref v => v
                .as_integer()
                .map(|v| v != 0)
                .ok_or_else(|| conversion_error::<Self>(&value)),
        }
    }
}

impl AsValue for f64 {
    fn as_value(self) -> Value {
        Value::Float64(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float64(v) => Ok(v),
            Value::Varchar(ref v) => v
                .trim()
                .parse::<f64>()
                .map_err(|_| conversion_error::<Self>(&value)),
            ref v => v.as_float().ok_or_else(|| conversion_error::<Self>(&value)),
        }
    }
}

impl AsValue for f32 {
    fn as_value(self) -> Value {
        Value::Float32(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float32(v) => Ok(v),
            v => f64::try_from_value(v).map(|v| v as f32),
        }
    }
}

impl AsValue for Decimal {
    fn as_value(self) -> Value {
        Value::Decimal(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Decimal(v) => Ok(v),
            Value::Float32(v) => {
                Decimal::from_f32(v).ok_or_else(|| conversion_error::<Self>(&value))
            }
            Value::Float64(v) => {
                Decimal::from_f64(v).ok_or_else(|| conversion_error::<Self>(&value))
            }
            Value::Varchar(ref v) => v
                .trim()
                .parse::<Decimal>()
                .map_err(|_| conversion_error::<Self>(&value)),
            ref v => v
                .as_integer()
                .and_then(Decimal::from_i128)
                .ok_or_else(|| conversion_error::<Self>(&value)),
        }
    }
}

impl AsValue for String {
    fn as_value(self) -> Value {
        Value::Varchar(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Varchar(v) => Ok(v),
            Value::Blob(v) => String::from_utf8(v.into_vec()).map_err(|e| {
                Error::new(e).context("Cannot convert a BLOB that is not valid UTF-8 to String")
            }),
            Value::Null => Err(conversion_error::<Self>(&value)),
            v => Ok(v.to_string()),
        }
    }
}

impl AsValue for Box<[u8]> {
    fn as_value(self) -> Value {
        Value::Blob(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(v) => Ok(v),
            Value::Varchar(v) => Ok(v.into_bytes().into_boxed_slice()),
            v => Err(conversion_error::<Self>(&v)),
        }
    }
}

impl AsValue for Vec<u8> {
    fn as_value(self) -> Value {
        Value::Blob(self.into_boxed_slice())
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Box::<[u8]>::try_from_value(value).map(Into::into)
    }
}

impl AsValue for Uuid {
    fn as_value(self) -> Value {
        Value::Uuid(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Uuid(v) => Ok(v),
            Value::Varchar(ref v) => {
                Uuid::parse_str(v.trim()).map_err(|_| conversion_error::<Self>(&value))
            }
            Value::Blob(ref v) => Uuid::from_slice(v).map_err(|_| conversion_error::<Self>(&value)),
            v => Err(conversion_error::<Self>(&v)),
        }
    }
}

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[hour]:[minute]:[second].[subsecond]"),
    format_description!("[hour]:[minute]:[second]"),
    format_description!("[hour]:[minute]"),
];
const TIMESTAMP_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
];
const TIMESTAMPTZ_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond][offset_hour]:[offset_minute]"
    ),
    format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour]:[offset_minute]"
    ),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second][offset_hour]:[offset_minute]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour]:[offset_minute]"),
];

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<Date> {
    let input = input.trim();
    Date::parse(input, DATE_FORMAT).map_err(|e| {
        Error::new(e).context(format!("Cannot parse `{}` as a date", truncate_long!(input)))
    })
}

/// Parse a time of day, with optional seconds and fraction.
pub fn parse_time(input: &str) -> Result<Time> {
    let input = input.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| Time::parse(input, format).ok())
        .ok_or_else(|| Error::msg(format!("Cannot parse `{}` as a time", truncate_long!(input))))
}

/// Parse a date-time separated either by a space or by `T`. A bare date is midnight.
pub fn parse_timestamp(input: &str) -> Result<PrimitiveDateTime> {
    let input = input.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(input, format).ok())
        .or_else(|| {
            Date::parse(input, DATE_FORMAT)
                .ok()
                .map(|v| v.with_time(Time::MIDNIGHT))
        })
        .ok_or_else(|| {
            Error::msg(format!(
                "Cannot parse `{}` as a timestamp",
                truncate_long!(input)
            ))
        })
}

/// Parse a date-time carrying a `+HH:MM` offset.
pub fn parse_timestamptz(input: &str) -> Result<OffsetDateTime> {
    let input = input.trim();
    TIMESTAMPTZ_FORMATS
        .iter()
        .find_map(|format| OffsetDateTime::parse(input, format).ok())
        .ok_or_else(|| {
            Error::msg(format!(
                "Cannot parse `{}` as a timestamp with time zone",
                truncate_long!(input)
            ))
        })
}

impl AsValue for Date {
    fn as_value(self) -> Value {
        Value::Date(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Date(v) => Ok(v),
            Value::Timestamp(v) => Ok(v.date()),
            Value::Varchar(v) => parse_date(&v),
            v => Err(conversion_error::<Self>(&v)),
        }
    }
}

impl AsValue for Time {
    fn as_value(self) -> Value {
        Value::Time(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Time(v) => Ok(v),
            Value::Timestamp(v) => Ok(v.time()),
            Value::TimestampWithTimezone(v) => Ok(v.time()),
            Value::Varchar(v) => parse_time(&v),
            v => Err(conversion_error::<Self>(&v)),
        }
    }
}

impl AsValue for PrimitiveDateTime {
    fn as_value(self) -> Value {
        Value::Timestamp(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Timestamp(v) => Ok(v),
            Value::TimestampWithTimezone(v) => {
                let v = v.to_offset(UtcOffset::UTC);
                Ok(PrimitiveDateTime::new(v.date(), v.time()))
            }
            Value::Date(v) => Ok(v.with_time(Time::MIDNIGHT)),
            Value::Varchar(v) => parse_timestamp(&v),
            v => Err(conversion_error::<Self>(&v)),
        }
    }
}

impl AsValue for OffsetDateTime {
    fn as_value(self) -> Value {
        Value::TimestampWithTimezone(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::TimestampWithTimezone(v) => Ok(v),
            Value::Timestamp(v) => Ok(v.assume_utc()),
            Value::Varchar(v) => parse_timestamptz(&v),
            v => Err(conversion_error::<Self>(&v)),
        }
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => Value::Null,
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            v => T::try_from_value(v).map(Some),
        }
    }
}
