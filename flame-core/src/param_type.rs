use crate::{AsValue, Grammar, Value, parse_time, parse_timestamp, parse_timestamptz};
use std::fmt::{self, Display};
use time::{PrimitiveDateTime, Time};

/// Native bind type resolved from the prefix of a placeholder marker.
///
/// | prefix      | type       |
/// |-------------|------------|
/// | none, `s`   | `String`   |
/// | `i`         | `Int`      |
/// | `f`         | `Float`    |
/// | `b`         | `Bool`     |
/// | `l`         | `Lob`      |
/// | `d`         | `DateTime` |
/// | `t`         | `Time`     |
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    #[default]
    String,
    Int,
    Float,
    Bool,
    Lob,
    DateTime,
    Time,
}

impl ParamType {
    /// Every prefix character accepted in front of `:name`.
    pub const PREFIXES: &'static str = "sbilfdt";

    /// Resolve the type of a marker prefix, the empty prefix being `String`.
    pub fn from_prefix(prefix: &str) -> Option<ParamType> {
        Some(match prefix {
            "" | "s" => ParamType::String,
            "i" => ParamType::Int,
            "f" => ParamType::Float,
            "b" => ParamType::Bool,
            "l" => ParamType::Lob,
            "d" => ParamType::DateTime,
            "t" => ParamType::Time,
            _ => return None,
        })
    }

    /// Prefix written in front of `:name` for this type. `String` is written bare.
    pub fn prefix(&self) -> &'static str {
        match self {
            ParamType::String => "",
            ParamType::Int => "i",
            ParamType::Float => "f",
            ParamType::Bool => "b",
            ParamType::Lob => "l",
            ParamType::DateTime => "d",
            ParamType::Time => "t",
        }
    }

    /// Type the builders tag a value with when they turn it into a parameter.
    pub fn of_value(value: &Value) -> ParamType {
        match value {
            Value::Boolean(..) => ParamType::Bool,
            Value::Int8(..)
            | Value::Int16(..)
            | Value::Int32(..)
            | Value::Int64(..)
            | Value::UInt8(..)
            | Value::UInt16(..)
            | Value::UInt32(..)
            | Value::UInt64(..) => ParamType::Int,
            Value::Float32(..) | Value::Float64(..) => ParamType::Float,
            Value::Blob(..) => ParamType::Lob,
            Value::Timestamp(..) | Value::TimestampWithTimezone(..) => ParamType::DateTime,
            Value::Time(..) => ParamType::Time,
            Value::Null | Value::Decimal(..) | Value::Varchar(..) | Value::Date(..) | Value::Uuid(..) => {
                ParamType::String
            }
        }
    }

    /// Convert `value` into the representation bound for this type.
    ///
    /// The result is always one of `Null`, `Varchar`, `Int64`, `Float64`,
    /// `Boolean` or `Blob`. Date-time and time values become text rendered by
    /// `grammar`. `Float` keeps decimals and numeric text as exact text, only
    /// native numbers become `Float64`. On failure the reason is returned.
    pub fn coerce(&self, value: Value, grammar: &dyn Grammar) -> Result<Value, String> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        match self {
            ParamType::String => Ok(Value::Varchar(match value {
                Value::Varchar(v) => v,
                Value::Blob(v) => String::from_utf8(v.into_vec())
                    .map_err(|_| "the blob is not valid UTF-8".to_string())?,
                Value::Date(v) => {
                    let mut out = String::with_capacity(10);
                    grammar.write_bind_date(&mut out, &v);
                    out
                }
                Value::Time(v) => {
                    let mut out = String::with_capacity(18);
                    grammar.write_bind_time(&mut out, &v);
                    out
                }
                Value::Timestamp(v) => {
                    let mut out = String::with_capacity(29);
                    grammar.write_bind_timestamp(&mut out, &v);
                    out
                }
                Value::TimestampWithTimezone(v) => {
                    let mut out = String::with_capacity(29);
                    grammar.write_bind_timestamptz(&mut out, &v);
                    out
                }
                v => v.to_string(),
            })),
            ParamType::Int => match value {
                Value::Float32(..) | Value::Float64(..) => {
                    let v = value.as_float().unwrap_or(f64::NAN);
                    // i64::MAX as f64 rounds up to 2^63, which does not fit
                    if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                        Ok(Value::Int64(v as i64))
                    } else {
                        Err(format!("{} is not an integer", v))
                    }
                }
                Value::Boolean(v) => Ok(Value::Int64(v as i64)),
                v => i64::try_from_value(v)
                    .map(Value::Int64)
                    .map_err(|e| e.to_string()),
            },
            ParamType::Float => match value {
                Value::Boolean(..) => Err("a boolean is not a number".into()),
                Value::Decimal(v) => Ok(Value::Varchar(v.to_string())),
                Value::Varchar(v) => match v.trim().parse::<f64>() {
                    Ok(n) if n.is_finite() => Ok(Value::Varchar(v.trim().to_string())),
                    _ => Err(format!("`{}` is not a number", v)),
                },
                v => f64::try_from_value(v)
                    .map(Value::Float64)
                    .map_err(|e| e.to_string()),
            },
            ParamType::Bool => bool::try_from_value(value)
                .map(Value::Boolean)
                .map_err(|e| e.to_string()),
            ParamType::Lob => match value {
                Value::Blob(v) => Ok(Value::Blob(v)),
                Value::Varchar(v) => Ok(Value::Blob(v.into_bytes().into_boxed_slice())),
                v => Err(format!("{} is not binary data", v.type_name())),
            },
            ParamType::DateTime => {
                let mut out = String::with_capacity(29);
                match value {
                    Value::TimestampWithTimezone(v) => grammar.write_bind_timestamptz(&mut out, &v),
                    Value::Varchar(v) => match parse_timestamptz(&v) {
                        Ok(v) => grammar.write_bind_timestamptz(&mut out, &v),
                        Err(..) => {
                            let v = parse_timestamp(&v).map_err(|e| e.to_string())?;
                            grammar.write_bind_timestamp(&mut out, &v);
                        }
                    },
                    v => {
                        let v = PrimitiveDateTime::try_from_value(v).map_err(|e| e.to_string())?;
                        grammar.write_bind_timestamp(&mut out, &v);
                    }
                }
                Ok(Value::Varchar(out))
            }
            ParamType::Time => {
                let v = match value {
                    Value::Varchar(v) => parse_time(&v)
                        .or_else(|_| parse_timestamp(&v).map(|v| v.time()))
                        .map_err(|e| e.to_string())?,
                    v => Time::try_from_value(v).map_err(|e| e.to_string())?,
                };
                let mut out = String::with_capacity(18);
                grammar.write_bind_time(&mut out, &v);
                Ok(Value::Varchar(out))
            }
        }
    }
}

impl Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParamType::String => "STRING",
            ParamType::Int => "INT",
            ParamType::Float => "FLOAT",
            ParamType::Bool => "BOOL",
            ParamType::Lob => "LOB",
            ParamType::DateTime => "DATETIME",
            ParamType::Time => "TIME",
        })
    }
}
