//! Conversion of raw command-line text to declared parameter types.

use crate::inspect::Snapshot;
use crate::model::{OBJECT_TYPE, STRING_TYPE, TypeRef, Value};
use std::char::ParseCharError;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoercionError {
    #[error("String was not recognized as a valid Boolean")]
    Bool,
    #[error(transparent)]
    Char(#[from] ParseCharError),
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Float(#[from] ParseFloatError),
    #[error("Requested value '{value}' was not found in enum '{enum_type}'")]
    EnumValue { value: String, enum_type: String },
    #[error("Conversion to '{0}' is not supported")]
    Unsupported(String),
}

/// Convert `raw` to `target`. Enum targets are looked up in `types`.
pub fn coerce(raw: &str, target: &TypeRef, types: &Snapshot) -> Result<Value, CoercionError> {
    if target.is(STRING_TYPE) || target.is(OBJECT_TYPE) {
        return Ok(Value::Str(raw.to_string()));
    }
    if let Some(underlying) = &target.underlying {
        if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
            return Ok(Value::Null);
        }
        return coerce(raw, underlying, types);
    }
    convert(raw, &target.full_name, types)
}

fn convert(raw: &str, target: &str, types: &Snapshot) -> Result<Value, CoercionError> {
    let text = raw.trim();
    let value = match target {
        "System.Boolean" => match text.to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => return Err(CoercionError::Bool),
        },
        "System.Char" => Value::Char(raw.parse()?),
        "System.SByte" => Value::Int(text.parse::<i8>()?.into()),
        "System.Int16" => Value::Int(text.parse::<i16>()?.into()),
        "System.Int32" => Value::Int(text.parse::<i32>()?.into()),
        "System.Int64" => Value::Int(text.parse::<i64>()?),
        "System.Byte" => Value::UInt(text.parse::<u8>()?.into()),
        "System.UInt16" => Value::UInt(text.parse::<u16>()?.into()),
        "System.UInt32" => Value::UInt(text.parse::<u32>()?.into()),
        "System.UInt64" => Value::UInt(text.parse::<u64>()?),
        "System.Single" => Value::Float(text.parse::<f32>()?.into()),
        "System.Double" | "System.Decimal" => Value::Float(text.parse::<f64>()?),
        other => return enum_value(text, other, types),
    };
    Ok(value)
}

fn enum_value(text: &str, target: &str, types: &Snapshot) -> Result<Value, CoercionError> {
    let ty = types
        .find(target)
        .filter(|t| t.is_enum())
        .ok_or_else(|| CoercionError::Unsupported(target.to_string()))?;

    let by_name = ty.enum_values.iter().find(|v| v.as_str() == text);
    let by_ordinal = || {
        text.parse::<usize>()
            .ok()
            .and_then(|i| ty.enum_values.get(i))
    };
    match by_name.or_else(by_ordinal) {
        Some(name) => Ok(Value::Enum {
            type_name: ty.full_name.clone(),
            name: name.clone(),
        }),
        None => Err(CoercionError::EnumValue {
            value: text.to_string(),
            enum_type: ty.name.clone(),
        }),
    }
}
