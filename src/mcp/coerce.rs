//! Argument coercion from loose JSON to declared primitive types
//!
//! Keys are matched by parameter name only. A missing (or `null`) argument
//! becomes the parameter's absent value rather than an error: callers cannot
//! tell an omitted numeric argument from an explicit zero. Ranges and
//! formats are the tool's business.

use crate::tools::{json_kind, ArgValue, ParamSpec, PrimitiveType, ToolSignature};
use crate::types::{Result, ToolError};
use serde_json::{Map, Number, Value};

/// One value per declared parameter, in declaration order
pub fn coerce_arguments(signature: &ToolSignature, raw: &Map<String, Value>) -> Result<Vec<ArgValue>> {
    signature
        .parameters
        .iter()
        .map(|param| coerce_value(param, raw.get(&param.name)))
        .collect()
}

fn coerce_value(param: &ParamSpec, raw: Option<&Value>) -> Result<ArgValue> {
    let value = match raw {
        None | Some(Value::Null) => return Ok(ArgValue::absent(param.ty)),
        Some(value) => value,
    };

    match param.ty {
        PrimitiveType::Int => Ok(ArgValue::Int(number(param, value)?.as_i32_lossy())),
        PrimitiveType::Long => Ok(ArgValue::Long(number(param, value)?.as_i64_lossy())),
        PrimitiveType::Double => Ok(ArgValue::Double(number(param, value)?.as_f64().unwrap_or_default())),
        PrimitiveType::Boolean => match value {
            Value::Bool(b) => Ok(ArgValue::Boolean(*b)),
            other => Err(type_error(param, other)),
        },
        PrimitiveType::String => Ok(ArgValue::Raw(value.clone())),
    }
}

fn number<'v>(param: &ParamSpec, value: &'v Value) -> Result<&'v Number> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(type_error(param, other)),
    }
}

fn type_error(param: &ParamSpec, value: &Value) -> ToolError {
    ToolError::ArgumentType {
        param: param.name.clone(),
        expected: param.ty,
        found: json_kind(value),
    }
}

trait LossyInteger {
    fn as_i64_lossy(&self) -> i64;
    fn as_i32_lossy(&self) -> i32;
}

impl LossyInteger for Number {
    /// Integers wrap into 64 bits, fractions truncate toward zero
    fn as_i64_lossy(&self) -> i64 {
        if let Some(i) = self.as_i64() {
            i
        } else if let Some(u) = self.as_u64() {
            u as i64
        } else {
            self.as_f64().unwrap_or_default() as i64
        }
    }

    /// Integers wrap into 32 bits, fractions saturate at the i32 bounds
    fn as_i32_lossy(&self) -> i32 {
        if self.is_f64() {
            self.as_f64().unwrap_or_default() as i32
        } else {
            self.as_i64_lossy() as i32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn signature() -> ToolSignature {
        ToolSignature::new("mixed", "")
            .param("a", PrimitiveType::Int, "")
            .param("b", PrimitiveType::Long, "")
            .param("c", PrimitiveType::Double, "")
            .param("d", PrimitiveType::Boolean, "")
            .param("e", PrimitiveType::String, "")
    }

    #[test]
    fn test_declaration_order_and_types() {
        let raw = args(json!({"e": "hi", "d": true, "c": 2.5, "b": 9000000000i64, "a": 3}));
        let values = coerce_arguments(&signature(), &raw).unwrap();

        assert_eq!(
            values,
            vec![
                ArgValue::Int(3),
                ArgValue::Long(9_000_000_000),
                ArgValue::Double(2.5),
                ArgValue::Boolean(true),
                ArgValue::Raw(json!("hi")),
            ]
        );
    }

    #[test]
    fn test_missing_arguments_become_absent_values() {
        let values = coerce_arguments(&signature(), &Map::new()).unwrap();
        assert_eq!(
            values,
            vec![
                ArgValue::Int(0),
                ArgValue::Long(0),
                ArgValue::Double(0.0),
                ArgValue::Boolean(false),
                ArgValue::Raw(Value::Null),
            ]
        );
    }

    #[test]
    fn test_explicit_null_is_absent() {
        let values = coerce_arguments(&signature(), &args(json!({"a": null, "e": null}))).unwrap();
        assert_eq!(values[0], ArgValue::Int(0));
        assert_eq!(values[4], ArgValue::Raw(Value::Null));
    }

    #[test]
    fn test_numeric_narrowing_and_widening() {
        let values = coerce_arguments(&signature(), &args(json!({"a": 7.9, "c": 4}))).unwrap();
        assert_eq!(values[0], ArgValue::Int(7));
        assert_eq!(values[2], ArgValue::Double(4.0));

        let values = coerce_arguments(&signature(), &args(json!({"a": 4294967298i64}))).unwrap();
        assert_eq!(values[0], ArgValue::Int(2));
    }

    #[test]
    fn test_large_fraction_saturates_int() {
        let values = coerce_arguments(&signature(), &args(json!({"a": 1e10, "b": 1e10}))).unwrap();
        assert_eq!(values[0], ArgValue::Int(i32::MAX));
        assert_eq!(values[1], ArgValue::Long(10_000_000_000));

        let values = coerce_arguments(&signature(), &args(json!({"a": -1e10}))).unwrap();
        assert_eq!(values[0], ArgValue::Int(i32::MIN));
    }

    #[test]
    fn test_non_numeric_for_numeric_param_fails() {
        let err = coerce_arguments(&signature(), &args(json!({"a": "5"}))).unwrap_err();
        assert_eq!(err.to_string(), "Argument 'a' must be int, got string");
    }

    #[test]
    fn test_boolean_requires_json_boolean() {
        let err = coerce_arguments(&signature(), &args(json!({"d": "true"}))).unwrap_err();
        assert!(matches!(err, ToolError::ArgumentType { ref param, .. } if param == "d"));
    }

    #[test]
    fn test_string_passes_raw_value_through() {
        let values = coerce_arguments(&signature(), &args(json!({"e": [1, 2]}))).unwrap();
        assert_eq!(values[4], ArgValue::Raw(json!([1, 2])));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let values = coerce_arguments(&signature(), &args(json!({"zzz": 1}))).unwrap();
        assert_eq!(values.len(), 5);
    }
}
