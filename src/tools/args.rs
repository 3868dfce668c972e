//! Coerced argument values handed to tool handlers

use super::{PrimitiveType, ToolSignature};
use crate::types::{Result, ToolError};
use serde_json::Value;

/// A native argument value, one per declared parameter.
///
/// A parameter the caller left out arrives as its zero value (`0`, `0.0`,
/// `false`) or, for string parameters, as `Raw(Value::Null)`. A numeric
/// zero therefore does not prove the caller sent one.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Int(i32),
    Long(i64),
    Double(f64),
    Boolean(bool),
    /// String parameters receive the raw JSON value unconverted
    Raw(Value),
}

impl ArgValue {
    /// Value used when the caller supplied nothing for a parameter
    pub fn absent(ty: PrimitiveType) -> Self {
        match ty {
            PrimitiveType::Int => Self::Int(0),
            PrimitiveType::Long => Self::Long(0),
            PrimitiveType::Double => Self::Double(0.0),
            PrimitiveType::Boolean => Self::Boolean(false),
            PrimitiveType::String => Self::Raw(Value::Null),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Double(_) => "double",
            Self::Boolean(_) => "boolean",
            Self::Raw(value) => json_kind(value),
        }
    }
}

/// JSON type name of a value, for error messages
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Positional arguments of one invocation
#[derive(Debug)]
pub struct ToolArgs<'a> {
    signature: &'a ToolSignature,
    values: Vec<ArgValue>,
}

impl<'a> ToolArgs<'a> {
    pub fn new(signature: &'a ToolSignature, values: Vec<ArgValue>) -> Self {
        Self { signature, values }
    }

    pub fn int(&self, index: usize) -> Result<i32> {
        match self.value(index)? {
            ArgValue::Int(v) => Ok(*v),
            ArgValue::Long(v) => Ok(*v as i32),
            ArgValue::Double(v) => Ok(*v as i32),
            other => Err(self.mismatch(index, PrimitiveType::Int, other)),
        }
    }

    pub fn long(&self, index: usize) -> Result<i64> {
        match self.value(index)? {
            ArgValue::Int(v) => Ok(i64::from(*v)),
            ArgValue::Long(v) => Ok(*v),
            ArgValue::Double(v) => Ok(*v as i64),
            other => Err(self.mismatch(index, PrimitiveType::Long, other)),
        }
    }

    pub fn double(&self, index: usize) -> Result<f64> {
        match self.value(index)? {
            ArgValue::Int(v) => Ok(f64::from(*v)),
            ArgValue::Long(v) => Ok(*v as f64),
            ArgValue::Double(v) => Ok(*v),
            other => Err(self.mismatch(index, PrimitiveType::Double, other)),
        }
    }

    pub fn boolean(&self, index: usize) -> Result<bool> {
        match self.value(index)? {
            ArgValue::Boolean(v) => Ok(*v),
            other => Err(self.mismatch(index, PrimitiveType::Boolean, other)),
        }
    }

    /// Borrow a string argument. A missing string argument is an error here,
    /// since there is no meaningful zero value to run with.
    pub fn text(&self, index: usize) -> Result<&str> {
        match self.value(index)? {
            ArgValue::Raw(Value::String(s)) => Ok(s),
            ArgValue::Raw(Value::Null) => Err(ToolError::MissingArgument(self.name(index))),
            other => Err(self.mismatch(index, PrimitiveType::String, other)),
        }
    }

    fn value(&self, index: usize) -> Result<&ArgValue> {
        self.values
            .get(index)
            .ok_or_else(|| ToolError::MissingArgument(self.name(index)))
    }

    fn name(&self, index: usize) -> String {
        self.signature
            .parameters
            .get(index)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("#{}", index))
    }

    fn mismatch(&self, index: usize, expected: PrimitiveType, found: &ArgValue) -> ToolError {
        ToolError::ArgumentType {
            param: self.name(index),
            expected,
            found: found.kind(),
        }
    }
}
