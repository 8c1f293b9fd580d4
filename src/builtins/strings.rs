// ABOUTME: String-case builtins — uppercase/lowercase, rebinding the variable to the transformed value

use crate::error::InterpretError;
use crate::interpreter::Interpreter;
use crate::value::Value;

fn expect_str(name: &str, value: Value) -> Result<String, InterpretError> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(InterpretError::TypeError(format!(
            "\"{}\" 는 문자열이 아님 ({})",
            name,
            other.type_name()
        ))),
    }
}

pub fn uppercase(interp: &mut Interpreter, name: &str) -> Result<(), InterpretError> {
    let s = expect_str(name, interp.env.lookup(name)?)?;
    interp.env.assign(name, Value::Str(s.to_uppercase()))
}

pub fn lowercase(interp: &mut Interpreter, name: &str) -> Result<(), InterpretError> {
    let s = expect_str(name, interp.env.lookup(name)?)?;
    interp.env.assign(name, Value::Str(s.to_lowercase()))
}
