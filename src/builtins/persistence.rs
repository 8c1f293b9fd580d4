// ABOUTME: Environment-variable and variable-persistence builtins — save/load user frames as JSON

use super::json::{json_to_value, value_to_json};
use crate::error::InterpretError;
use crate::interpreter::Interpreter;
use serde_json::Value as JsonValue;

pub fn print_env_var(interp: &mut Interpreter, name: &str) -> Result<(), InterpretError> {
    let rendered = std::env::var(name).unwrap_or_default();
    interp.output(&rendered);
    Ok(())
}

pub fn set_env_var(_interp: &mut Interpreter, name: &str, value: &str) -> Result<(), InterpretError> {
    std::env::set_var(name, value);
    Ok(())
}

pub fn save_vars(interp: &mut Interpreter, path: &str) -> Result<(), InterpretError> {
    let mut merged = serde_json::Map::new();
    for frame in interp.env.user_frames() {
        for (name, value) in frame {
            merged.insert(name.clone(), value_to_json(value)?);
        }
    }
    let rendered = serde_json::to_string_pretty(&JsonValue::Object(merged))
        .map_err(|e| InterpretError::EvalError(format!("변수 저장 직렬화 실패: {}", e)))?;
    std::fs::write(path, rendered)?;
    Ok(())
}

pub fn load_vars(interp: &mut Interpreter, path: &str) -> Result<(), InterpretError> {
    let contents = std::fs::read_to_string(path)?;
    let parsed: JsonValue = serde_json::from_str(&contents)
        .map_err(|e| InterpretError::EvalError(format!("변수 불러오기 파싱 실패: {}", e)))?;
    let object = match parsed {
        JsonValue::Object(map) => map,
        _ => return Err(InterpretError::EvalError("저장된 변수 형식이 올바르지 않음".to_string())),
    };
    for (name, json_value) in object {
        let value = json_to_value(json_value);
        let _ = interp.env.declare(&name);
        interp.env.assign(&name, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Interpreter;
    use crate::value::Value;
    use serial_test::serial;

    #[test]
    fn save_then_load_round_trips_user_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vars.json").to_string_lossy().to_string();

        let mut saver = Interpreter::new();
        saver.env.declare("x").unwrap();
        saver.env.assign("x", Value::Int(42)).unwrap();
        save_vars(&mut saver, &path).unwrap();

        let mut loader = Interpreter::new();
        load_vars(&mut loader, &path).unwrap();
        assert_eq!(loader.env.lookup("x").unwrap().to_string(), "42");
    }

    #[test]
    #[serial]
    fn set_then_print_env_var_round_trips_through_the_process_environment() {
        let mut interp = Interpreter::new();
        set_env_var(&mut interp, "BUKDDAK_TEST_VAR", "hello").unwrap();
        assert_eq!(std::env::var("BUKDDAK_TEST_VAR").unwrap(), "hello");
        std::env::remove_var("BUKDDAK_TEST_VAR");
    }

    #[test]
    #[serial]
    fn print_env_var_of_unset_name_is_empty_not_an_error() {
        std::env::remove_var("BUKDDAK_UNSET_VAR");
        let mut interp = Interpreter::new();
        assert!(print_env_var(&mut interp, "BUKDDAK_UNSET_VAR").is_ok());
    }
}
