// ABOUTME: Variable lifecycle builtins — declare, assign, output, delete, reset, and function calls

use crate::error::InterpretError;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub fn declare(interp: &mut Interpreter, name: &str) -> Result<(), InterpretError> {
    interp.env.declare(name)
}

pub fn assign(interp: &mut Interpreter, name: &str, expr_src: &str) -> Result<(), InterpretError> {
    let value = interp.eval_expr(expr_src)?;
    interp.env.assign(name, value)
}

pub fn output_var(interp: &mut Interpreter, name: &str) -> Result<(), InterpretError> {
    let value = interp.env.lookup(name)?;
    interp.output(&value.to_string());
    Ok(())
}

pub fn list_variables(interp: &mut Interpreter) -> Result<(), InterpretError> {
    let mut names: Vec<String> = interp.env.combined_view().into_keys().collect();
    names.sort();
    interp.output(&names.join(", "));
    Ok(())
}

pub fn delete_variable(interp: &mut Interpreter, name: &str) -> Result<(), InterpretError> {
    interp.env.delete_current(name)
}

pub fn reset(interp: &mut Interpreter) -> Result<(), InterpretError> {
    interp.env.reset_to_builtins();
    Ok(())
}

pub fn call(interp: &mut Interpreter, name: &str, args_src: &str) -> Result<(), InterpretError> {
    let func = match interp.env.lookup(name)? {
        Value::Function(f) => f,
        other => {
            return Err(InterpretError::TypeError(format!(
                "\"{}\" 는 함수가 아님 ({})",
                name,
                other.type_name()
            )))
        }
    };
    let arg_values = args_src
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(|a| interp.eval_expr(a))
        .collect::<Result<Vec<_>, _>>()?;
    interp.call_function(&func, arg_values);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Interpreter;

    #[test]
    fn reset_keeps_builtins_but_clears_user_declared_names() {
        let mut interp = Interpreter::new();
        interp.env.declare("x").unwrap();
        interp.env.assign("x", Value::Int(1)).unwrap();
        reset(&mut interp).unwrap();
        assert!(interp.env.lookup("x").is_err());
        assert_eq!(interp.env.lookup("pi").unwrap().to_string(), std::f64::consts::PI.to_string());
    }

    #[test]
    fn call_of_non_function_value_is_a_type_error() {
        let mut interp = Interpreter::new();
        interp.env.declare("x").unwrap();
        interp.env.assign("x", Value::Int(1)).unwrap();
        assert!(call(&mut interp, "x", "").is_err());
    }

    #[test]
    fn call_discards_the_function_return_value() {
        let mut interp = Interpreter::new();
        interp.run_program("흔들어라 f() 북딱\n돌아가 7 북딱\n끝 흔들어라 북딱");
        assert!(call(&mut interp, "f", "").is_ok());
    }
}
