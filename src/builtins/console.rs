// ABOUTME: Output/diagnostic builtins — help, literal writes, state/version/pattern listings

use crate::dispatch::pattern_sources;
use crate::error::InterpretError;
use crate::interpreter::Interpreter;
use crate::value::Value;

const HELP_TEXT: &str = "사용 가능한 명령어는 '도움말 \"명령어\" 북딱' 으로 확인하세요.";

pub fn help(interp: &mut Interpreter) -> Result<(), InterpretError> {
    interp.output(HELP_TEXT);
    Ok(())
}

pub fn write_literal(interp: &mut Interpreter, text: &str) -> Result<(), InterpretError> {
    interp.output(text);
    Ok(())
}

pub fn print_state(interp: &mut Interpreter) -> Result<(), InterpretError> {
    let mut entries: Vec<(String, String)> = interp
        .env
        .combined_view()
        .into_iter()
        .map(|(k, v)| (k, v.to_string()))
        .collect();
    entries.sort();
    let rendered = entries
        .into_iter()
        .map(|(k, v)| format!("{} = {}", k, v))
        .collect::<Vec<_>>()
        .join(", ");
    interp.output(&format!("상태: {{{}}}", rendered));
    Ok(())
}

pub fn print_version(interp: &mut Interpreter) -> Result<(), InterpretError> {
    interp.output(crate::config::VERSION);
    Ok(())
}

/// Lists bound callables — declared functions, wherever their frame
/// sits — not the plain `pi`/`e` constants that also live in the
/// combined scope view.
pub fn list_builtins(interp: &mut Interpreter) -> Result<(), InterpretError> {
    let mut names: Vec<String> = interp
        .env
        .combined_view()
        .into_iter()
        .filter(|(_, v)| matches!(v, Value::Function(_)))
        .map(|(k, _)| k)
        .collect();
    names.sort();
    interp.output(&names.join(", "));
    Ok(())
}

pub fn list_patterns(interp: &mut Interpreter) -> Result<(), InterpretError> {
    for pattern in pattern_sources() {
        interp.output(pattern);
    }
    Ok(())
}

pub fn clear_screen(interp: &mut Interpreter) -> Result<(), InterpretError> {
    print!("\x1B[2J\x1B[H");
    let _ = interp;
    Ok(())
}

pub fn set_prompt(interp: &mut Interpreter, prompt: &str) -> Result<(), InterpretError> {
    interp.prompt = prompt.to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FunctionValue;
    use std::rc::Rc;

    #[test]
    fn list_builtins_only_includes_function_values_not_pi_and_e() {
        let mut interp = Interpreter::new();
        interp.env.push();
        interp.env.declare("greet").unwrap();
        interp
            .env
            .assign(
                "greet",
                Value::Function(Rc::new(FunctionValue {
                    params: vec![],
                    body: vec![],
                    closure: vec![],
                })),
            )
            .unwrap();

        let names: Vec<String> = interp
            .env
            .combined_view()
            .into_iter()
            .filter(|(_, v)| matches!(v, Value::Function(_)))
            .map(|(k, _)| k)
            .collect();
        assert_eq!(names, vec!["greet".to_string()]);
    }
}
