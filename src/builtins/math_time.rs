// ABOUTME: Math diagnostics, randomness, and clock builtins — display-only, distinct from the `**` operator

use crate::error::InterpretError;
use crate::interpreter::Interpreter;
use crate::value::Value;

fn as_f64(name: &str, value: Value) -> Result<f64, InterpretError> {
    match value {
        Value::Int(n) => Ok(n as f64),
        Value::Float(f) => Ok(f),
        other => Err(InterpretError::TypeError(format!(
            "{} 인자는 숫자여야 함: {}",
            name,
            other.type_name()
        ))),
    }
}

fn as_i64(name: &str, value: Value) -> Result<i64, InterpretError> {
    match value {
        Value::Int(n) => Ok(n),
        other => Err(InterpretError::TypeError(format!(
            "{} 인자는 정수여야 함: {}",
            name,
            other.type_name()
        ))),
    }
}

pub fn power(interp: &mut Interpreter, base_src: &str, exp_src: &str) -> Result<(), InterpretError> {
    let base = as_f64("거듭제곱 밑", interp.eval_expr(base_src)?)?;
    let exp = as_f64("거듭제곱 지수", interp.eval_expr(exp_src)?)?;
    interp.output(&format!("거듭제곱 결과: {}", format_number(base.powf(exp))));
    Ok(())
}

pub fn sqrt(interp: &mut Interpreter, src: &str) -> Result<(), InterpretError> {
    let value = as_f64("제곱근", interp.eval_expr(src)?)?;
    if value < 0.0 {
        return Err(InterpretError::EvalError("음수의 제곱근은 계산할 수 없음".to_string()));
    }
    interp.output(&format!("제곱근 결과: {}", format_number(value.sqrt())));
    Ok(())
}

pub fn log(interp: &mut Interpreter, value_src: &str, base_src: &str) -> Result<(), InterpretError> {
    let value = as_f64("로그 값", interp.eval_expr(value_src)?)?;
    let base = as_f64("로그 밑", interp.eval_expr(base_src)?)?;
    if value <= 0.0 || base <= 0.0 || base == 1.0 {
        return Err(InterpretError::EvalError("로그의 정의역을 벗어남".to_string()));
    }
    interp.output(&format!("로그 결과: {}", format_number(value.log(base))));
    Ok(())
}

fn format_number(n: f64) -> String {
    Value::Float(n).to_string()
}

pub fn random_int(interp: &mut Interpreter, lo_src: &str, hi_src: &str) -> Result<(), InterpretError> {
    let lo = as_i64("랜덤 숫자 하한", interp.eval_expr(lo_src)?)?;
    let hi = as_i64("랜덤 숫자 상한", interp.eval_expr(hi_src)?)?;
    if lo > hi {
        return Err(InterpretError::EvalError("랜덤 숫자 범위가 잘못됨".to_string()));
    }
    let n = interp.random.gen_range_i64(lo, hi);
    interp.output(&n.to_string());
    Ok(())
}

pub fn shuffle_list(interp: &mut Interpreter, name: &str) -> Result<(), InterpretError> {
    let mut items = match interp.env.lookup(name)? {
        Value::List(items) => items,
        other => {
            return Err(InterpretError::TypeError(format!(
                "\"{}\" 는 리스트가 아님 ({})",
                name,
                other.type_name()
            )))
        }
    };
    interp.random.shuffle(&mut items);
    interp.env.assign(name, Value::List(items))
}

pub fn print_current_time(interp: &mut Interpreter) -> Result<(), InterpretError> {
    let now = interp.clock.now_time();
    interp.output(&now);
    Ok(())
}

pub fn print_current_date(interp: &mut Interpreter) -> Result<(), InterpretError> {
    let today = interp.clock.now_date();
    interp.output(&today);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::RandomSource;
    use crate::interpreter::Interpreter;

    struct FixedRandom;
    impl RandomSource for FixedRandom {
        fn gen_range_i64(&self, lo: i64, _hi: i64) -> i64 {
            lo
        }
        fn shuffle(&self, items: &mut [Value]) {
            items.reverse();
        }
    }

    fn new_interp() -> Interpreter {
        let mut interp = Interpreter::new();
        interp.random = Box::new(FixedRandom);
        interp
    }

    #[test]
    fn power_computes_exponent() {
        let mut interp = new_interp();
        power(&mut interp, "2", "10").unwrap();
    }

    #[test]
    fn sqrt_rejects_negative_input() {
        let mut interp = new_interp();
        assert!(sqrt(&mut interp, "-1").is_err());
    }

    #[test]
    fn log_rejects_non_positive_base() {
        let mut interp = new_interp();
        assert!(log(&mut interp, "10", "1").is_err());
    }

    #[test]
    fn random_int_rejects_inverted_range() {
        let mut interp = new_interp();
        assert!(random_int(&mut interp, "5", "1").is_err());
    }

    #[test]
    fn shuffle_list_rebinds_via_the_random_collaborator() {
        let mut interp = new_interp();
        interp.env.declare("xs").unwrap();
        interp
            .env
            .assign("xs", Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]))
            .unwrap();
        shuffle_list(&mut interp, "xs").unwrap();
        assert_eq!(interp.env.lookup("xs").unwrap().to_string(), "[3, 2, 1]");
    }
}
