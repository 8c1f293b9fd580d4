// ABOUTME: Collection builtins — list append/remove/sort, map add/delete, all in place on a bound variable

use crate::error::InterpretError;
use crate::interpreter::Interpreter;
use crate::value::Value;

fn expect_list(name: &str, value: Value) -> Result<Vec<Value>, InterpretError> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(InterpretError::TypeError(format!(
            "\"{}\" 는 리스트가 아님 ({})",
            name,
            other.type_name()
        ))),
    }
}

fn expect_map(name: &str, value: Value) -> Result<Vec<(Value, Value)>, InterpretError> {
    match value {
        Value::Map(entries) => Ok(entries),
        other => Err(InterpretError::TypeError(format!(
            "\"{}\" 는 딕셔너리가 아님 ({})",
            name,
            other.type_name()
        ))),
    }
}

pub fn list_append(interp: &mut Interpreter, name: &str, expr_src: &str) -> Result<(), InterpretError> {
    let item = interp.eval_expr(expr_src)?;
    let mut items = expect_list(name, interp.env.lookup(name)?)?;
    items.push(item);
    interp.env.assign(name, Value::List(items))
}

pub fn list_remove(interp: &mut Interpreter, name: &str, index_expr: &str) -> Result<(), InterpretError> {
    let index_value = interp.eval_expr(index_expr)?;
    let index = match index_value {
        Value::Int(n) => n,
        other => {
            return Err(InterpretError::TypeError(format!(
                "리스트 인덱스는 정수여야 함: {}",
                other.type_name()
            )))
        }
    };
    let mut items = expect_list(name, interp.env.lookup(name)?)?;
    let len = items.len() as i64;
    let idx = if index < 0 { index + len } else { index };
    if idx < 0 || idx >= len {
        return Err(InterpretError::TypeError(format!("인덱스 범위 초과: {}", index)));
    }
    items.remove(idx as usize);
    interp.env.assign(name, Value::List(items))
}

pub fn sort_list(interp: &mut Interpreter, name: &str) -> Result<(), InterpretError> {
    let mut items = expect_list(name, interp.env.lookup(name)?)?;
    let mut sort_err = None;
    items.sort_by(|a, b| match Value::compare(a, b) {
        Ok(ordering) => ordering,
        Err(e) => {
            sort_err.get_or_insert(e);
            std::cmp::Ordering::Equal
        }
    });
    if let Some(e) = sort_err {
        return Err(e);
    }
    interp.env.assign(name, Value::List(items))
}

pub fn map_add(
    interp: &mut Interpreter,
    name: &str,
    key_expr: &str,
    value_expr: &str,
) -> Result<(), InterpretError> {
    let key = interp.eval_expr(key_expr)?;
    let value = interp.eval_expr(value_expr)?;
    let mut entries = expect_map(name, interp.env.lookup(name)?)?;
    if let Some(slot) = entries.iter_mut().find(|(k, _)| Value::values_equal(k, &key)) {
        slot.1 = value;
    } else {
        entries.push((key, value));
    }
    interp.env.assign(name, Value::Map(entries))
}

pub fn map_delete(interp: &mut Interpreter, name: &str, key_expr: &str) -> Result<(), InterpretError> {
    let key = interp.eval_expr(key_expr)?;
    let mut entries = expect_map(name, interp.env.lookup(name)?)?;
    let before = entries.len();
    entries.retain(|(k, _)| !Value::values_equal(k, &key));
    if entries.len() == before {
        return Err(InterpretError::TypeError("키를 찾을 수 없음".to_string()));
    }
    interp.env.assign(name, Value::Map(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_var(name: &str, value: Value) -> Interpreter {
        crate::expr::clear_cache_for_tests();
        let mut interp = Interpreter::new();
        interp.env.declare(name).unwrap();
        interp.env.assign(name, value).unwrap();
        interp
    }

    #[test]
    fn append_grows_the_list_in_place() {
        let mut interp = with_var("xs", Value::List(vec![Value::Int(1)]));
        list_append(&mut interp, "xs", "2").unwrap();
        assert_eq!(interp.env.lookup("xs").unwrap().to_string(), "[1, 2]");
    }

    #[test]
    fn remove_supports_negative_index() {
        let mut interp = with_var(
            "xs",
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
        );
        list_remove(&mut interp, "xs", "-1").unwrap();
        assert_eq!(interp.env.lookup("xs").unwrap().to_string(), "[1, 2]");
    }

    #[test]
    fn remove_out_of_range_is_a_type_error() {
        let mut interp = with_var("xs", Value::List(vec![Value::Int(1)]));
        assert!(list_remove(&mut interp, "xs", "5").is_err());
    }

    #[test]
    fn sort_orders_numerically() {
        let mut interp = with_var(
            "xs",
            Value::List(vec![Value::Int(3), Value::Int(1), Value::Int(2)]),
        );
        sort_list(&mut interp, "xs").unwrap();
        assert_eq!(interp.env.lookup("xs").unwrap().to_string(), "[1, 2, 3]");
    }

    #[test]
    fn map_add_upserts_existing_key() {
        let mut interp = with_var("m", Value::Map(vec![(Value::Str("a".to_string()), Value::Int(1))]));
        map_add(&mut interp, "m", "\"a\"", "9").unwrap();
        assert_eq!(interp.env.lookup("m").unwrap().to_string(), "{'a': 9}");
    }

    #[test]
    fn map_delete_missing_key_errors() {
        let mut interp = with_var("m", Value::Map(vec![]));
        assert!(map_delete(&mut interp, "m", "\"a\"").is_err());
    }
}
