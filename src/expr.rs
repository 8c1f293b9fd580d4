// ABOUTME: Safe expression evaluator: AST, nom-based parser, AST cache, evaluation

use crate::env::Frame;
use crate::error::InterpretError;
use crate::value::Value;
use nom::{
    branch::alt,
    bytes::complete::{escaped, tag, take_while, take_while1},
    character::complete::{char, digit1, multispace0, one_of},
    combinator::{opt, recognize},
    multi::separated_list0,
    sequence::delimited,
    IResult, Parser,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Mod,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
    Map(Vec<(Expr, Expr)>),
    Ident(String),
    Index(Box<Expr>, Box<Expr>),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// `a OP1 b OP2 c ...` — chained comparison, each operand evaluated
    /// once, short-circuiting at the first false pair.
    Compare(Box<Expr>, Vec<(CompareOp, Expr)>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

thread_local! {
    static AST_CACHE: RefCell<HashMap<String, Rc<Expr>>> = RefCell::new(HashMap::new());
}

#[cfg(test)]
pub fn clear_cache_for_tests() {
    AST_CACHE.with(|c| c.borrow_mut().clear());
}

/// Parses `src` (consulting the process-wide AST cache) and evaluates
/// it against `scope`, a flattened read-through view of the
/// environment stack. Never mutates `scope`.
pub fn eval(src: &str, scope: &Frame) -> Result<Value, InterpretError> {
    let trimmed = src.trim();
    let ast = AST_CACHE.with(|cache| {
        if let Some(cached) = cache.borrow().get(trimmed) {
            return Some(Rc::clone(cached));
        }
        None
    });
    let ast = match ast {
        Some(ast) => ast,
        None => {
            let parsed = parse(trimmed)
                .map_err(|_| InterpretError::EvalError(format!("안전하지 않은 표현식: {}", trimmed)))?;
            let rc = Rc::new(parsed);
            AST_CACHE.with(|cache| {
                cache
                    .borrow_mut()
                    .insert(trimmed.to_string(), Rc::clone(&rc));
            });
            rc
        }
    };
    eval_ast(&ast, scope)
}

fn parse(input: &str) -> Result<Expr, String> {
    let (rest, expr) =
        parse_or(input).map_err(|e| format!("parse error: {:?}", e))?;
    let rest = match multispace0::<_, nom::error::Error<&str>>(rest) {
        Ok((rest, _)) => rest,
        Err(_) => rest,
    };
    if !rest.is_empty() {
        return Err(format!("unexpected trailing input: {}", rest));
    }
    Ok(expr)
}

fn ws(input: &str) -> IResult<&str, ()> {
    let (input, _) = multispace0(input)?;
    Ok((input, ()))
}

fn parse_or(input: &str) -> IResult<&str, Expr> {
    let (input, first) = parse_and(input)?;
    let (input, _) = ws(input)?;
    let mut rest = input;
    let mut acc = first;
    loop {
        match tag::<_, _, nom::error::Error<&str>>("or")(rest) {
            Ok((after_tag, _)) if !next_is_ident_char(after_tag) => {
                let (after_ws, _) = ws(after_tag)?;
                let (after_rhs, rhs) = parse_and(after_ws)?;
                acc = Expr::Or(Box::new(acc), Box::new(rhs));
                let (after_ws2, _) = ws(after_rhs)?;
                rest = after_ws2;
            }
            _ => break,
        }
    }
    Ok((rest, acc))
}

fn parse_and(input: &str) -> IResult<&str, Expr> {
    let (input, first) = parse_not(input)?;
    let (input, _) = ws(input)?;
    let mut rest = input;
    let mut acc = first;
    loop {
        match tag::<_, _, nom::error::Error<&str>>("and")(rest) {
            Ok((after_tag, _)) if !next_is_ident_char(after_tag) => {
                let (after_ws, _) = ws(after_tag)?;
                let (after_rhs, rhs) = parse_not(after_ws)?;
                acc = Expr::And(Box::new(acc), Box::new(rhs));
                let (after_ws2, _) = ws(after_rhs)?;
                rest = after_ws2;
            }
            _ => break,
        }
    }
    Ok((rest, acc))
}

fn next_is_ident_char(input: &str) -> bool {
    input
        .chars()
        .next()
        .map(|c| c.is_alphanumeric() || c == '_')
        .unwrap_or(false)
}

fn parse_not(input: &str) -> IResult<&str, Expr> {
    let (input, _) = ws(input)?;
    if let Ok((after_tag, _)) = tag::<_, _, nom::error::Error<&str>>("not")(input) {
        if !next_is_ident_char(after_tag) {
            let (after_ws, _) = ws(after_tag)?;
            let (rest, inner) = parse_not(after_ws)?;
            return Ok((rest, Expr::Unary(UnaryOp::Not, Box::new(inner))));
        }
    }
    parse_compare(input)
}

fn parse_compare(input: &str) -> IResult<&str, Expr> {
    let (input, first) = parse_additive(input)?;
    let (mut input, _) = ws(input)?;
    let mut chain = Vec::new();
    loop {
        let attempt = alt((
            nom_tag_op("==", CompareOp::Eq),
            nom_tag_op("!=", CompareOp::Ne),
            nom_tag_op("<=", CompareOp::Le),
            nom_tag_op(">=", CompareOp::Ge),
            nom_tag_op("<", CompareOp::Lt),
            nom_tag_op(">", CompareOp::Gt),
        ))
        .parse(input);
        match attempt {
            Ok((rest, op)) => {
                let (rest, _) = ws(rest)?;
                let (rest, operand) = parse_additive(rest)?;
                let (rest, _) = ws(rest)?;
                chain.push((op, operand));
                input = rest;
            }
            Err(_) => break,
        }
    }
    if chain.is_empty() {
        Ok((input, first))
    } else {
        Ok((input, Expr::Compare(Box::new(first), chain)))
    }
}

fn nom_tag_op<'a>(
    literal: &'static str,
    op: CompareOp,
) -> impl FnMut(&'a str) -> IResult<&'a str, CompareOp> {
    move |input: &'a str| {
        let (rest, _) = tag(literal)(input)?;
        Ok((rest, op.clone()))
    }
}

fn parse_additive(input: &str) -> IResult<&str, Expr> {
    let (input, first) = parse_multiplicative(input)?;
    let (mut input, _) = ws(input)?;
    let mut acc = first;
    loop {
        let attempt: IResult<&str, char> = alt((char('+'), char('-'))).parse(input);
        match attempt {
            Ok((rest, c)) => {
                let (rest, _) = ws(rest)?;
                let (rest, rhs) = parse_multiplicative(rest)?;
                let (rest, _) = ws(rest)?;
                let op = if c == '+' { BinOp::Add } else { BinOp::Sub };
                acc = Expr::Binary(op, Box::new(acc), Box::new(rhs));
                input = rest;
            }
            Err(_) => break,
        }
    }
    Ok((input, acc))
}

fn parse_multiplicative(input: &str) -> IResult<&str, Expr> {
    let (input, first) = parse_power(input)?;
    let (mut input, _) = ws(input)?;
    let mut acc = first;
    loop {
        let attempt: IResult<&str, &str> = alt((tag("*"), tag("//"), tag("/"), tag("%"))).parse(input);
        match attempt {
            Ok((rest, matched)) => {
                let (rest, _) = ws(rest)?;
                let (rest, rhs) = parse_power(rest)?;
                let (rest, _) = ws(rest)?;
                let op = match matched {
                    "*" => BinOp::Mul,
                    "//" | "/" => BinOp::Div,
                    "%" => BinOp::Mod,
                    _ => unreachable!(),
                };
                acc = Expr::Binary(op, Box::new(acc), Box::new(rhs));
                input = rest;
            }
            Err(_) => break,
        }
    }
    Ok((input, acc))
}

fn parse_power(input: &str) -> IResult<&str, Expr> {
    let (input, base) = parse_unary(input)?;
    let (input, _) = ws(input)?;
    if let Ok((rest, _)) = tag::<_, _, nom::error::Error<&str>>("**")(input) {
        let (rest, _) = ws(rest)?;
        let (rest, exp) = parse_power(rest)?;
        return Ok((rest, Expr::Binary(BinOp::Pow, Box::new(base), Box::new(exp))));
    }
    Ok((input, base))
}

fn parse_unary(input: &str) -> IResult<&str, Expr> {
    let (input, _) = ws(input)?;
    if let Ok((rest, _)) = char::<_, nom::error::Error<&str>>('-')(input) {
        let (rest, inner) = parse_unary(rest)?;
        return Ok((rest, Expr::Unary(UnaryOp::Neg, Box::new(inner))));
    }
    if let Ok((rest, _)) = char::<_, nom::error::Error<&str>>('+')(input) {
        let (rest, inner) = parse_unary(rest)?;
        return Ok((rest, Expr::Unary(UnaryOp::Pos, Box::new(inner))));
    }
    parse_postfix(input)
}

fn parse_postfix(input: &str) -> IResult<&str, Expr> {
    let (mut input, mut acc) = parse_atom(input)?;
    loop {
        let (after_ws, _) = ws(input)?;
        if let Ok((after_open, _)) = char::<_, nom::error::Error<&str>>('[')(after_ws) {
            let (after_ws2, _) = ws(after_open)?;
            let (after_index, index_expr) = parse_or(after_ws2)?;
            let (after_ws3, _) = ws(after_index)?;
            let (after_close, _) = char(']')(after_ws3)?;
            acc = Expr::Index(Box::new(acc), Box::new(index_expr));
            input = after_close;
        } else {
            break;
        }
    }
    Ok((input, acc))
}

fn parse_atom(input: &str) -> IResult<&str, Expr> {
    let (input, _) = ws(input)?;
    alt((
        parse_paren_or_tuple,
        parse_list_lit,
        parse_map_lit,
        parse_number,
        parse_string,
        parse_bool,
        parse_null,
        parse_ident,
    ))
    .parse(input)
}

fn parse_paren_or_tuple(input: &str) -> IResult<&str, Expr> {
    let (input, _) = char('(')(input)?;
    let (input, _) = ws(input)?;
    let (input, items) = separated_list0(
        delimited(ws, char(','), ws),
        parse_or,
    )
    .parse(input)?;
    let (input, _) = ws(input)?;
    let (input, trailing_comma) = opt(char(',')).parse(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char(')')(input)?;
    if items.len() == 1 && trailing_comma.is_none() {
        Ok((input, items.into_iter().next().unwrap()))
    } else {
        Ok((input, Expr::Tuple(items)))
    }
}

fn parse_list_lit(input: &str) -> IResult<&str, Expr> {
    let (input, _) = char('[')(input)?;
    let (input, _) = ws(input)?;
    let (input, items) = separated_list0(delimited(ws, char(','), ws), parse_or).parse(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = opt(char(',')).parse(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char(']')(input)?;
    Ok((input, Expr::List(items)))
}

fn parse_map_lit(input: &str) -> IResult<&str, Expr> {
    let (input, _) = char('{')(input)?;
    let (input, _) = ws(input)?;
    let entry = |i| -> IResult<&str, (Expr, Expr)> {
        let (i, key) = parse_or(i)?;
        let (i, _) = ws(i)?;
        let (i, _) = char(':')(i)?;
        let (i, _) = ws(i)?;
        let (i, value) = parse_or(i)?;
        Ok((i, (key, value)))
    };
    let (input, entries) = separated_list0(delimited(ws, char(','), ws), entry).parse(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = opt(char(',')).parse(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char('}')(input)?;
    Ok((input, Expr::Map(entries)))
}

fn parse_number(input: &str) -> IResult<&str, Expr> {
    let (input, digits) = recognize((
        digit1,
        opt((char('.'), digit1)),
    ))
    .parse(input)?;
    if digits.contains('.') {
        let n: f64 = digits.parse().expect("validated by parser");
        Ok((input, Expr::Float(n)))
    } else {
        let n: i64 = digits.parse().expect("validated by parser");
        Ok((input, Expr::Int(n)))
    }
}

fn parse_string(input: &str) -> IResult<&str, Expr> {
    alt((parse_string_with_quote('"'), parse_string_with_quote('\''))).parse(input)
}

fn parse_string_with_quote<'a>(quote: char) -> impl FnMut(&'a str) -> IResult<&'a str, Expr> {
    move |input: &'a str| {
        let (input, _) = char(quote)(input)?;
        let escapable: &[char] = if quote == '"' {
            &['"', '\\', 'n', 't']
        } else {
            &['\'', '\\', 'n', 't']
        };
        let (input, content) = opt(escaped(
            take_while1(|c: char| c != quote && c != '\\'),
            '\\',
            one_of(escapable),
        ))
        .parse(input)?;
        let (input, _) = char(quote)(input)?;
        let raw = content.unwrap_or("");
        Ok((input, Expr::Str(unescape(raw))))
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('\\') => out.push('\\'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn parse_bool(input: &str) -> IResult<&str, Expr> {
    let (rest, matched) = alt((tag("True"), tag("False"))).parse(input)?;
    if next_is_ident_char(rest) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }
    Ok((rest, Expr::Bool(matched == "True")))
}

fn parse_null(input: &str) -> IResult<&str, Expr> {
    let (rest, _) = tag("None")(input)?;
    if next_is_ident_char(rest) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }
    Ok((rest, Expr::Null))
}

fn parse_ident(input: &str) -> IResult<&str, Expr> {
    let (input, first) = one_of("abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_")(input)?;
    let (input, rest) = take_while(|c: char| c.is_alphanumeric() || c == '_')(input)?;
    let mut name = String::new();
    name.push(first);
    name.push_str(rest);
    Ok((input, Expr::Ident(name)))
}

fn lookup(scope: &Frame, name: &str) -> Result<Value, InterpretError> {
    match scope.get(name) {
        Some(Value::Null) => Err(InterpretError::NameError(name.to_string())),
        Some(v) => Ok(v.clone()),
        None => Err(InterpretError::NameError(name.to_string())),
    }
}

fn eval_ast(expr: &Expr, scope: &Frame) -> Result<Value, InterpretError> {
    match expr {
        Expr::Int(n) => Ok(Value::Int(*n)),
        Expr::Float(n) => Ok(Value::Float(*n)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Null => Ok(Value::Null),
        Expr::Ident(name) => {
            // Identifiers named exactly None/True/False are reserved by
            // the grammar, so an Ident here is always a variable lookup.
            lookup(scope, name)
        }
        Expr::List(items) => {
            let values = items
                .iter()
                .map(|e| eval_ast(e, scope))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::List(values))
        }
        Expr::Tuple(items) => {
            let values = items
                .iter()
                .map(|e| eval_ast(e, scope))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::List(values))
        }
        Expr::Map(entries) => {
            let mut out = Vec::with_capacity(entries.len());
            for (k, v) in entries {
                out.push((eval_ast(k, scope)?, eval_ast(v, scope)?));
            }
            Ok(Value::Map(out))
        }
        Expr::Index(base, index) => {
            let base_val = eval_ast(base, scope)?;
            let index_val = eval_ast(index, scope)?;
            index_value(&base_val, &index_val)
        }
        Expr::Unary(op, inner) => {
            let v = eval_ast(inner, scope)?;
            apply_unary(op, v)
        }
        Expr::Binary(op, lhs, rhs) => {
            let l = eval_ast(lhs, scope)?;
            let r = eval_ast(rhs, scope)?;
            apply_binary(op, l, r)
        }
        Expr::Compare(first, chain) => {
            let mut left = eval_ast(first, scope)?;
            for (op, rhs_expr) in chain {
                let right = eval_ast(rhs_expr, scope)?;
                if !apply_compare(op, &left, &right)? {
                    return Ok(Value::Bool(false));
                }
                left = right;
            }
            Ok(Value::Bool(true))
        }
        Expr::And(lhs, rhs) => {
            let l = eval_ast(lhs, scope)?;
            if !l.is_truthy() {
                return Ok(Value::Bool(false));
            }
            Ok(Value::Bool(eval_ast(rhs, scope)?.is_truthy()))
        }
        Expr::Or(lhs, rhs) => {
            let l = eval_ast(lhs, scope)?;
            if l.is_truthy() {
                return Ok(Value::Bool(true));
            }
            Ok(Value::Bool(eval_ast(rhs, scope)?.is_truthy()))
        }
    }
}

fn index_value(base: &Value, index: &Value) -> Result<Value, InterpretError> {
    match base {
        Value::List(items) => {
            let i = match index {
                Value::Int(n) => *n,
                Value::Bool(b) => *b as i64,
                other => {
                    return Err(InterpretError::TypeError(format!(
                        "리스트 인덱스는 정수여야 함: {}",
                        other.type_name()
                    )))
                }
            };
            let len = items.len() as i64;
            let idx = if i < 0 { i + len } else { i };
            if idx < 0 || idx >= len {
                return Err(InterpretError::TypeError(format!(
                    "인덱스 범위 초과: {}",
                    i
                )));
            }
            Ok(items[idx as usize].clone())
        }
        Value::Str(s) => {
            let i = match index {
                Value::Int(n) => *n,
                other => {
                    return Err(InterpretError::TypeError(format!(
                        "문자열 인덱스는 정수여야 함: {}",
                        other.type_name()
                    )))
                }
            };
            let chars: Vec<char> = s.chars().collect();
            let len = chars.len() as i64;
            let idx = if i < 0 { i + len } else { i };
            if idx < 0 || idx >= len {
                return Err(InterpretError::TypeError(format!(
                    "인덱스 범위 초과: {}",
                    i
                )));
            }
            Ok(Value::Str(chars[idx as usize].to_string()))
        }
        Value::Map(entries) => entries
            .iter()
            .find(|(k, _)| Value::values_equal(k, index))
            .map(|(_, v)| v.clone())
            .ok_or_else(|| InterpretError::TypeError("키를 찾을 수 없음".to_string())),
        other => Err(InterpretError::TypeError(format!(
            "인덱싱할 수 없는 타입: {}",
            other.type_name()
        ))),
    }
}

fn apply_unary(op: &UnaryOp, v: Value) -> Result<Value, InterpretError> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!v.is_truthy())),
        UnaryOp::Neg => match v {
            Value::Int(n) => Ok(Value::Int(-n)),
            Value::Float(n) => Ok(Value::Float(-n)),
            Value::Bool(b) => Ok(Value::Int(-(b as i64))),
            other => Err(InterpretError::TypeError(format!(
                "음수화할 수 없는 타입: {}",
                other.type_name()
            ))),
        },
        UnaryOp::Pos => match v {
            Value::Int(_) | Value::Float(_) | Value::Bool(_) => Ok(v),
            other => Err(InterpretError::TypeError(format!(
                "단항 +를 적용할 수 없는 타입: {}",
                other.type_name()
            ))),
        },
    }
}

fn apply_binary(op: &BinOp, l: Value, r: Value) -> Result<Value, InterpretError> {
    if let (BinOp::Add, Value::Str(a), Value::Str(b)) = (op, &l, &r) {
        return Ok(Value::Str(format!("{}{}", a, b)));
    }
    if let (BinOp::Add, Value::List(a), Value::List(b)) = (op, &l, &r) {
        let mut combined = a.clone();
        combined.extend(b.clone());
        return Ok(Value::List(combined));
    }
    if !l.is_numeric() || !r.is_numeric() {
        return Err(InterpretError::TypeError(format!(
            "{}와(과) {}에 산술 연산을 적용할 수 없음",
            l.type_name(),
            r.type_name()
        )));
    }
    let both_int = matches!(l, Value::Int(_)) && matches!(r, Value::Int(_));
    let (lf, rf) = (as_f64(&l), as_f64(&r));

    match op {
        BinOp::Add if both_int => Ok(Value::Int(as_i64(&l) + as_i64(&r))),
        BinOp::Add => Ok(Value::Float(lf + rf)),
        BinOp::Sub if both_int => Ok(Value::Int(as_i64(&l) - as_i64(&r))),
        BinOp::Sub => Ok(Value::Float(lf - rf)),
        BinOp::Mul if both_int => Ok(Value::Int(as_i64(&l) * as_i64(&r))),
        BinOp::Mul => Ok(Value::Float(lf * rf)),
        BinOp::Mod if both_int => {
            let ri = as_i64(&r);
            if ri == 0 {
                return Err(InterpretError::TypeError("0으로 나눌 수 없음".to_string()));
            }
            Ok(Value::Int(as_i64(&l).rem_euclid(ri)))
        }
        BinOp::Mod => {
            if rf == 0.0 {
                return Err(InterpretError::TypeError("0으로 나눌 수 없음".to_string()));
            }
            Ok(Value::Float(lf.rem_euclid(rf)))
        }
        BinOp::Div => {
            if rf == 0.0 {
                return Err(InterpretError::TypeError("0으로 나눌 수 없음".to_string()));
            }
            // True division: integer result only if both operands are
            // ints AND the quotient is exact.
            if both_int {
                let (li, ri) = (as_i64(&l), as_i64(&r));
                if ri != 0 && li % ri == 0 {
                    return Ok(Value::Int(li / ri));
                }
            }
            Ok(Value::Float(lf / rf))
        }
        BinOp::Pow => {
            if both_int {
                let ri = as_i64(&r);
                if ri >= 0 {
                    return Ok(Value::Int(as_i64(&l).pow(ri as u32)));
                }
            }
            Ok(Value::Float(lf.powf(rf)))
        }
    }
}

fn as_f64(v: &Value) -> f64 {
    match v {
        Value::Int(n) => *n as f64,
        Value::Float(n) => *n,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

fn as_i64(v: &Value) -> i64 {
    match v {
        Value::Int(n) => *n,
        Value::Bool(b) => *b as i64,
        Value::Float(n) => *n as i64,
        _ => 0,
    }
}

fn apply_compare(op: &CompareOp, l: &Value, r: &Value) -> Result<bool, InterpretError> {
    match op {
        CompareOp::Eq => Ok(Value::values_equal(l, r)),
        CompareOp::Ne => Ok(!Value::values_equal(l, r)),
        CompareOp::Lt => Ok(Value::compare(l, r)? == std::cmp::Ordering::Less),
        CompareOp::Le => Ok(Value::compare(l, r)? != std::cmp::Ordering::Greater),
        CompareOp::Gt => Ok(Value::compare(l, r)? == std::cmp::Ordering::Greater),
        CompareOp::Ge => Ok(Value::compare(l, r)? != std::cmp::Ordering::Less),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope_with(pairs: &[(&str, Value)]) -> Frame {
        let mut f = Frame::new();
        for (k, v) in pairs {
            f.insert(k.to_string(), v.clone());
        }
        f
    }

    #[test]
    fn arithmetic_precedence_and_grouping() {
        clear_cache_for_tests();
        let scope = Frame::new();
        let v = eval("1 + 2 * 3", &scope).unwrap();
        assert_eq!(v.to_string(), "7");
        let v = eval("(1 + 2) * 3", &scope).unwrap();
        assert_eq!(v.to_string(), "9");
    }

    #[test]
    fn power_binds_tighter_than_multiplication_and_is_right_associative() {
        clear_cache_for_tests();
        let scope = Frame::new();
        assert_eq!(eval("2 * 3 ** 2", &scope).unwrap().to_string(), "18");
        assert_eq!(eval("2 ** 3 ** 2", &scope).unwrap().to_string(), "512");
    }

    #[test]
    fn division_is_true_division() {
        clear_cache_for_tests();
        let scope = Frame::new();
        assert_eq!(eval("10 / 2", &scope).unwrap().to_string(), "5");
        assert_eq!(eval("7 / 2", &scope).unwrap().to_string(), "3.5");
    }

    #[test]
    fn identifier_lookup_of_unassigned_or_unbound_name_is_a_name_error() {
        clear_cache_for_tests();
        let scope = scope_with(&[("x", Value::Null), ("y", Value::Int(4))]);
        assert!(matches!(eval("x", &scope), Err(InterpretError::NameError(_))));
        assert!(matches!(eval("z", &scope), Err(InterpretError::NameError(_))));
        assert_eq!(eval("y", &scope).unwrap().to_string(), "4");
    }

    #[test]
    fn short_circuit_and_or_return_truthiness_not_original_value() {
        clear_cache_for_tests();
        let scope = Frame::new();
        assert_eq!(eval("0 and 5", &scope).unwrap().to_string(), "False");
        assert_eq!(eval("3 or 0", &scope).unwrap().to_string(), "True");
    }

    #[test]
    fn comparison_chain_evaluated_pairwise() {
        clear_cache_for_tests();
        let scope = Frame::new();
        assert_eq!(eval("1 < 2 < 3", &scope).unwrap().to_string(), "True");
        assert_eq!(eval("1 < 2 < 1", &scope).unwrap().to_string(), "False");
    }

    #[test]
    fn list_and_index_literals() {
        clear_cache_for_tests();
        let scope = Frame::new();
        assert_eq!(eval("[1,2,3][1]", &scope).unwrap().to_string(), "2");
        assert_eq!(eval("[1,2,3][-1]", &scope).unwrap().to_string(), "3");
    }

    #[test]
    fn map_literal_and_index() {
        clear_cache_for_tests();
        let scope = Frame::new();
        let v = eval("{\"a\": 1, \"b\": 2}[\"b\"]", &scope).unwrap();
        assert_eq!(v.to_string(), "2");
    }

    #[test]
    fn disallowed_syntax_is_rejected_as_unsafe_expression() {
        clear_cache_for_tests();
        let scope = Frame::new();
        assert!(matches!(
            eval("x.attr", &scope),
            Err(InterpretError::EvalError(_))
        ));
        assert!(matches!(
            eval("foo(1, 2)", &scope),
            Err(InterpretError::EvalError(_))
        ));
    }

    #[test]
    fn repeated_eval_of_same_source_is_cache_transparent() {
        clear_cache_for_tests();
        let scope = scope_with(&[("x", Value::Int(5))]);
        let a = eval("x * 2", &scope).unwrap();
        let b = eval("x * 2", &scope).unwrap();
        assert_eq!(a.to_string(), b.to_string());
    }
}
