// ABOUTME: JSON builtins — lenient two-stage decode for parsing, strict encode for stringifying

use crate::error::InterpretError;
use crate::interpreter::Interpreter;
use crate::value::Value;
use regex::Regex;
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

pub(crate) fn json_to_value(json: JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        JsonValue::String(s) => Value::Str(s),
        JsonValue::Array(items) => Value::List(items.into_iter().map(json_to_value).collect()),
        JsonValue::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (Value::Str(k), json_to_value(v)))
                .collect(),
        ),
    }
}

/// Converts a `Value` to `serde_json::Value`. Every kind has a direct
/// encoding except `Function`, which has none in JSON and falls back
/// to its `Display` rendering as a string instead of failing the whole
/// encode.
pub(crate) fn value_to_json(value: &Value) -> Result<JsonValue, InterpretError> {
    Ok(match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(n) => JsonValue::Number((*n).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Str(s) => JsonValue::String(s.clone()),
        Value::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(value_to_json(item)?);
            }
            JsonValue::Array(out)
        }
        Value::Map(entries) => {
            let mut out = serde_json::Map::with_capacity(entries.len());
            for (k, v) in entries {
                out.insert(k.to_string(), value_to_json(v)?);
            }
            JsonValue::Object(out)
        }
        Value::Function(_) => JsonValue::String(value.to_string()),
    })
}

/// Unescapes backslash sequences (`\n`, `\t`, `\r`, `\"`, `\'`, `\\`) and,
/// if the result is itself wrapped in a redundant pair of quotes, strips
/// that outer pair. Mirrors how a JSON payload arrives here already
/// embedded inside a quoted statement argument.
fn unescape_and_unwrap(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.trim().chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('"') => out.push('"'),
                Some('\'') => out.push('\''),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    let trimmed = out.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

fn re_unquoted_key() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([{,]\s*)(\w+)(\s*:)").unwrap())
}

/// Wraps a bare identifier used as an object key (after an opening
/// brace or a comma) in double quotes, leaving already-quoted keys
/// untouched since the character following `{`/`,` there isn't a word
/// character.
fn quote_unquoted_keys(src: &str) -> String {
    re_unquoted_key().replace_all(src, "$1\"$2\"$3").into_owned()
}

/// Strict-then-lenient decode: unescape/unwrap the raw argument and try
/// it as-is first, then fall back to quoting unquoted keys, normalizing
/// single quotes to double quotes, and stripping trailing commas before
/// a second, strict attempt.
fn lenient_parse(src: &str) -> Result<JsonValue, InterpretError> {
    let unwrapped = unescape_and_unwrap(src);
    if let Ok(v) = serde_json::from_str::<JsonValue>(&unwrapped) {
        return Ok(v);
    }
    let normalized = quote_unquoted_keys(&unwrapped);
    let normalized = normalized.replace('\'', "\"");
    let normalized = normalized.replace(",}", "}").replace(",]", "]");
    serde_json::from_str::<JsonValue>(&normalized)
        .map_err(|e| InterpretError::EvalError(format!("JSON 파싱 실패: {}", e)))
}

pub fn json_parse_print(interp: &mut Interpreter, src: &str) -> Result<(), InterpretError> {
    let json = lenient_parse(src)?;
    let value = json_to_value(json);
    interp.output(&value.to_string());
    Ok(())
}

pub fn json_stringify(interp: &mut Interpreter, name: &str) -> Result<(), InterpretError> {
    let value = interp.env.lookup(name)?;
    let json = value_to_json(&value)?;
    let rendered = serde_json::to_string(&json)
        .map_err(|e| InterpretError::EvalError(format!("JSON 직렬화 실패: {}", e)))?;
    interp.output(&rendered);
    Ok(())
}
