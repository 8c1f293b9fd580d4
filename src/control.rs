// ABOUTME: Control-flow signals and nesting-aware block boundary extraction

use regex::Regex;
use std::sync::OnceLock;

use crate::value::Value;

/// A structured non-local exit. Distinct from `InterpretError`: these
/// are expected control transfers, caught by the nearest enclosing
/// loop or call frame rather than logged as diagnostics.
#[derive(Debug, Clone)]
pub enum Signal {
    Break,
    Continue,
    Return(Value),
}

fn re_if() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^만약 \((.*?)\) 북딱$").unwrap())
}
fn re_else() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^아니면 북딱$").unwrap())
}
fn re_end_if() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^끝 만약 북딱$").unwrap())
}
fn re_while() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^반복 \((.*?)\) 북딱$").unwrap())
}
fn re_end_while() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^끝 반복 북딱$").unwrap())
}
fn re_for() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^반복문 ([^ ]+) in (.*?) 북딱$").unwrap())
}
fn re_end_for() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^끝 반복문 북딱$").unwrap())
}
fn re_func() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^흔들어라 ([^ ]+)\s*\((.*?)\) 북딱$").unwrap())
}
fn re_end_func() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^끝 흔들어라 북딱$").unwrap())
}

pub struct IfHeader {
    pub guard: String,
}
pub struct WhileHeader {
    pub guard: String,
}
pub struct ForHeader {
    pub var_name: String,
    pub iterable_expr: String,
}
pub struct FuncHeader {
    pub name: String,
    pub params_src: String,
}

pub fn match_if(line: &str) -> Option<IfHeader> {
    re_if()
        .captures(line)
        .map(|c| IfHeader {
            guard: c[1].to_string(),
        })
}
pub fn match_while(line: &str) -> Option<WhileHeader> {
    re_while()
        .captures(line)
        .map(|c| WhileHeader {
            guard: c[1].to_string(),
        })
}
pub fn match_for(line: &str) -> Option<ForHeader> {
    re_for().captures(line).map(|c| ForHeader {
        var_name: c[1].to_string(),
        iterable_expr: c[2].to_string(),
    })
}
pub fn match_func(line: &str) -> Option<FuncHeader> {
    re_func().captures(line).map(|c| FuncHeader {
        name: c[1].to_string(),
        params_src: c[2].to_string(),
    })
}

/// Scans `lines[start+1..]` for the end of an if/else construct opened
/// at `start`, tracking nested if/end-if pairs with a depth counter so
/// only a sibling `else`/`end-if` at depth 0 terminates the search.
/// Returns (then_body, else_body, index of the line after end-if). If
/// no matching end-if is ever found, the remaining lines fold into the
/// body as-is rather than raising an error.
pub fn extract_if_block(lines: &[String], start: usize) -> (Vec<String>, Vec<String>, usize) {
    let mut depth = 0usize;
    let mut else_at: Option<usize> = None;
    let mut i = start + 1;
    while i < lines.len() {
        let line = lines[i].trim();
        if match_if(line).is_some() {
            depth += 1;
        } else if re_end_if().is_match(line) {
            if depth == 0 {
                let then_end = else_at.unwrap_or(i);
                let then_body = lines[start + 1..then_end].to_vec();
                let else_body = match else_at {
                    Some(idx) => lines[idx + 1..i].to_vec(),
                    None => Vec::new(),
                };
                return (then_body, else_body, i + 1);
            }
            depth -= 1;
        } else if re_else().is_match(line) && depth == 0 && else_at.is_none() {
            else_at = Some(i);
        }
        i += 1;
    }
    let then_end = else_at.unwrap_or(lines.len());
    let then_body = lines[start + 1..then_end].to_vec();
    let else_body = match else_at {
        Some(idx) => lines[idx + 1..lines.len()].to_vec(),
        None => Vec::new(),
    };
    (then_body, else_body, lines.len())
}

/// Generic nesting-aware body extractor for while/for/function: finds
/// the matching end line for the opener at `start`, given the opener
/// and closer recognizers, and returns (body, index after end). If no
/// matching end is ever found, the remaining lines fold into the body
/// as-is and the returned index lands past the end of `lines`.
fn extract_generic_block(
    lines: &[String],
    start: usize,
    is_open: impl Fn(&str) -> bool,
    is_close: impl Fn(&str) -> bool,
) -> (Vec<String>, usize) {
    let mut depth = 0usize;
    let mut i = start + 1;
    while i < lines.len() {
        let line = lines[i].trim();
        if is_open(line) {
            depth += 1;
        } else if is_close(line) {
            if depth == 0 {
                return (lines[start + 1..i].to_vec(), i + 1);
            }
            depth -= 1;
        }
        i += 1;
    }
    (lines[start + 1..].to_vec(), lines.len())
}

pub fn extract_while_block(lines: &[String], start: usize) -> (Vec<String>, usize) {
    extract_generic_block(
        lines,
        start,
        |l| match_while(l).is_some(),
        |l| re_end_while().is_match(l),
    )
}

pub fn extract_for_block(lines: &[String], start: usize) -> (Vec<String>, usize) {
    extract_generic_block(
        lines,
        start,
        |l| match_for(l).is_some(),
        |l| re_end_for().is_match(l),
    )
}

pub fn extract_func_block(lines: &[String], start: usize) -> (Vec<String>, usize) {
    extract_generic_block(
        lines,
        start,
        |l| match_func(l).is_some(),
        |l| re_end_func().is_match(l),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<String> {
        src.lines().map(|l| l.trim().to_string()).collect()
    }

    #[test]
    fn if_without_else_extracts_only_then_body() {
        let ls = lines("만약 (x > 1) 북딱\n응디 x 북딱\n끝 만약 북딱\n응디 y 북딱");
        let (then_body, else_body, next) = extract_if_block(&ls, 0);
        assert_eq!(then_body, vec!["응디 x 북딱".to_string()]);
        assert!(else_body.is_empty());
        assert_eq!(next, 3);
    }

    #[test]
    fn nested_if_tracks_depth_so_outer_else_is_found() {
        let ls = lines(
            "만약 (a) 북딱\n만약 (b) 북딱\n응디 1 북딱\n끝 만약 북딱\n아니면 북딱\n응디 2 북딱\n끝 만약 북딱",
        );
        let (then_body, else_body, next) = extract_if_block(&ls, 0);
        assert_eq!(then_body.len(), 3);
        assert_eq!(else_body, vec!["응디 2 북딱".to_string()]);
        assert_eq!(next, 7);
    }

    #[test]
    fn nested_while_blocks_track_depth() {
        let ls = lines(
            "반복 (a) 북딱\n반복 (b) 북딱\n응디 1 북딱\n끝 반복 북딱\n끝 반복 북딱\n응디 끝 북딱",
        );
        let (body, next) = extract_while_block(&ls, 0);
        assert_eq!(body.len(), 4);
        assert_eq!(next, 5);
    }

    #[test]
    fn missing_end_sentinel_folds_the_remaining_lines_into_the_body() {
        let ls = lines("반복 (a) 북딱\n응디 1 북딱");
        let (body, next) = extract_while_block(&ls, 0);
        assert_eq!(body, vec!["응디 1 북딱".to_string()]);
        assert_eq!(next, ls.len());
    }
}
