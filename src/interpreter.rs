// ABOUTME: Top-level interpreter: owns engine state and drives the block executor over a program

use crate::clean::clean_line;
use crate::collaborators::{Clock, HttpClient, InputSource, RandomSource, StdinInputSource, SystemClock, SystemRandom, UreqHttpClient};
use crate::control::{self, Signal};
use crate::dispatch::{self, Stmt};
use crate::env::Environment;
use crate::error::InterpretError;
use crate::expr;
use crate::value::{FunctionValue, Value};
use std::rc::Rc;

pub struct Interpreter {
    pub env: Environment,
    pub clock: Box<dyn Clock>,
    pub random: Box<dyn RandomSource>,
    pub http: Box<dyn HttpClient>,
    pub input: Box<dyn InputSource>,
    pub line_no: usize,
    pub debug: bool,
    pub fast: bool,
    pub prompt: String,
    pub exit_requested: bool,
}

impl Interpreter {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.builtins_frame_mut()
            .insert("pi".to_string(), Value::Float(std::f64::consts::PI));
        env.builtins_frame_mut()
            .insert("e".to_string(), Value::Float(std::f64::consts::E));

        Interpreter {
            env,
            clock: Box::new(SystemClock),
            random: Box::new(SystemRandom),
            http: Box::new(UreqHttpClient),
            input: Box::new(StdinInputSource::new()),
            line_no: 0,
            debug: false,
            fast: false,
            prompt: "노무현> ".to_string(),
            exit_requested: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_fast(mut self, fast: bool) -> Self {
        self.fast = fast;
        self
    }

    fn log_info(&self, message: &str) {
        if self.fast {
            return;
        }
        tracing::info!(line = self.line_no, "{}", message);
    }

    fn log_error(&self, message: &str) {
        tracing::error!(line = self.line_no, "{}", message);
    }

    pub fn output(&self, message: &str) {
        println!("{}", message);
    }

    /// Evaluates `src` against the combined (read-through) view of the
    /// current scope stack.
    fn eval(&self, src: &str) -> Result<Value, InterpretError> {
        let view = self.env.combined_view();
        expr::eval(src, &view)
    }

    /// Public entry point used by builtin handlers to evaluate an
    /// expression argument.
    pub(crate) fn eval_expr(&self, src: &str) -> Result<Value, InterpretError> {
        self.eval(src)
    }

    /// Runs a whole program, splitting into lines and cleaning each.
    pub fn run_program(&mut self, source: &str) {
        let cleaned: Vec<String> = source.lines().map(clean_line).collect();
        match self.exec_lines(&cleaned, 1) {
            Ok(Some(Signal::Return(_))) => {
                self.log_error("돌아가 북딱가 함수/반복문 바깥에서 사용됨");
            }
            Ok(Some(Signal::Break)) | Ok(Some(Signal::Continue)) => {
                self.log_error("브레이크/넘어가 북딱가 반복문 바깥에서 사용됨");
            }
            Ok(None) => {}
            Err(e) => self.log_error(&e.to_string()),
        }
    }

    /// Executes a sequence of already-cleaned lines starting at
    /// `base_line_no` (1-based), dispatching compound constructs to
    /// the block extractor and simple statements to the handler table.
    /// Returns a propagating signal. A missing end-sentinel is not an
    /// error: the block extractor folds the remaining lines into the
    /// open block's body and this function runs them as such.
    fn exec_lines(
        &mut self,
        lines: &[String],
        base_line_no: usize,
    ) -> Result<Option<Signal>, InterpretError> {
        let mut i = 0;
        while i < lines.len() {
            self.line_no = base_line_no + i;
            let line = lines[i].trim();
            if line.is_empty() {
                i += 1;
                continue;
            }

            if let Some(header) = control::match_if(line) {
                let (then_body, else_body, next) = control::extract_if_block(lines, i);
                let guard = match self.eval(&header.guard) {
                    Ok(v) => v,
                    Err(e) => {
                        self.log_error(&e.to_string());
                        Value::Bool(false)
                    }
                };
                let body = if guard.is_truthy() {
                    &then_body
                } else {
                    &else_body
                };
                self.env.push();
                let result = self.exec_lines(body, self.line_no + 1);
                self.env.pop()?;
                if self.exit_requested {
                    return Ok(None);
                }
                if let Some(signal) = result? {
                    return Ok(Some(signal));
                }
                i = next;
                continue;
            }

            if let Some(header) = control::match_while(line) {
                let (body, next) = control::extract_while_block(lines, i);
                loop {
                    let guard = match self.eval(&header.guard) {
                        Ok(v) => v,
                        Err(e) => {
                            self.log_error(&e.to_string());
                            break;
                        }
                    };
                    if !guard.is_truthy() {
                        break;
                    }
                    self.env.push();
                    let result = self.exec_lines(&body, self.line_no + 1);
                    self.env.pop()?;
                    if self.exit_requested {
                        return Ok(None);
                    }
                    match result? {
                        Some(Signal::Break) => break,
                        Some(Signal::Continue) | None => {}
                        Some(signal @ Signal::Return(_)) => return Ok(Some(signal)),
                    }
                }
                i = next;
                continue;
            }

            if let Some(header) = control::match_for(line) {
                let (body, next) = control::extract_for_block(lines, i);
                let iterable = self.eval(&header.iterable_expr)?;
                let items = iterable_items(&iterable)?;
                for item in items {
                    self.env.push();
                    let declare_and_bind = (|| -> Result<(), InterpretError> {
                        self.env.declare(&header.var_name)?;
                        self.env.assign(&header.var_name, item)
                    })();
                    if let Err(e) = declare_and_bind {
                        self.env.pop()?;
                        return Err(e);
                    }
                    let result = self.exec_lines(&body, self.line_no + 1);
                    self.env.pop()?;
                    if self.exit_requested {
                        return Ok(None);
                    }
                    match result? {
                        Some(Signal::Break) => break,
                        Some(Signal::Continue) | None => {}
                        Some(signal @ Signal::Return(_)) => return Ok(Some(signal)),
                    }
                }
                i = next;
                continue;
            }

            if let Some(header) = control::match_func(line) {
                let (body, next) = control::extract_func_block(lines, i);
                let params: Vec<String> = header
                    .params_src
                    .split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect();
                let func = FunctionValue {
                    params,
                    body,
                    closure: self.env.snapshot(),
                };
                self.env.declare(&header.name)?;
                self.env.assign(&header.name, Value::Function(Rc::new(func)))?;
                i = next;
                continue;
            }

            match dispatch::match_statement(line) {
                Some(Stmt::Break) => return Ok(Some(Signal::Break)),
                Some(Stmt::Continue) => return Ok(Some(Signal::Continue)),
                Some(Stmt::Return(expr_src)) => {
                    let value = match expr_src {
                        Some(src) => self.eval(&src)?,
                        None => Value::Null,
                    };
                    return Ok(Some(Signal::Return(value)));
                }
                Some(stmt) => {
                    if let Err(e) = self.dispatch_simple(stmt) {
                        self.log_error(&e.to_string());
                    }
                    if self.exit_requested {
                        return Ok(None);
                    }
                }
                None => {
                    self.log_error(&format!("알 수 없는 명령어 - {}", line));
                }
            }
            i += 1;
        }
        Ok(None)
    }

    /// Function-call protocol (§4.6): arity check, scope-stack swap to
    /// closure + fresh frame, parameter binding, body execution,
    /// unconditional restore.
    pub fn call_function(&mut self, func: &FunctionValue, args: Vec<Value>) -> Value {
        if func.params.len() != args.len() {
            self.log_error(&format!(
                "함수 호출 인자 개수 불일치. 기대: {}, 전달: {}",
                func.params.len(),
                args.len()
            ));
            return Value::Null;
        }
        if self.debug {
            self.log_info(&format!("함수 호출 시작, 인자: {:?}", args));
        }
        let saved = self.env.swap(func.closure.clone());
        self.env.push();
        for (param, arg) in func.params.iter().zip(args.into_iter()) {
            let _ = self.env.declare(param);
            let _ = self.env.assign(param, arg);
        }
        let result = self.exec_lines(&func.body, 0);
        let return_value = match result {
            Ok(Some(Signal::Return(v))) => v,
            Ok(Some(Signal::Break)) | Ok(Some(Signal::Continue)) => {
                self.log_error("브레이크/넘어가 북딱가 함수 안에서 반복문 바깥에 사용됨");
                Value::Null
            }
            Ok(None) => Value::Null,
            Err(e) => {
                self.log_error(&e.to_string());
                Value::Null
            }
        };
        self.env.restore(saved);
        if self.debug {
            self.log_info(&format!("함수 호출 종료, 반환값: {}", return_value));
        }
        return_value
    }

    fn dispatch_simple(&mut self, stmt: Stmt) -> Result<(), InterpretError> {
        crate::builtins::handle(self, stmt)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn iterable_items(value: &Value) -> Result<Vec<Value>, InterpretError> {
    match value {
        Value::List(items) => Ok(items.clone()),
        Value::Str(s) => Ok(s.chars().map(|c| Value::Str(c.to_string())).collect()),
        other => Err(InterpretError::TypeError(format!(
            "반복할 수 없는 타입: {}",
            other.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::StdinInputSource;

    fn new_interp() -> Interpreter {
        crate::expr::clear_cache_for_tests();
        Interpreter::new()
    }

    #[test]
    fn declare_assign_and_output_scenario_a() {
        let mut interp = new_interp();
        interp.run_program(
            "동네 힘센 사람 x 북딱\nx 마 매끼나라 고마 10 + 5 북딱\n응디 x 북딱",
        );
        assert_eq!(interp.env.lookup("x").unwrap().to_string(), "15");
    }

    #[test]
    fn closure_snapshot_scenario_f() {
        let mut interp = new_interp();
        interp.run_program(
            "동네 힘센 사람 x 북딱\nx 마 매끼나라 고마 1 북딱\n흔들어라 f() 북딱\n동네 힘센 사람 y 북딱\ny 마 매끼나라 고마 x 북딱\n돌아가 y 북딱\n끝 흔들어라 북딱\nx 마 매끼나라 고마 2 북딱\n동네 힘센 사람 captured 북딱\ncaptured 마 매끼나라 고마 0 북딱",
        );
        let func = match interp.env.lookup("f").unwrap() {
            Value::Function(f) => f,
            _ => panic!("expected function"),
        };
        let result = interp.call_function(&func, vec![]);
        assert_eq!(result.to_string(), "1");
    }

    #[test]
    fn while_break_scenario_c() {
        let mut interp = new_interp();
        interp.run_program(
            "동네 힘센 사람 x 북딱\nx 마 매끼나라 고마 15 북딱\n반복 (x > 0) 북딱\nx 마 매끼나라 고마 x - 3 북딱\n만약 (x == 4) 북딱\n브레이크 북딱\n끝 만약 북딱\n끝 반복 북딱",
        );
        assert_eq!(interp.env.lookup("x").unwrap().to_string(), "4");
    }

    #[test]
    fn for_loop_over_list() {
        let mut interp = new_interp();
        interp.run_program("동네 힘센 사람 last 북딱\n반복문 i in [1,2,3] 북딱\nlast 마 매끼나라 고마 i 북딱\n끝 반복문 북딱");
        assert_eq!(interp.env.lookup("last").unwrap().to_string(), "3");
    }

    #[test]
    fn arity_mismatch_is_non_fatal_and_yields_null() {
        let mut interp = new_interp();
        interp.run_program("흔들어라 add(a, b) 북딱\n돌아가 a 북딱\n끝 흔들어라 북딱");
        let func = match interp.env.lookup("add").unwrap() {
            Value::Function(f) => f,
            _ => panic!("expected function"),
        };
        let result = interp.call_function(&func, vec![Value::Int(1)]);
        assert_eq!(result.to_string(), "None");
    }

    #[test]
    fn input_source_is_pluggable_for_scripted_tests() {
        let mut interp = new_interp();
        interp.input = Box::new(StdinInputSource::with_queued_lines(vec!["hi".to_string()]));
        assert_eq!(interp.input.read_line(""), Some("hi".to_string()));
    }
}
