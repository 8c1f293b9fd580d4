// ABOUTME: Error types for the interpretation engine

use thiserror::Error;

/// The full error taxonomy.
///
/// Handler errors of any variant are logged and recovered at the
/// statement boundary; execution continues with the next line. Only
/// the explicit exit builtin terminates the process.
#[derive(Error, Debug, Clone)]
pub enum InterpretError {
    #[error("알 수 없는 명령어 - {0}")]
    SyntaxError(String),

    #[error("변수 \"{0}\" 가 선언되지 않음")]
    NameError(String),

    #[error("{0}")]
    TypeError(String),

    #[error("안전하지 않은 표현식: {0}")]
    EvalError(String),

    #[error("함수 호출 인자 개수 불일치. 기대: {expected}, 전달: {actual}")]
    ArityError { expected: usize, actual: usize },

    #[error("{0}")]
    IOError(String),

    #[error("{0}이(가) 반복문/함수 바깥에서 사용됨")]
    ControlFlowError(String),
}

impl From<std::io::Error> for InterpretError {
    fn from(e: std::io::Error) -> Self {
        InterpretError::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for InterpretError {
    fn from(e: serde_json::Error) -> Self {
        InterpretError::IOError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_error_message_matches_declare_before_use_wording() {
        let e = InterpretError::NameError("x".to_string());
        assert_eq!(e.to_string(), "변수 \"x\" 가 선언되지 않음");
    }

    #[test]
    fn arity_error_carries_both_counts() {
        let e = InterpretError::ArityError {
            expected: 2,
            actual: 1,
        };
        assert!(e.to_string().contains('2'));
        assert!(e.to_string().contains('1'));
    }
}
