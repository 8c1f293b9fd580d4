// ABOUTME: Statement dispatcher — ordered table of exact-match patterns for simple statements

use regex::Regex;
use std::sync::OnceLock;

/// Every simple (non-block-opening) statement kind, one per dispatcher
/// pattern. Compound openers (if/while/for/function-definition) are
/// matched separately by `crate::control` before this table is tried.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Help,
    WriteLiteral(String),
    Declare(String),
    Assign(String, String),
    ReadFilePrint(String),
    PromptReadLinePrint(String),
    OutputVar(String),
    ListVariables,
    DeleteVariable(String),
    Break,
    Continue,
    Return(Option<String>),
    FunctionCall(String, String),
    PrintState,
    PrintVersion,
    WriteFile(String, String),
    AppendFile(String, String),
    PrintCurrentTime,
    PrintCurrentDate,
    HttpGetPrint(String),
    JsonParsePrint(String),
    JsonStringify(String),
    ListAppend(String, String),
    ListRemove(String, String),
    MapAdd(String, String, String),
    MapDelete(String, String),
    Reset,
    ListBuiltins,
    SystemExec(String),
    DeleteFile(String),
    FileExists(String),
    ListDirectory,
    SortList(String),
    Uppercase(String),
    Lowercase(String),
    RandomInt(String, String),
    ShuffleList(String),
    PrintEnvVar(String),
    SetEnvVar(String, String),
    Power(String, String),
    Sqrt(String),
    Log(String, String),
    SaveVars(String),
    LoadVars(String),
    Exit,
    SetPrompt(String),
    ListPatterns,
    ClearScreen,
    PrintWorkingDirectory,
    ChangeWorkingDirectory(String),
}

macro_rules! table {
    ($($re:expr => $build:expr),+ $(,)?) => {
        vec![$((Regex::new($re).unwrap(), Box::new($build) as Box<dyn Fn(&regex::Captures) -> Stmt + Send + Sync>)),+]
    };
}

type Entry = (Regex, Box<dyn Fn(&regex::Captures) -> Stmt + Send + Sync>);

fn entries() -> &'static Vec<Entry> {
    static TABLE: OnceLock<Vec<Entry>> = OnceLock::new();
    TABLE.get_or_init(|| {
        table![
            r#"^도움말 북딱$"# => |_: &regex::Captures| Stmt::Help,
            r#"^노무현이 왔습니다 "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::WriteLiteral(c[1].to_string()),
            r#"^동네 힘센 사람 ([^ ]+) 북딱$"# => |c: &regex::Captures| Stmt::Declare(c[1].to_string()),
            r#"^([^ ]+) 마 매끼나라 고마 (.*?) 북딱$"# => |c: &regex::Captures| Stmt::Assign(c[1].to_string(), c[2].to_string()),
            r#"^방독면 챙기십쇼 "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::ReadFilePrint(c[1].to_string()),
            r#"^지금까지 뭐했노 "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::PromptReadLinePrint(c[1].to_string()),
            r#"^응디 현재 시간 북딱$"# => |_: &regex::Captures| Stmt::PrintCurrentTime,
            r#"^응디 현재 날짜 북딱$"# => |_: &regex::Captures| Stmt::PrintCurrentDate,
            r#"^응디 요청 보내기 "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::HttpGetPrint(c[1].to_string()),
            r#"^응디 ([^ ]+) 북딱$"# => |c: &regex::Captures| Stmt::OutputVar(c[1].to_string()),
            r#"^변수 목록 북딱$"# => |_: &regex::Captures| Stmt::ListVariables,
            r#"^변수 삭제 ([^ ]+) 북딱$"# => |c: &regex::Captures| Stmt::DeleteVariable(c[1].to_string()),
            r#"^브레이크 북딱$"# => |_: &regex::Captures| Stmt::Break,
            r#"^넘어가 북딱$"# => |_: &regex::Captures| Stmt::Continue,
            r#"^돌아가(?: (.*?))? 북딱$"# => |c: &regex::Captures| Stmt::Return(c.get(1).map(|m| m.as_str().to_string())),
            r#"^함수 호출 ([^ ]+)\s*\((.*?)\) 북딱$"# => |c: &regex::Captures| Stmt::FunctionCall(c[1].to_string(), c[2].to_string()),
            r#"^상태 북딱$"# => |_: &regex::Captures| Stmt::PrintState,
            r#"^버전 북딱$"# => |_: &regex::Captures| Stmt::PrintVersion,
            r#"^파일에 쓰기 "(.*?)", "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::WriteFile(c[1].to_string(), c[2].to_string()),
            r#"^파일에 추가하기 "(.*?)", "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::AppendFile(c[1].to_string(), c[2].to_string()),
            r#"^JSON 변환 "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::JsonParsePrint(c[1].to_string()),
            r#"^JSON 문자열화 ([^ ]+) 북딱$"# => |c: &regex::Captures| Stmt::JsonStringify(c[1].to_string()),
            r#"^리스트 추가 ([^ ]+), (.*?) 북딱$"# => |c: &regex::Captures| Stmt::ListAppend(c[1].to_string(), c[2].to_string()),
            r#"^리스트 삭제 ([^ ]+), (.*?) 북딱$"# => |c: &regex::Captures| Stmt::ListRemove(c[1].to_string(), c[2].to_string()),
            r#"^딕셔너리 추가 ([^,]+), (.*?), (.*?) 북딱$"# => |c: &regex::Captures| Stmt::MapAdd(c[1].to_string(), c[2].to_string(), c[3].to_string()),
            r#"^딕셔너리 삭제 ([^,]+), (.*?) 북딱$"# => |c: &regex::Captures| Stmt::MapDelete(c[1].to_string(), c[2].to_string()),
            r#"^초기화 북딱$"# => |_: &regex::Captures| Stmt::Reset,
            r#"^내장함수 목록 북딱$"# => |_: &regex::Captures| Stmt::ListBuiltins,
            r#"^시스템 실행 "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::SystemExec(c[1].to_string()),
            r#"^파일 삭제 "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::DeleteFile(c[1].to_string()),
            r#"^파일 존재 확인 "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::FileExists(c[1].to_string()),
            r#"^디렉터리 목록 북딱$"# => |_: &regex::Captures| Stmt::ListDirectory,
            r#"^리스트 정렬 ([^ ]+) 북딱$"# => |c: &regex::Captures| Stmt::SortList(c[1].to_string()),
            r#"^대문자로 변환 ([^ ]+) 북딱$"# => |c: &regex::Captures| Stmt::Uppercase(c[1].to_string()),
            r#"^소문자로 변환 ([^ ]+) 북딱$"# => |c: &regex::Captures| Stmt::Lowercase(c[1].to_string()),
            r#"^랜덤 숫자 \((.*?), (.*?)\) 북딱$"# => |c: &regex::Captures| Stmt::RandomInt(c[1].to_string(), c[2].to_string()),
            r#"^랜덤 리스트 섞기 ([^ ]+) 북딱$"# => |c: &regex::Captures| Stmt::ShuffleList(c[1].to_string()),
            r#"^환경 변수 출력 "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::PrintEnvVar(c[1].to_string()),
            r#"^환경 변수 설정 "(.*?)", "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::SetEnvVar(c[1].to_string(), c[2].to_string()),
            r#"^거듭제곱 \((.*?), (.*?)\) 북딱$"# => |c: &regex::Captures| Stmt::Power(c[1].to_string(), c[2].to_string()),
            r#"^제곱근 \((.*?)\) 북딱$"# => |c: &regex::Captures| Stmt::Sqrt(c[1].to_string()),
            r#"^로그 \((.*?), (.*?)\) 북딱$"# => |c: &regex::Captures| Stmt::Log(c[1].to_string(), c[2].to_string()),
            r#"^변수 저장 "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::SaveVars(c[1].to_string()),
            r#"^변수 불러오기 "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::LoadVars(c[1].to_string()),
            r#"^종료 북딱$"# => |_: &regex::Captures| Stmt::Exit,
            r#"^프롬프트 설정 "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::SetPrompt(c[1].to_string()),
            r#"^도움말 "명령어" 북딱$"# => |_: &regex::Captures| Stmt::ListPatterns,
            r#"^화면 지우기 북딱$"# => |_: &regex::Captures| Stmt::ClearScreen,
            r#"^현재 경로 출력 북딱$"# => |_: &regex::Captures| Stmt::PrintWorkingDirectory,
            r#"^작업 디렉터리 변경 "(.*?)" 북딱$"# => |c: &regex::Captures| Stmt::ChangeWorkingDirectory(c[1].to_string()),
        ]
    })
}

/// Matches `line` against the ordered simple-statement table, returning
/// the first hit. Patterns are disjoint under `fullmatch`, so order
/// only affects readability, not correctness.
pub fn match_statement(line: &str) -> Option<Stmt> {
    for (re, build) in entries() {
        if let Some(caps) = re.captures(line) {
            return Some(build(&caps));
        }
    }
    None
}

/// Renders the dispatcher's own pattern source strings, for the
/// "list dispatcher patterns" diagnostic builtin.
pub fn pattern_sources() -> Vec<&'static str> {
    entries().iter().map(|(re, _)| re.as_str()).collect()
}
