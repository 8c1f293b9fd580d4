// ABOUTME: CLI entry point — script execution, built-in test/default programs, and the REPL

use bukddak::config::{DEFAULT_BANNER, SCRIPT_EXTENSION, VERSION, WELCOME_MESSAGE};
use bukddak::interpreter::Interpreter;
use bukddak::logging;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;

const TEST_PROGRAM: &str = r#"동네 힘센 사람 x 북딱
x 마 매끼나라 고마 10 북딱
응디 x 북딱
"#;

fn default_program() -> String {
    format!("노무현이 왔습니다 \"{}\" 북딱\n", DEFAULT_BANNER)
}

#[derive(Parser, Debug)]
#[command(name = "bukddak")]
#[command(version = VERSION)]
#[command(about = "북딱 으로 끝맺는 한국어 명령어 인터프리터")]
struct CliArgs {
    /// 실행할 .noh 스크립트 파일 (생략하면 기본 프로그램이나 REPL을 실행)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// 내장된 테스트 프로그램을 실행
    #[arg(long = "test")]
    test: bool,

    /// 디버그 로그(함수 호출 전/후 등)를 활성화
    #[arg(long = "debug")]
    debug: bool,

    /// 빠른 모드 — 정보 로그를 건너뛰고 오류만 기록
    #[arg(long = "fast")]
    fast: bool,

    /// 인자가 없어도 강제로 REPL을 실행
    #[arg(long = "repl")]
    repl: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let _guard = logging::init(args.fast);

    let mut interp = Interpreter::new().with_debug(args.debug).with_fast(args.fast);

    if args.test {
        interp.run_program(TEST_PROGRAM);
        return Ok(());
    }

    if let Some(path) = args.script {
        if path.extension().and_then(|e| e.to_str()) != Some(SCRIPT_EXTENSION) {
            return Err(format!(
                "스크립트 파일은 .{} 확장자를 가져야 함: {}",
                SCRIPT_EXTENSION,
                path.display()
            )
            .into());
        }
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| format!("파일을 읽을 수 없음 {}: {}", path.display(), e))?;
        interp.run_program(&contents);
        return Ok(());
    }

    if args.repl || atty_is_interactive() {
        run_repl(interp)?;
    } else {
        interp.run_program(&default_program());
    }

    Ok(())
}

fn atty_is_interactive() -> bool {
    use std::io::IsTerminal;
    std::io::stdin().is_terminal()
}

fn run_repl(mut interp: Interpreter) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<(), rustyline::history::DefaultHistory> =
        Editor::with_config(config).map_err(|e| format!("REPL 초기화 실패: {}", e))?;

    let history_file = ".bukddak_history";
    let _ = rl.load_history(history_file);

    println!("{}", WELCOME_MESSAGE);

    loop {
        let readline = rl.readline(&interp.prompt);

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "종료" || trimmed == "exit" || trimmed == "quit" {
                    println!("안녕히 가세요!");
                    break;
                }
                interp.run_program(&line);
                if interp.exit_requested {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\n안녕히 가세요!");
                break;
            }
            Err(err) => {
                eprintln!("오류: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
    Ok(())
}
