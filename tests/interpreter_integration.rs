// ABOUTME: Black-box tests driving the interpreter end to end through run_program

use bukddak::interpreter::Interpreter;
use bukddak::value::Value;
use std::io::Read;
use tempfile::tempdir;

fn run(source: &str) -> Interpreter {
    let mut interp = Interpreter::new();
    interp.run_program(source);
    interp
}

#[test]
fn if_else_picks_the_matching_branch() {
    let interp = run(
        "동네 힘센 사람 x 북딱\nx 마 매끼나라 고마 5 북딱\n만약 (x > 10) 북딱\n동네 힘센 사람 y 북딱\ny 마 매끼나라 고마 1 북딱\n아니면 북딱\n동네 힘센 사람 y 북딱\ny 마 매끼나라 고마 2 북딱\n끝 만약 북딱",
    );
    assert_eq!(interp.env.lookup("y").unwrap().to_string(), "2");
}

#[test]
fn function_with_parameters_computes_from_its_own_frame() {
    let mut interp = Interpreter::new();
    interp.run_program(
        "흔들어라 add(a, b) 북딱\n동네 힘센 사람 total 북딱\ntotal 마 매끼나라 고마 a + b 북딱\n돌아가 total 북딱\n끝 흔들어라 북딱",
    );
    let func = match interp.env.lookup("add").unwrap() {
        Value::Function(f) => f,
        other => panic!("expected a function, got {:?}", other),
    };
    let result = interp.call_function(&func, vec![Value::Int(7), Value::Int(8)]);
    assert_eq!(result.to_string(), "15");
}

#[test]
fn continue_skips_the_rest_of_the_loop_body_but_keeps_looping() {
    let interp = run(
        "동네 힘센 사람 sum 북딱\nsum 마 매끼나라 고마 0 북딱\n반복문 i in [1,2,3,4] 북딱\n만약 (i == 2) 북딱\n넘어가 북딱\n끝 만약 북딱\nsum 마 매끼나라 고마 sum + i 북딱\n끝 반복문 북딱",
    );
    assert_eq!(interp.env.lookup("sum").unwrap().to_string(), "8");
}

#[test]
fn reset_clears_user_variables_but_a_redeclare_still_works_after() {
    let mut interp = Interpreter::new();
    interp.run_program("동네 힘센 사람 x 북딱\nx 마 매끼나라 고마 1 북딱\n초기화 북딱\n동네 힘센 사람 x 북딱\nx 마 매끼나라 고마 2 북딱");
    assert_eq!(interp.env.lookup("x").unwrap().to_string(), "2");
}

#[test]
fn a_missing_end_sentinel_folds_the_remaining_lines_into_the_loop_body() {
    let interp = run("동네 힘센 사람 x 북딱\nx 마 매끼나라 고마 1 북딱\n반복 (x > 0) 북딱\nx 마 매끼나라 고마 x - 1 북딱");
    // the while-block never finds its closing sentinel, so the remaining
    // line becomes its body and actually runs as the loop: x=1 is truthy,
    // body runs once (x becomes 0), then the guard is false.
    assert_eq!(interp.env.lookup("x").unwrap().to_string(), "0");
}

#[test]
fn write_file_then_read_file_round_trips_through_a_real_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let path_str = path.to_string_lossy().to_string();
    let program = format!(
        "파일에 쓰기 \"{}\", \"안녕하세요\" 북딱\n방독면 챙기십쇼 \"{}\" 북딱",
        path_str, path_str
    );
    run(&program);
    let mut contents = String::new();
    std::fs::File::open(&path)
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    assert_eq!(contents, "안녕하세요");
}

#[test]
fn exit_inside_an_if_branch_terminates_the_whole_program_not_just_the_branch() {
    let interp = run(
        "동네 힘센 사람 x 북딱\nx 마 매끼나라 고마 1 북딱\n만약 (x == 1) 북딱\n종료 북딱\n끝 만약 북딱\nx 마 매끼나라 고마 99 북딱",
    );
    assert_eq!(interp.env.lookup("x").unwrap().to_string(), "1");
    assert!(interp.exit_requested);
}

#[test]
fn exit_inside_a_while_loop_terminates_the_whole_program() {
    let interp = run(
        "동네 힘센 사람 x 북딱\nx 마 매끼나라 고마 0 북딱\n반복 (x < 10) 북딱\nx 마 매끼나라 고마 x + 1 북딱\n만약 (x == 2) 북딱\n종료 북딱\n끝 만약 북딱\n끝 반복 북딱\nx 마 매끼나라 고마 99 북딱",
    );
    assert_eq!(interp.env.lookup("x").unwrap().to_string(), "2");
}

#[test]
fn list_and_map_builtins_mutate_the_bound_variable_in_place() {
    let interp = run(
        "동네 힘센 사람 xs 북딱\nxs 마 매끼나라 고마 [1, 2] 북딱\n리스트 추가 xs, 3 북딱\n리스트 정렬 xs 북딱",
    );
    assert_eq!(interp.env.lookup("xs").unwrap().to_string(), "[1, 2, 3]");
}
