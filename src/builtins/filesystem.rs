// ABOUTME: Filesystem, I/O, and process builtins — no capability sandbox, talks to std::fs/process directly

use crate::error::InterpretError;
use crate::interpreter::Interpreter;

pub fn read_file_print(interp: &mut Interpreter, path: &str) -> Result<(), InterpretError> {
    let contents = std::fs::read_to_string(path)?;
    interp.output(&contents);
    Ok(())
}

pub fn prompt_read_line_print(interp: &mut Interpreter, prompt: &str) -> Result<(), InterpretError> {
    let line = interp.input.read_line(prompt).unwrap_or_default();
    interp.output(&line);
    Ok(())
}

pub fn write_file(_interp: &mut Interpreter, path: &str, contents: &str) -> Result<(), InterpretError> {
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn append_file(_interp: &mut Interpreter, path: &str, contents: &str) -> Result<(), InterpretError> {
    use std::io::Write;
    let mut file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

pub fn delete_file(_interp: &mut Interpreter, path: &str) -> Result<(), InterpretError> {
    std::fs::remove_file(path)?;
    Ok(())
}

pub fn file_exists(interp: &mut Interpreter, path: &str) -> Result<(), InterpretError> {
    let exists = std::path::Path::new(path).exists();
    interp.output(if exists { "True" } else { "False" });
    Ok(())
}

pub fn list_directory(interp: &mut Interpreter) -> Result<(), InterpretError> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(".")? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    names.sort();
    interp.output(&names.join(", "));
    Ok(())
}

pub fn print_working_directory(interp: &mut Interpreter) -> Result<(), InterpretError> {
    let cwd = std::env::current_dir()?;
    interp.output(&cwd.display().to_string());
    Ok(())
}

pub fn change_working_directory(_interp: &mut Interpreter, path: &str) -> Result<(), InterpretError> {
    std::env::set_current_dir(path)?;
    Ok(())
}

pub fn system_exec(interp: &mut Interpreter, command: &str) -> Result<(), InterpretError> {
    let status = if cfg!(target_os = "windows") {
        std::process::Command::new("cmd").arg("/C").arg(command).status()
    } else {
        std::process::Command::new("sh").arg("-c").arg(command).status()
    }?;
    interp.output(&format!("시스템 명령 실행 결과: {}", status));
    Ok(())
}

pub fn exit(interp: &mut Interpreter) -> Result<(), InterpretError> {
    interp.exit_requested = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips_through_the_real_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scratch.txt").to_string_lossy().to_string();
        let mut interp = Interpreter::new();
        write_file(&mut interp, &path, "hello").unwrap();
        append_file(&mut interp, &path, " world").unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "hello world");
    }

    #[test]
    fn delete_file_removes_it_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scratch.txt").to_string_lossy().to_string();
        let mut interp = Interpreter::new();
        write_file(&mut interp, &path, "x").unwrap();
        delete_file(&mut interp, &path).unwrap();
        assert!(!std::path::Path::new(&path).exists());
    }

    #[test]
    fn exit_sets_the_exit_flag() {
        let mut interp = Interpreter::new();
        exit(&mut interp).unwrap();
        assert!(interp.exit_requested);
    }
}
