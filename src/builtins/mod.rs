// ABOUTME: Builtin handler catalog — one handler per dispatcher pattern, the only callers of external collaborators

mod collections;
mod console;
mod filesystem;
mod json;
mod math_time;
mod network;
mod persistence;
mod strings;
mod vars;

use crate::dispatch::Stmt;
use crate::error::InterpretError;
use crate::interpreter::Interpreter;

/// Routes a matched simple statement to its category handler.
pub fn handle(interp: &mut Interpreter, stmt: Stmt) -> Result<(), InterpretError> {
    match stmt {
        Stmt::Help => console::help(interp),
        Stmt::WriteLiteral(s) => console::write_literal(interp, &s),
        Stmt::PrintState => console::print_state(interp),
        Stmt::PrintVersion => console::print_version(interp),
        Stmt::ListBuiltins => console::list_builtins(interp),
        Stmt::ListPatterns => console::list_patterns(interp),
        Stmt::ClearScreen => console::clear_screen(interp),
        Stmt::SetPrompt(p) => console::set_prompt(interp, &p),

        Stmt::Declare(name) => vars::declare(interp, &name),
        Stmt::Assign(name, expr_src) => vars::assign(interp, &name, &expr_src),
        Stmt::OutputVar(name) => vars::output_var(interp, &name),
        Stmt::ListVariables => vars::list_variables(interp),
        Stmt::DeleteVariable(name) => vars::delete_variable(interp, &name),
        Stmt::Reset => vars::reset(interp),
        Stmt::FunctionCall(name, args_src) => vars::call(interp, &name, &args_src),

        Stmt::ReadFilePrint(path) => filesystem::read_file_print(interp, &path),
        Stmt::WriteFile(path, contents) => filesystem::write_file(interp, &path, &contents),
        Stmt::AppendFile(path, contents) => filesystem::append_file(interp, &path, &contents),
        Stmt::DeleteFile(path) => filesystem::delete_file(interp, &path),
        Stmt::FileExists(path) => filesystem::file_exists(interp, &path),
        Stmt::ListDirectory => filesystem::list_directory(interp),
        Stmt::PrintWorkingDirectory => filesystem::print_working_directory(interp),
        Stmt::ChangeWorkingDirectory(path) => filesystem::change_working_directory(interp, &path),
        Stmt::PromptReadLinePrint(prompt) => filesystem::prompt_read_line_print(interp, &prompt),
        Stmt::SystemExec(cmd) => filesystem::system_exec(interp, &cmd),
        Stmt::Exit => filesystem::exit(interp),

        Stmt::ListAppend(name, expr_src) => collections::list_append(interp, &name, &expr_src),
        Stmt::ListRemove(name, expr_src) => collections::list_remove(interp, &name, &expr_src),
        Stmt::SortList(name) => collections::sort_list(interp, &name),
        Stmt::MapAdd(name, key_src, value_src) => {
            collections::map_add(interp, &name, &key_src, &value_src)
        }
        Stmt::MapDelete(name, key_src) => collections::map_delete(interp, &name, &key_src),

        Stmt::Uppercase(name) => strings::uppercase(interp, &name),
        Stmt::Lowercase(name) => strings::lowercase(interp, &name),

        Stmt::Power(base_src, exp_src) => math_time::power(interp, &base_src, &exp_src),
        Stmt::Sqrt(src) => math_time::sqrt(interp, &src),
        Stmt::Log(value_src, base_src) => math_time::log(interp, &value_src, &base_src),
        Stmt::RandomInt(lo_src, hi_src) => math_time::random_int(interp, &lo_src, &hi_src),
        Stmt::ShuffleList(name) => math_time::shuffle_list(interp, &name),
        Stmt::PrintCurrentTime => math_time::print_current_time(interp),
        Stmt::PrintCurrentDate => math_time::print_current_date(interp),

        Stmt::HttpGetPrint(url) => network::http_get_print(interp, &url),

        Stmt::JsonParsePrint(src) => json::json_parse_print(interp, &src),
        Stmt::JsonStringify(name) => json::json_stringify(interp, &name),

        Stmt::PrintEnvVar(name) => persistence::print_env_var(interp, &name),
        Stmt::SetEnvVar(name, value) => persistence::set_env_var(interp, &name, &value),
        Stmt::SaveVars(path) => persistence::save_vars(interp, &path),
        Stmt::LoadVars(path) => persistence::load_vars(interp, &path),

        Stmt::Break | Stmt::Continue | Stmt::Return(_) => unreachable!(
            "control-flow statements are intercepted before dispatch_simple is called"
        ),
    }
}
