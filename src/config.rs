// ABOUTME: Configuration and constants for the interpreter — version, welcome banner, script extension

pub const VERSION: &str = "1.0.0";
pub const WELCOME_MESSAGE: &str = "응디시티 인터프리터 v1.0";
pub const SCRIPT_EXTENSION: &str = "noh";

/// The banner printed by the no-argument default program.
pub const DEFAULT_BANNER: &str = "여긴 응디시티";

pub const HELP_TEXT: &str = "사용 가능한 명령어는 '도움말 \"명령어\" 북딱' 으로 확인하세요.";
