//! Process execution, PATH lookup and shell detection.

pub mod command;
pub mod path;
pub mod platform;

pub use command::{
    argv, capture_output_to_file, execute, execute_check, execute_quiet, CommandOptions,
    CommandResult,
};
pub use path::{is_command, parse_system_path, resolve_tool_path, which};
pub use platform::{detect_shell, is_ci, shell_config_files, ShellType};
