//! Process execution primitive.
//!
//! Commands are given as argv tokens and spawned directly, never through a
//! shell string. The result distinguishes three cases:
//!
//! - the executable does not exist: `Err(InspectorError::CommandNotFound)`
//! - it ran and exited non-zero: `Ok(CommandResult { success: false, .. })`
//! - it ran and exited zero: `Ok(CommandResult { success: true, .. })`

use crate::error::{InspectorError, Result};
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Stdout followed by stderr, for tools that report on either stream.
    pub fn combined_output(&self) -> String {
        let mut out = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.stderr);
        }
        out
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout and stderr (if false, inherits from parent).
    pub capture: bool,

    /// Timeout in seconds (None = no timeout).
    pub timeout: Option<u64>,
}

impl CommandOptions {
    /// Capture output, no timeout.
    pub fn captured() -> Self {
        Self {
            capture: true,
            ..Default::default()
        }
    }
}

fn display_argv(argv: &[String]) -> String {
    argv.join(" ")
}

/// Execute a command given as argv tokens.
pub fn execute(argv: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let Some((program, args)) = argv.split_first() else {
        return Err(InspectorError::CommandFailed {
            command: String::new(),
            code: None,
        });
    };
    let command = display_argv(argv);
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    if options.capture {
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
    }
    cmd.stdin(Stdio::null());

    tracing::debug!("Executing: {}", command);

    let mut child = cmd.spawn().map_err(|e| match e.kind() {
        ErrorKind::NotFound => InspectorError::CommandNotFound {
            command: program.clone(),
        },
        _ => InspectorError::CommandFailed {
            command: command.clone(),
            code: None,
        },
    })?;

    let stdout_handle = child.stdout.take().map(|mut out| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = out.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).to_string()
        })
    });
    let stderr_handle = child.stderr.take().map(|mut err| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = err.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).to_string()
        })
    });

    let status = match options.timeout {
        Some(seconds) => wait_with_timeout(&mut child, &command, seconds)?,
        None => child.wait().map_err(|_| InspectorError::CommandFailed {
            command: command.clone(),
            code: None,
        })?,
    };

    let stdout = stdout_handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();
    let stderr = stderr_handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();
    let duration = start.elapsed();

    if status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(status.code(), stdout, stderr, duration))
    }
}

fn wait_with_timeout(
    child: &mut Child,
    command: &str,
    seconds: u64,
) -> Result<std::process::ExitStatus> {
    let deadline = Instant::now() + Duration::from_secs(seconds);
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!("Killed `{}` after {}s", command, seconds);
                return Err(InspectorError::CommandTimedOut {
                    command: command.to_string(),
                    seconds,
                });
            }
            Ok(None) => thread::sleep(Duration::from_millis(20)),
            Err(_) => {
                return Err(InspectorError::CommandFailed {
                    command: command.to_string(),
                    code: None,
                })
            }
        }
    }
}

/// Execute a command, capturing output.
pub fn execute_quiet(argv: &[String]) -> Result<CommandResult> {
    execute(argv, &CommandOptions::captured())
}

/// Execute a command and return success/failure.
pub fn execute_check(argv: &[String]) -> bool {
    execute_quiet(argv).map(|r| r.success).unwrap_or(false)
}

pub const CAPTURE_TIMEOUT_SECS: u64 = 120;

/// Run a command and write its stdout and stderr into `dir/file_name`.
///
/// A non-zero exit still writes the file; the exit code is recorded at the
/// end so the archive shows what happened. Probes are killed after
/// [`CAPTURE_TIMEOUT_SECS`].
pub fn capture_output_to_file(argv: &[String], dir: &Path, file_name: &str) -> Result<PathBuf> {
    let options = CommandOptions {
        capture: true,
        timeout: Some(CAPTURE_TIMEOUT_SECS),
        ..Default::default()
    };
    let result = execute(argv, &options)?;
    let mut content = result.combined_output();
    if !result.success {
        content.push_str(&format!("\n[exit code: {:?}]\n", result.exit_code));
    }

    let path = dir.join(file_name);
    fs::write(&path, content)?;
    Ok(path)
}

/// Convert string-literal tokens into an owned argv.
pub fn argv<const N: usize>(tokens: [&str; N]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
