//! Blocking subprocess execution.
//!
//! Every external command is logged with its shell-quoted command line
//! before it starts. Programs are spawned directly from an argv, never
//! through a shell.

use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::SubprocessError;

/// Renders `cmd` as a shell-quoted command line for logs and errors.
#[must_use]
pub fn display_command(cmd: &Command) -> String {
    let words: Vec<String> = std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|w| w.to_string_lossy().into_owned())
        .collect();

    shlex::try_join(words.iter().map(String::as_str)).unwrap_or_else(|_| words.join(" "))
}

/// Runs `cmd` with inherited stdio and waits for it to finish.
///
/// # Errors
///
/// Returns `SubprocessError::SpawnFailed` if the program cannot be started
/// and `SubprocessError::NonZeroExit` if it exits unsuccessfully.
pub fn run_inherited(cmd: &mut Command, step: &'static str) -> Result<(), SubprocessError> {
    let command = display_command(cmd);
    info!(step, command = %command, "executing command");

    let status = cmd
        .stdin(Stdio::null())
        .status()
        .map_err(|source| spawn_failed(cmd, step, source))?;

    if !status.success() {
        return Err(SubprocessError::NonZeroExit {
            step,
            command,
            code: status.code(),
        });
    }

    Ok(())
}

/// Runs `cmd`, capturing stdout. Stderr passes through to the terminal.
///
/// # Errors
///
/// Same as [`run_inherited`]. Non-UTF-8 output is replaced lossily.
pub fn run_captured(cmd: &mut Command, step: &'static str) -> Result<String, SubprocessError> {
    let command = display_command(cmd);
    info!(step, command = %command, "executing command");

    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|source| spawn_failed(cmd, step, source))?;

    if !output.status.success() {
        return Err(SubprocessError::NonZeroExit {
            step,
            command,
            code: output.status.code(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    debug!(step, stdout = %stdout.trim_end(), "command output");
    Ok(stdout)
}

fn spawn_failed(cmd: &Command, step: &'static str, source: std::io::Error) -> SubprocessError {
    SubprocessError::SpawnFailed {
        step,
        program: cmd.get_program().to_string_lossy().into_owned(),
        source,
    }
}
