use std::io::{ErrorKind, Write};
use std::process::{Command, ExitStatus, Stdio};

use launcher_core::{GatewayError, Opener, Picker, RawInput};

use crate::config::RuntimeConfig;

// dmenu and rofi exit with 1 when the user presses escape.
const PICKER_CANCEL_EXIT_CODE: i32 = 1;

/// Picker backed by a dmenu-style process: candidates on stdin, choice on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPicker {
    program: String,
    args: Vec<String>,
}

impl CommandPicker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.picker_program.clone(), config.picker_args.clone())
    }

    fn unavailable(&self, message: impl std::fmt::Display) -> GatewayError {
        GatewayError::PickerUnavailable(format!("{}: {message}", self.program))
    }
}

impl Picker for CommandPicker {
    fn prompt(&mut self, candidates: &[String], label: &str) -> Result<RawInput, GatewayError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(label)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|error| self.unavailable(format!("failed to start: {error}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            for candidate in candidates {
                match writeln!(stdin, "{candidate}") {
                    Ok(()) => {}
                    // The picker may answer without reading the whole list.
                    Err(error) if error.kind() == ErrorKind::BrokenPipe => break,
                    Err(error) => {
                        return Err(
                            self.unavailable(format!("failed to write candidates: {error}"))
                        );
                    }
                }
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|error| self.unavailable(format!("failed to read choice: {error}")))?;

        interpret_reply(&self.program, output.status, &output.stdout)
    }
}

fn interpret_reply(
    program: &str,
    status: ExitStatus,
    stdout: &[u8],
) -> Result<RawInput, GatewayError> {
    let reply = String::from_utf8_lossy(stdout);
    if status.success() {
        return Ok(RawInput::new(&reply));
    }

    match status.code() {
        Some(PICKER_CANCEL_EXIT_CODE) if reply.trim().is_empty() => Ok(RawInput::cancelled()),
        Some(code) => Err(GatewayError::PickerUnavailable(format!(
            "{program}: exited with status {code}"
        ))),
        None => Err(GatewayError::PickerUnavailable(format!(
            "{program}: terminated by signal"
        ))),
    }
}

/// Fire-and-forget opener: the spawned handler outlives this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOpener {
    program: String,
}

impl CommandOpener {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.opener_program.clone())
    }
}

impl Opener for CommandOpener {
    fn open(&mut self, target: &str) -> Result<(), GatewayError> {
        let mut command = Command::new(&self.program);
        command
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        detach(&mut command);

        // Dropping the child handle neither waits for nor kills it.
        command
            .spawn()
            .map(drop)
            .map_err(|error| GatewayError::OpenerStartFailed {
                program: self.program.clone(),
                message: error.to_string(),
            })
    }
}

#[cfg(unix)]
fn detach(command: &mut Command) {
    use std::os::unix::process::CommandExt;

    command.process_group(0);
}

#[cfg(not(unix))]
fn detach(_command: &mut Command) {}
