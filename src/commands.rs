use crate::error::{ReleaseError, Result};
use crate::ui;
use regex::Regex;
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;

/// External process execution for publishers, changelog generators and
/// docs build tools.
///
/// Implementations:
/// - [ShellRunner]: spawns real processes
/// - [RecordingRunner]: records commands for testing
pub trait CommandRunner: Send + Sync {
    /// Run a command line to completion in the given working directory.
    /// A non-zero exit status is an error.
    fn run(&self, command: &str, cwd: &Path) -> Result<()>;
}

/// Split a command line into program and arguments, keeping quoted
/// segments together and stripping the surrounding quotes
pub fn split_command(command: &str) -> Vec<String> {
    let re = Regex::new(r#"'[^']*'|"[^"]*"|\S+"#).expect("command pattern is valid");
    re.find_iter(command)
        .map(|m| {
            let part = m.as_str();
            if (part.starts_with('\'') && part.ends_with('\'') && part.len() >= 2)
                || (part.starts_with('"') && part.ends_with('"') && part.len() >= 2)
            {
                part[1..part.len() - 1].to_string()
            } else {
                part.to_string()
            }
        })
        .collect()
}

/// [CommandRunner] that spawns the real process, logging its output
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, cwd: &Path) -> Result<()> {
        let parts = split_command(command);
        let (program, args) = parts
            .split_first()
            .ok_or_else(|| ReleaseError::command("Empty command".to_string()))?;

        ui::display_status(&format!("[{}] running: {}", program, command));

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| ReleaseError::command(format!("Failed to spawn {}: {}", program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            ui::display_status(&format!("[{}] stdout: {}", program, stdout.trim_end()));
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            ui::display_warning(&format!("[{}] stderr: {}", program, stderr.trim_end()));
        }

        if !output.status.success() {
            return Err(ReleaseError::command(format!(
                "{} exited with code {}",
                command,
                output.status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}

/// [CommandRunner] that records commands instead of running them.
///
/// Optionally fails when a command contains a configured marker, to exercise
/// step-failure paths.
#[derive(Default)]
pub struct RecordingRunner {
    commands: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any command whose text contains the marker
    pub fn failing_on(marker: impl Into<String>) -> Self {
        RecordingRunner {
            commands: Mutex::new(Vec::new()),
            fail_on: Some(marker.into()),
        }
    }

    /// Every command run so far, in order
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str, _cwd: &Path) -> Result<()> {
        self.commands.lock().unwrap().push(command.to_string());
        if let Some(marker) = &self.fail_on {
            if command.contains(marker.as_str()) {
                return Err(ReleaseError::command(format!(
                    "simulated failure for: {}",
                    command
                )));
            }
        }
        Ok(())
    }
}
