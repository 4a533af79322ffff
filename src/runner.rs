//! Process spawning seam.
//!
//! [`CommandRunner`] decouples the format task from real process execution.
//! Tests plug in a scripted runner that records invocations and returns
//! predetermined exit statuses.

use std::io;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

/// A single external command, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub workdir: PathBuf,
}

impl Invocation {
    /// Shell-like rendering for progress output and dry runs.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// How a finished process exited. `code` is `None` when it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    pub code: Option<i32>,
}

impl ExitStatus {
    pub const SUCCESS: Self = Self { code: Some(0) };

    pub const fn success(self) -> bool {
        matches!(self.code, Some(0))
    }
}

pub trait CommandRunner {
    /// Run the invocation to completion. `Err` means it could not be started.
    fn run(&mut self, invocation: &Invocation) -> io::Result<ExitStatus>;
}

/// Spawns real processes. stdout and stderr are inherited so tool
/// diagnostics reach the terminal untouched.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<ExitStatus> {
        debug!(workdir = %invocation.workdir.display(), command = %invocation.command_line(), "spawning");
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.workdir)
            .status()?;
        debug!(code = ?status.code(), "process exited");
        Ok(ExitStatus { code: status.code() })
    }
}
