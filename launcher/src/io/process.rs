//! Running engine invocations as foreground child processes.
//!
//! The [`CommandRunner`] trait decouples launch orchestration from process
//! spawning. Tests use a recording runner that returns scripted exit codes.

use std::path::Path;
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};
use tracing::{debug, error, instrument};

use crate::core::plan::Invocation;
use crate::exit_codes;

/// Abstraction over how invocations are executed.
pub trait CommandRunner {
    /// Run `invocation` in `workdir` and wait for it, returning its exit code.
    fn run(&self, invocation: &Invocation, workdir: &Path) -> Result<i32>;
}

/// Runner that spawns real processes with inherited stdio.
///
/// The container is interactive, so stdin/stdout/stderr are passed through
/// untouched and nothing is captured.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(program = %invocation.program.display()))]
    fn run(&self, invocation: &Invocation, workdir: &Path) -> Result<i32> {
        debug!(args = ?invocation.args, "spawning child process");
        let mut child = match Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(workdir)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                error!(err = %e, "failed to spawn command");
                return Err(e).with_context(|| format!("spawn {}", invocation.program.display()));
            }
        };

        let status = child
            .wait()
            .with_context(|| format!("wait for {}", invocation.program.display()))?;
        let code = exit_code(status);
        debug!(exit_code = code, "command finished");
        Ok(code)
    }
}

/// Map an exit status to a shell-style exit code.
///
/// A child killed by a signal reports `128 + signal`, like a POSIX shell.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return exit_codes::SIGNAL_BASE + signal;
        }
    }
    exit_codes::INVALID
}
