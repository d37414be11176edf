//! Process-execution capability
//!
//! The runner consumes this as a black box: hand it an [`Invocation`],
//! get back an exit code and the combined output streams. "Program not
//! found" is reported distinctly from "program ran and returned non-zero"
//! so the runner can escalate the former as fatal.

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};

use super::task::Invocation;

/// Exit code and captured output of one finished process
#[derive(Clone, Debug)]
pub struct ProcessOutput {
    /// The process exit code (0 = success)
    pub code: i32,
    /// Combined stdout and stderr, lossily decoded
    pub output: String,
}

/// Black-box capability executing one invocation to completion
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the invocation, blocking until the process exits
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput>;
}

/// Executes invocations as real system processes
///
/// Program names are resolved against the installed executables first;
/// an unresolvable name fails with
/// [`ExecutableNotFound`](crate::error::Error::ExecutableNotFound) before
/// anything is spawned.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemProcessRunner;

#[async_trait]
impl ProcessRunner for SystemProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        let program = invocation.program();
        let resolved = which::which(program).map_err(|source| Error::ExecutableNotFound {
            program: program.to_string(),
            source,
        })?;
        if resolved.as_os_str() != std::ffi::OsStr::new(program) {
            tracing::debug!(
                program,
                resolved = %resolved.display(),
                "replaced program name with installed executable"
            );
        }
        tracing::debug!(
            program,
            arguments = invocation.arguments().len(),
            "running process"
        );
        let output = Command::new(&resolved)
            .args(invocation.arguments())
            .output()
            .await?;
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        // A signal-terminated process has no code; treat it as failed
        let code = output.status.code().unwrap_or(-1);
        Ok(ProcessOutput {
            code,
            output: combined,
        })
    }
}
