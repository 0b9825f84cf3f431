//! Subprocess execution for the external `nmcli` tool.
//!
//! [`CommandRunner`] is the seam between the client and the operating
//! system: production code uses [`NmcliRunner`], tests substitute a
//! recording fake. Stdout and stderr are captured separately and read to
//! completion, so long error bodies are never truncated and pipe
//! descriptors are released on every path.

use crate::Result;
use async_trait::async_trait;
use tokio::process::Command;

/// Name of the external tool binary, resolved through `PATH`.
pub const TOOL: &str = "nmcli";

/// Captured result of one tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Whether the process exited with status zero.
    pub success: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs the tool once with `args` and waits for it to exit.
    async fn run(&self, args: &[String]) -> Result<ToolOutput>;
}

/// Runs the real `nmcli` binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct NmcliRunner;

#[async_trait]
impl CommandRunner for NmcliRunner {
    async fn run(&self, args: &[String]) -> Result<ToolOutput> {
        tracing::debug!(tool = TOOL, ?args, "spawning");
        let output = Command::new(TOOL).args(args).output().await?;
        if !output.status.success() {
            tracing::warn!(tool = TOOL, status = ?output.status.code(), "tool exited non-zero");
        }
        Ok(ToolOutput {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
