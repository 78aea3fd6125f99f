//! Command execution tool: execute_shell_command
//!
//! The command line goes through the blocklist first; a blocked command is
//! never spawned. Allowed commands run through the platform shell with the
//! current base directory as cwd. stdout and stderr are drained by two
//! independent reader tasks and joined once both streams close.
//!
//! On Unix the shell is started in its own process group so cancellation can
//! take down everything it spawned, not just the shell itself.

use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use toolpilot_domain::tool::{
    EXECUTE_SHELL_COMMAND,
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use toolpilot_domain::{BaseDirectory, CommandBlocklist};
use tracing::{debug, info, warn};

/// The program (and leading arguments) a command line is handed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    program: String,
    args: Vec<String>,
}

impl ShellCommand {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `sh -c` on Unix, `powershell.exe -NoProfile -Command` on Windows.
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            Self::new("powershell.exe", ["-NoProfile", "-Command"])
        } else {
            Self::new("sh", ["-c"])
        }
    }

    /// Parse a whitespace-separated override such as `"bash -c"`.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut parts = spec.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program, parts))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, command_line: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(command_line);
        cmd
    }
}

impl Default for ShellCommand {
    fn default() -> Self {
        Self::platform_default()
    }
}

/// Exit status and captured output of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// `None` when the process was ended by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Text handed to the reasoning engine. Empty sections are omitted.
    pub fn render(&self) -> String {
        let mut out = String::from(if self.success() {
            "Command succeeded:\n"
        } else {
            "Command failed:\n"
        });

        match self.exit_code {
            Some(code) => out.push_str(&format!("Exit code: {}\n", code)),
            None => out.push_str("Exit code: none (terminated by signal)\n"),
        }

        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            out.push_str(&format!("STDOUT:\n{}\n", stdout));
        }
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            out.push_str(&format!("STDERR:\n{}\n", stderr));
        }

        out.truncate(out.trim_end().len());
        out
    }
}

/// Execute the execute_shell_command tool
pub async fn execute_shell_command(
    base: &BaseDirectory,
    blocklist: &CommandBlocklist,
    shell: &ShellCommand,
    command_line: &str,
    cancel: &CancellationToken,
) -> ToolResult {
    let start = Instant::now();

    if let Err(e) = blocklist.check(command_line) {
        warn!("Blocked shell command: {}", command_line);
        return ToolResult::failure(EXECUTE_SHELL_COMMAND, e.into());
    }

    let cwd = base.current();
    info!("Running shell command in {}: {}", cwd.display(), command_line);

    let mut cmd = shell.command(command_line);
    cmd.current_dir(&cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    #[cfg(unix)]
    cmd.process_group(0);

    // Linux: request kernel to send SIGTERM to child when parent dies.
    #[cfg(target_os = "linux")]
    unsafe {
        cmd.pre_exec(|| {
            libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
            Ok(())
        });
    }

    let child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            return ToolResult::failure(
                EXECUTE_SHELL_COMMAND,
                ToolError::execution_failed(format!("Failed to launch command: {}", e)),
            );
        }
    };

    let outcome = match wait_for_exit(child, cancel).await {
        Ok(Some(outcome)) => outcome,
        Ok(None) => {
            warn!("Shell command canceled: {}", command_line);
            return ToolResult::failure(EXECUTE_SHELL_COMMAND, ToolError::canceled())
                .with_duration(start.elapsed().as_millis() as u64);
        }
        Err(e) => {
            return ToolResult::failure(
                EXECUTE_SHELL_COMMAND,
                ToolError::execution_failed(format!("Failed to wait for command: {}", e)),
            );
        }
    };

    debug!(
        "Shell command exited with {:?} ({} bytes stdout, {} bytes stderr)",
        outcome.exit_code,
        outcome.stdout.len(),
        outcome.stderr.len()
    );

    let output = outcome.render();
    let metadata = ToolResultMetadata {
        duration_ms: Some(start.elapsed().as_millis() as u64),
        bytes: Some(outcome.stdout.len() + outcome.stderr.len()),
        exit_code: outcome.exit_code,
        ..Default::default()
    };

    // A non-zero exit is still a completed tool call; the engine reads the
    // header and decides what to do.
    ToolResult::success(EXECUTE_SHELL_COMMAND, output).with_metadata(metadata)
}

/// Wait for `child` to exit while draining its output.
///
/// Returns `Ok(None)` if `cancel` fired first; the process (group) has been
/// killed by then. The token is watched until both streams are closed, since
/// a backgrounded grandchild can hold the pipes open after the shell exits.
async fn wait_for_exit(
    mut child: Child,
    cancel: &CancellationToken,
) -> std::io::Result<Option<ProcessOutcome>> {
    // Captured up front: `Child::id` is gone once the shell is reaped, but
    // the group outlives its leader while any member is running.
    let group = child.id();
    let stdout_task = drain(child.stdout.take());
    let stderr_task = drain(child.stderr.take());
    let stdout_abort = stdout_task.abort_handle();
    let stderr_abort = stderr_task.abort_handle();

    let status = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            terminate(group, &mut child);
            let _ = child.wait().await;
            stdout_abort.abort();
            stderr_abort.abort();
            return Ok(None);
        }
        status = child.wait() => status?,
    };

    let (stdout, stderr) = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Canceled while output pipes were still open after shell exit");
            terminate(group, &mut child);
            stdout_abort.abort();
            stderr_abort.abort();
            return Ok(None);
        }
        streams = async { tokio::join!(stdout_task, stderr_task) } => streams,
    };

    Ok(Some(ProcessOutcome {
        exit_code: status.code(),
        stdout: String::from_utf8_lossy(&stdout.unwrap_or_default()).into_owned(),
        stderr: String::from_utf8_lossy(&stderr.unwrap_or_default()).into_owned(),
    }))
}

/// Read a stream to the end on its own task.
fn drain<R>(reader: Option<R>) -> JoinHandle<Vec<u8>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut reader) = reader
            && let Err(e) = reader.read_to_end(&mut buf).await
        {
            debug!("Output stream closed with error: {}", e);
        }
        buf
    })
}

#[cfg(unix)]
fn terminate(group: Option<u32>, child: &mut Child) {
    if let Some(pgid) = group {
        // The shell leads its own group (process_group(0)), so its pid is
        // the group id.
        let rc = unsafe { libc::killpg(pgid as libc::pid_t, libc::SIGKILL) };
        if rc != 0 {
            debug!(
                "killpg({}) failed: {}",
                pgid,
                std::io::Error::last_os_error()
            );
        }
    }
    let _ = child.start_kill();
}

#[cfg(not(unix))]
fn terminate(_group: Option<u32>, child: &mut Child) {
    let _ = child.start_kill();
}
