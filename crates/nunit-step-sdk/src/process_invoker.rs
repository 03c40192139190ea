use crate::trace::TraceWriter;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::Command;

/// Error type for non-zero process exit codes.
#[derive(Debug, thiserror::Error)]
#[error("Exit code {exit_code} returned from process: file name '{file_name}', arguments '{arguments}'.")]
pub struct ProcessExitCodeError {
    pub exit_code: i32,
    pub file_name: String,
    pub arguments: String,
}

/// Everything needed to start one child process.
#[derive(Debug, Clone, Default)]
pub struct ProcessRequest {
    /// The executable to run.
    pub file_name: PathBuf,
    /// Arguments, passed to the child verbatim (no shell involved).
    pub arguments: Vec<String>,
    /// Text written to the child's stdin, which is closed afterwards.
    /// When `None` the child gets a null stdin.
    pub stdin: Option<String>,
    /// Return an error for a non-zero exit code.
    pub require_exit_code_zero: bool,
}

impl ProcessRequest {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    pub fn args<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn require_exit_code_zero(mut self) -> Self {
        self.require_exit_code_zero = true;
        self
    }

    /// The arguments as one shell-quoted string.
    pub fn arguments_line(&self) -> String {
        shell_words::join(&self.arguments)
    }

    /// The full command as a user would type it into a shell.
    pub fn command_line(&self) -> String {
        let file_name = self.file_name.to_string_lossy();
        if self.arguments.is_empty() {
            shell_words::quote(&file_name).into_owned()
        } else {
            format!("{} {}", shell_words::quote(&file_name), self.arguments_line())
        }
    }
}

/// Spawns a child process, streams its stdout/stderr line by line into the
/// trace writer and waits for it to exit.
///
/// There is no timeout and no cancellation: the caller blocks until the child
/// is done.
pub struct ProcessInvoker {
    trace: Arc<dyn TraceWriter>,
}

impl ProcessInvoker {
    /// Create a new `ProcessInvoker` with the given trace writer.
    pub fn new(trace: Arc<dyn TraceWriter>) -> Self {
        Self { trace }
    }

    /// Execute a process and return its exit code.
    ///
    /// A child killed by a signal reports exit code `-1`.
    pub async fn execute(&self, request: &ProcessRequest) -> Result<i32> {
        let file_name = request.file_name.to_string_lossy().into_owned();
        anyhow::ensure!(!file_name.is_empty(), "file_name must not be empty");
        let arguments = request.arguments_line();

        self.trace.verbose("Starting process:");
        self.trace.verbose(&format!("  File name: '{file_name}'"));
        self.trace.verbose(&format!("  Arguments: '{arguments}'"));
        self.trace.verbose(&format!(
            "  Require exit code zero: '{}'",
            request.require_exit_code_zero
        ));

        let mut cmd = Command::new(&request.file_name);
        cmd.args(&request.arguments);

        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.stdin(if request.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        let start = std::time::Instant::now();
        let mut child = cmd.spawn().with_context(|| {
            format!("Failed to start process '{file_name}' with arguments '{arguments}'")
        })?;

        let pid = child.id().unwrap_or(0);
        self.trace
            .verbose(&format!("Process started with process id {pid}, waiting for process exit."));

        let stdin_pipe = child.stdin.take();
        let stdin_text = request.stdin.clone();
        let feed_stdin = async move {
            if let (Some(mut pipe), Some(text)) = (stdin_pipe, stdin_text) {
                pipe.write_all(text.as_bytes()).await?;
                pipe.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        };

        // The pipes are drained on this task; nothing is spawned.
        let (stdin_result, (), ()) = tokio::join!(
            feed_stdin,
            self.forward_lines(child.stdout.take(), "STDOUT"),
            self.forward_lines(child.stderr.take(), "STDERR"),
        );
        if let Err(e) = stdin_result {
            self.trace
                .warning(&format!("Failed to write stdin of process {pid}: {e}"));
        }

        let status = child
            .wait()
            .await
            .context("Failed to wait for process")?;
        let exit_code = status.code().unwrap_or(-1);

        let elapsed = start.elapsed();
        self.trace.verbose(&format!(
            "Finished process {pid} with exit code {exit_code}, and elapsed time {elapsed:.2?}."
        ));

        if exit_code != 0 && request.require_exit_code_zero {
            return Err(ProcessExitCodeError {
                exit_code,
                file_name,
                arguments,
            }
            .into());
        }

        Ok(exit_code)
    }

    async fn forward_lines<R>(&self, stream: Option<R>, name: &str)
    where
        R: AsyncRead + Unpin,
    {
        let Some(stream) = stream else {
            return;
        };
        // Decoded lossily; the pipe is always drained to EOF.
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    self.trace.info(line.trim_end_matches(['\n', '\r']));
                }
                Err(e) => {
                    self.trace
                        .warning(&format!("Failed to read {name} stream: {e}"));
                    break;
                }
            }
        }
        self.trace.verbose(&format!("{name} stream read finished."));
    }
}
