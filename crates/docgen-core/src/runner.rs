//! External tool invocation.
//!
//! Every Doxygen, xsltproc, pdflatex and bibtex call goes through the
//! [`ToolRunner`] trait so the pipeline can be driven against a fake in tests.

use crate::error::{DocgenError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, trace};

/// A single command line to run, with optional standard input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Executable name or path.
    pub program: String,

    /// Arguments passed verbatim.
    pub args: Vec<String>,

    /// Text fed to the child's stdin; stdin is closed when `None`.
    pub stdin: Option<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Program and arguments joined by spaces, for log lines.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code (0 = success, -1 when terminated by a signal).
    pub exit_code: i32,

    /// Captured stdout.
    pub stdout: String,

    /// Captured stderr.
    pub stderr: String,

    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl ToolOutput {
    /// A zero-exit output carrying `stdout`.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
            duration_ms: 0,
        }
    }

    /// A non-zero exit output carrying `stderr`.
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
            duration_ms: 0,
        }
    }

    pub fn passed(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout of a successful run, or [`DocgenError::ToolFailed`].
    pub fn into_stdout(self, tool: &str) -> Result<String> {
        if self.passed() {
            Ok(self.stdout)
        } else {
            Err(DocgenError::ToolFailed {
                tool: tool.to_string(),
                exit_code: self.exit_code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Backend that executes external tools.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run the invocation to completion.
    ///
    /// Returns `Err` only when the process could not be run at all; a
    /// non-zero exit is reported through [`ToolOutput::exit_code`].
    async fn run(&self, invocation: &Invocation) -> Result<ToolOutput>;
}

/// Run `invocation` and require a zero exit, returning its stdout.
pub async fn call(runner: &dyn ToolRunner, invocation: &Invocation) -> Result<String> {
    debug!(command = %invocation.command_line(), "Running external tool");
    runner
        .run(invocation)
        .await?
        .into_stdout(&invocation.program)
}

/// Runs invocations as child processes of the current process, inheriting
/// its working directory and environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ToolOutput> {
        let start = Instant::now();

        let stdin = if invocation.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        };

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| DocgenError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        // Feed stdin from a separate task so a chatty child cannot fill its
        // stdout pipe while we are still writing.
        let writer = match (child.stdin.take(), invocation.stdin.clone()) {
            (Some(mut pipe), Some(input)) => Some(tokio::spawn(async move {
                pipe.write_all(input.as_bytes()).await
            })),
            _ => None,
        };

        let output = child.wait_with_output().await?;

        if let Some(writer) = writer {
            match writer.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => debug!(program = %invocation.program, error = %e, "stdin closed early"),
                Err(e) => debug!(program = %invocation.program, error = %e, "stdin writer aborted"),
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        trace!(program = %invocation.program, exit_code, duration_ms, "External tool finished");

        Ok(ToolOutput {
            exit_code,
            stdout,
            stderr,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_joins_args() {
        let inv = Invocation::new("xsltproc")
            .args(["--param", "dir", "'/tmp/xml'"])
            .arg("compound.xsl");
        assert_eq!(inv.command_line(), "xsltproc --param dir '/tmp/xml' compound.xsl");
        assert!(inv.stdin.is_none());
    }

    #[test]
    fn test_into_stdout_success() {
        let out = ToolOutput::success("hello");
        assert_eq!(out.into_stdout("echo").unwrap(), "hello");
    }

    #[test]
    fn test_into_stdout_failure() {
        let out = ToolOutput::failure(2, "bad input\n");
        let err = out.into_stdout("bibtex").unwrap_err();
        match err {
            DocgenError::ToolFailed {
                tool,
                exit_code,
                stderr,
            } => {
                assert_eq!(tool, "bibtex");
                assert_eq!(exit_code, 2);
                assert_eq!(stderr, "bad input");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_process_runner_echo() {
        let out = ProcessRunner::new()
            .run(&Invocation::new("echo").arg("hello"))
            .await
            .expect("echo should run");
        assert!(out.passed());
        assert!(out.stdout.contains("hello"));
    }

    #[tokio::test]
    async fn test_process_runner_feeds_stdin() {
        let out = ProcessRunner::new()
            .run(&Invocation::new("cat").stdin("PROJECT_NAME = Data\n"))
            .await
            .expect("cat should run");
        assert_eq!(out.stdout, "PROJECT_NAME = Data\n");
    }

    #[tokio::test]
    async fn test_process_runner_reports_exit_code() {
        let out = ProcessRunner::new()
            .run(&Invocation::new("false"))
            .await
            .expect("false should run");
        assert!(!out.passed());
        assert_ne!(out.exit_code, 0);
    }

    #[tokio::test]
    async fn test_process_runner_missing_program() {
        let err = ProcessRunner::new()
            .run(&Invocation::new("docgen-no-such-program-xyz"))
            .await
            .unwrap_err();
        assert!(matches!(err, DocgenError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_call_propagates_failure() {
        let err = call(&ProcessRunner::new(), &Invocation::new("false"))
            .await
            .unwrap_err();
        assert!(matches!(err, DocgenError::ToolFailed { .. }));
    }
}
