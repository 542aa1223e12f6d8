//! In-memory fakes for the tool runner (testing only)
//!
//! `RecordingRunner` answers every invocation from a scripted responder and
//! keeps the invocation together with the working directory it ran in.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::runner::{Invocation, ToolOutput, ToolRunner};

/// One call observed by [`RecordingRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub invocation: Invocation,
    pub cwd: PathBuf,
}

type Responder = Box<dyn Fn(&Invocation) -> ToolOutput + Send + Sync>;

/// Fake runner that never spawns a process.
pub struct RecordingRunner {
    calls: Mutex<Vec<RecordedCall>>,
    responder: Responder,
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RecordingRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingRunner")
            .field("calls", &self.calls)
            .finish_non_exhaustive()
    }
}

impl RecordingRunner {
    /// Every invocation succeeds with empty output.
    pub fn new() -> Self {
        Self::with_responder(|_| ToolOutput::success(""))
    }

    /// Answer invocations with `responder`.
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&Invocation) -> ToolOutput + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// `program arg..` lines of every call, in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.invocation.command_line())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ToolRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ToolOutput> {
        let cwd = std::env::current_dir()?;
        self.calls.lock().unwrap().push(RecordedCall {
            invocation: invocation.clone(),
            cwd,
        });
        Ok((self.responder)(invocation))
    }
}
