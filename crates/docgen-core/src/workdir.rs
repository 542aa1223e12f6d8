//! Scoped change of the process working directory.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Changes the working directory on creation and restores the previous one
/// when dropped, including during unwinding and early `?` returns.
///
/// The working directory is process-global: hold at most one guard at a time.
#[derive(Debug)]
#[must_use = "the previous directory is restored as soon as the guard is dropped"]
pub struct WorkdirGuard {
    previous: PathBuf,
}

impl WorkdirGuard {
    /// Enter `dir`, remembering the current directory.
    pub fn enter(dir: &Path) -> Result<Self> {
        let previous = std::env::current_dir()?;
        std::env::set_current_dir(dir)?;
        debug!(from = %previous.display(), to = %dir.display(), "Entered directory");
        Ok(Self { previous })
    }

    /// The directory that will be restored.
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkdirGuard {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            warn!(dir = %self.previous.display(), error = %e, "Failed to restore working directory");
        }
    }
}
