//! Error taxonomy shared by the documentation generators.

use std::path::PathBuf;

/// Errors produced while scraping build metadata or driving external tools.
#[derive(Debug, thiserror::Error)]
pub enum DocgenError {
    #[error("build file for tool {tool} not found at {}", path.display())]
    MissingBuildFile { tool: String, path: PathBuf },

    #[error("no `tool {tool}` declaration in {}", path.display())]
    MissingDeclaration { tool: String, path: PathBuf },

    #[error("expected source directory missing: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("malformed tool table row {line}: {reason}")]
    ToolTable { line: usize, reason: String },

    #[error("template error: {0}")]
    Template(String),

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with code {exit_code}: {stderr}")]
    ToolFailed {
        tool: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for documentation generator operations.
pub type Result<T> = std::result::Result<T, DocgenError>;
