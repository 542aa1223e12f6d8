//! Docgen Core
//!
//! Shared plumbing for the toolset documentation generators:
//! - `DocgenError` taxonomy and `Result` alias
//! - tracing initialisation for the binaries
//! - the `ToolRunner` seam over external programs (Doxygen, xsltproc, LaTeX)
//! - `$NAME` text templates and the scoped working-directory guard

pub mod error;
pub mod fakes;
pub mod runner;
pub mod telemetry;
pub mod template;
pub mod workdir;

pub use error::{DocgenError, Result};
pub use runner::{call, Invocation, ProcessRunner, ToolOutput, ToolRunner};
pub use telemetry::init_tracing;
pub use template::Template;
pub use workdir::WorkdirGuard;

/// Docgen version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
