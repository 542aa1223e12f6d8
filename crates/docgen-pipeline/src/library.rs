//! The set of documented libraries.

use serde::{Deserialize, Serialize};

/// Libraries documented by default, as `(directory, display name)`.
pub const LIBRARIES: &[(&str, &str)] = &[
    ("atermpp", "ATerm++"),
    ("core", "Core"),
    ("bes", "BES"),
    ("data", "Data"),
    ("lps", "LPS"),
    ("lts", "LTS"),
    ("pbes", "PBES"),
    ("process", "Process"),
    ("trace", "Trace"),
    ("utilities", "Utilities"),
];

/// A library under `libraries/<dir>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    /// Directory name under `libraries/`.
    pub dir: String,

    /// Name used as the Doxygen project name.
    pub name: String,
}

impl Library {
    pub fn new(dir: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }
}

/// [`LIBRARIES`] as owned records, in declaration order.
pub fn builtin_libraries() -> Vec<Library> {
    LIBRARIES
        .iter()
        .map(|(dir, name)| Library::new(*dir, *name))
        .collect()
}
