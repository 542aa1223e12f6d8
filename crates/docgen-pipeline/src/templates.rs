//! Doxygen configuration and index page templates.
//!
//! Built-in copies are compiled in; a file with the same name in the
//! configured source directory takes precedence.

use docgen_core::{Result, Template};
use std::path::Path;
use tracing::debug;

pub const DOXYGEN_TEMPLATE: &str = "doxy.template";
pub const REFERENCE_TEMPLATE: &str = "reference.rst.template";
pub const ARTICLES_TEMPLATE: &str = "articles.rst.template";

const BUILTIN_DOXYGEN: &str = include_str!("../templates/doxy.template");
const BUILTIN_REFERENCE: &str = include_str!("../templates/reference.rst.template");
const BUILTIN_ARTICLES: &str = include_str!("../templates/articles.rst.template");

/// The three templates used by the pipeline.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    /// Doxygen configuration; placeholders `INPUT`, `PROJECT_NAME`,
    /// `PROJECT_NUMBER`, `STRIP_FROM_PATH`, `STRIP_FROM_INC_PATH`, `XML_OUTPUT`.
    pub doxygen: Template,

    /// `reference.rst`; placeholders `CLASSES`, `FILES`.
    pub reference: Template,

    /// `articles.rst`; placeholder `ARTICLES`.
    pub articles: Template,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateSet {
    pub fn builtin() -> Self {
        Self {
            doxygen: Template::new(DOXYGEN_TEMPLATE, BUILTIN_DOXYGEN),
            reference: Template::new(REFERENCE_TEMPLATE, BUILTIN_REFERENCE),
            articles: Template::new(ARTICLES_TEMPLATE, BUILTIN_ARTICLES),
        }
    }

    /// Built-in templates, each replaced by `<dir>/<name>` when that file exists.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            doxygen: load_one(dir, DOXYGEN_TEMPLATE, BUILTIN_DOXYGEN)?,
            reference: load_one(dir, REFERENCE_TEMPLATE, BUILTIN_REFERENCE)?,
            articles: load_one(dir, ARTICLES_TEMPLATE, BUILTIN_ARTICLES)?,
        })
    }
}

fn load_one(dir: &Path, name: &str, builtin: &str) -> Result<Template> {
    let path = dir.join(name);
    if path.is_file() {
        debug!(template = %path.display(), "Using template override");
        Ok(Template::new(name, std::fs::read_to_string(&path)?))
    } else {
        Ok(Template::new(name, builtin))
    }
}
