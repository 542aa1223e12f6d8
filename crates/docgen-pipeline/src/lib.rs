//! Docgen Pipeline - library reference documentation
//!
//! Drives the external documentation toolchain for every library:
//! - Doxygen extracts the public interface as XML
//! - xsltproc turns class and header compounds into reStructuredText pages
//! - pdflatex and bibtex compile the LaTeX articles shipped with a library
//!
//! Each stage is skipped when its output already exists.

pub mod config;
pub mod extract;
pub mod library;
pub mod pipeline;
pub mod templates;
pub mod transform;
pub mod typeset;

pub use config::{DocLayout, PipelineConfig, Programs};
pub use extract::{doxygen_values, generate_library_xml, LibraryXml};
pub use library::{builtin_libraries, Library, LIBRARIES};
pub use pipeline::{DocPipeline, PipelineReport, StageOutcome};
pub use templates::TemplateSet;
pub use transform::{classify, generate_library_rst, FragmentKind, LibraryReference};
pub use typeset::{
    article_list, compile_document, extract_title, generate_library_pdf, CompileOutcome,
    CompiledDocument, LibraryArticles,
};
