//! Typesetting stage: LaTeX articles compiled to PDF plus `articles.rst`.

use crate::config::{DocLayout, Programs};
use crate::library::Library;
use crate::templates::TemplateSet;
use docgen_core::{call, Invocation, Result, ToolRunner, WorkdirGuard};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{info, warn};

fn title_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)\\title\{(.*?)\}").expect("title pattern is valid"))
}

/// Title of a LaTeX document, or `base` when there is no usable `\title{}`.
///
/// Multi-line titles are joined with spaces. Titles still containing `{` or
/// `\` after the first closing brace are markup we cannot render and fall
/// back to `base`.
pub fn extract_title(source: &str, base: &str) -> String {
    let Some(raw) = title_pattern()
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return base.to_string();
    };

    let title = raw.lines().collect::<Vec<_>>().join(" ");
    if title.contains('{') || title.contains('\\') || title.trim().is_empty() {
        base.to_string()
    } else {
        title
    }
}

/// How far compilation of a document got.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CompileOutcome {
    /// All passes succeeded.
    Complete,

    /// The PDF exists but the bibliography/cross-reference passes stopped at
    /// `step`; citations or references may be unresolved.
    Partial { step: String, error: String },
}

impl CompileOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, CompileOutcome::Complete)
    }
}

/// Compile `base.tex` in the current directory.
///
/// The first pdflatex pass must succeed. The bibtex pass and the two
/// pdflatex passes after it are best effort: the first failure among them
/// ends the sequence and is reported as [`CompileOutcome::Partial`].
pub async fn compile_document(
    runner: &dyn ToolRunner,
    programs: &Programs,
    base: &str,
) -> Result<CompileOutcome> {
    call(runner, &Invocation::new(&programs.pdflatex).arg(base)).await?;

    let passes = [&programs.bibtex, &programs.pdflatex, &programs.pdflatex];
    for program in passes {
        if let Err(e) = call(runner, &Invocation::new(program).arg(base)).await {
            warn!(document = %base, step = %program, error = %e, "Reference resolution incomplete");
            return Ok(CompileOutcome::Partial {
                step: program.clone(),
                error: e.to_string(),
            });
        }
    }

    Ok(CompileOutcome::Complete)
}

/// One compiled article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledDocument {
    pub base: String,
    pub title: String,
    pub outcome: CompileOutcome,
}

impl CompiledDocument {
    /// `:download:` line for the article index.
    pub fn index_entry(&self, lib: &Library) -> String {
        format!(
            ":download:`{} <libraries/{}/latex/{}.pdf>`",
            self.title, lib.dir, self.base
        )
    }
}

/// Articles compiled for one library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryArticles {
    pub library: String,
    pub documents: Vec<CompiledDocument>,
    pub index: PathBuf,
}

/// Render the `ARTICLES` bullet list.
pub fn article_list(entries: &[String]) -> String {
    entries
        .iter()
        .map(|entry| format!("* {entry}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Base names of `*.tex` files in `dir`, sorted.
fn tex_documents(dir: &Path) -> Result<Vec<String>> {
    let mut bases = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map(|e| e == "tex").unwrap_or(false) {
            if let Some(base) = path.file_stem().and_then(|s| s.to_str()) {
                bases.push(base.to_string());
            }
        }
    }
    bases.sort();
    Ok(bases)
}

/// Compile every article in the library's `latex/` directory and write
/// `articles.rst` next to it. Returns `None` when there is no such directory.
///
/// The tools run inside `latex/`; the previous working directory is restored
/// on every exit path.
pub async fn generate_library_pdf(
    runner: &dyn ToolRunner,
    programs: &Programs,
    templates: &TemplateSet,
    layout: &DocLayout,
    lib: &Library,
) -> Result<Option<LibraryArticles>> {
    let texdir = layout.latex_dir(lib);
    if !texdir.is_dir() {
        return Ok(None);
    }

    let _guard = WorkdirGuard::enter(&texdir)?;
    info!(library = %lib.dir, "Compiling LaTeX documents");

    let mut documents = Vec::new();
    for base in tex_documents(&texdir)? {
        let source = std::fs::read_to_string(texdir.join(format!("{base}.tex")))?;
        let title = extract_title(&source, &base);
        let outcome = compile_document(runner, programs, &base).await?;
        documents.push(CompiledDocument {
            base,
            title,
            outcome,
        });
    }

    let entries: Vec<String> = documents.iter().map(|d| d.index_entry(lib)).collect();
    let index = layout.article_index(&lib.dir);
    let values = BTreeMap::from([("ARTICLES", article_list(&entries))]);
    std::fs::write(&index, templates.articles.substitute(&values)?)?;
    info!(file = %index.display(), "Generated");

    Ok(Some(LibraryArticles {
        library: lib.dir.clone(),
        documents,
        index,
    }))
}
