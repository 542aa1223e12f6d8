//! Transform stage: Doxygen compounds to reStructuredText via xsltproc.

use crate::config::{DocLayout, Programs};
use crate::library::Library;
use crate::templates::TemplateSet;
use docgen_core::{call, DocgenError, Invocation, Result, ToolRunner};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Kind of Doxygen compound that gets its own reference page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentKind {
    Class,
    Header,
}

/// Classify an XML file by its base name.
///
/// `class*` files are classes, except `classstd*` stubs for standard library
/// bases; `*_8h` files are headers. Everything else is ignored.
pub fn classify(base: &str) -> Option<FragmentKind> {
    if base.starts_with("class") && !base.starts_with("classstd") {
        Some(FragmentKind::Class)
    } else if base.ends_with("_8h") {
        Some(FragmentKind::Header)
    } else {
        None
    }
}

/// Reference pages generated for one library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryReference {
    pub library: String,
    pub classes: Vec<String>,
    pub headers: Vec<String>,
    pub index: PathBuf,
}

/// Base names of `*.xml` files in `xml_dir` except `index.xml`, sorted.
fn xml_fragments(xml_dir: &Path) -> Result<Vec<String>> {
    if !xml_dir.is_dir() {
        return Err(DocgenError::MissingSource(xml_dir.to_path_buf()));
    }

    let mut bases = Vec::new();
    for entry in std::fs::read_dir(xml_dir)? {
        let path = entry?.path();
        if path.extension().map(|e| e == "xml").unwrap_or(false) {
            if let Some(base) = path.file_stem().and_then(|s| s.to_str()) {
                if base != "index" {
                    bases.push(base.to_string());
                }
            }
        }
    }
    bases.sort();
    Ok(bases)
}

/// Run the stylesheet on one compound and write the result to `dst`.
pub async fn xsltproc(
    runner: &dyn ToolRunner,
    programs: &Programs,
    src: &Path,
    stylesheet: &Path,
    dst: &Path,
    xml_dir: &Path,
) -> Result<()> {
    let invocation = Invocation::new(&programs.xsltproc)
        .args(["--param", "dir"])
        .arg(format!("'{}'", xml_dir.display()))
        .arg(stylesheet.display().to_string())
        .arg(src.display().to_string());
    let rst = call(runner, &invocation).await?;
    std::fs::write(dst, rst)?;
    Ok(())
}

/// Transform every class and header compound of `lib`, then write its
/// `reference.rst`.
pub async fn generate_library_rst(
    runner: &dyn ToolRunner,
    programs: &Programs,
    templates: &TemplateSet,
    layout: &DocLayout,
    lib: &Library,
) -> Result<LibraryReference> {
    let xml_dir = layout.library_xml(lib);
    let rst_dir = layout.library_rst(lib);
    let stylesheet = layout.stylesheet();
    std::fs::create_dir_all(&rst_dir)?;

    let mut classes = Vec::new();
    let mut headers = Vec::new();

    for base in xml_fragments(&xml_dir)? {
        let Some(kind) = classify(&base) else {
            continue;
        };

        let src = xml_dir.join(format!("{base}.xml"));
        let dst = rst_dir.join(format!("{base}.rst"));
        xsltproc(runner, programs, &src, &stylesheet, &dst, &xml_dir).await?;
        info!(file = %dst.display(), "Generated");

        match kind {
            FragmentKind::Class => classes.push(base),
            FragmentKind::Header => headers.push(base),
        }
    }

    let index = layout.reference_index(&lib.dir);
    let values = BTreeMap::from([
        ("CLASSES", classes.join("\n   ")),
        ("FILES", headers.join("\n   ")),
    ]);
    std::fs::write(&index, templates.reference.substitute(&values)?)?;
    info!(file = %index.display(), "Generated");

    Ok(LibraryReference {
        library: lib.dir.clone(),
        classes,
        headers,
        index,
    })
}
