//! Pipeline configuration and the derived documentation tree layout.

use crate::library::{builtin_libraries, Library};
use docgen_core::{DocgenError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Names (or paths) of the external programs the pipeline drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Programs {
    pub doxygen: String,
    pub xsltproc: String,
    pub pdflatex: String,
    pub bibtex: String,
}

impl Default for Programs {
    fn default() -> Self {
        Self {
            doxygen: "doxygen".to_string(),
            xsltproc: "xsltproc".to_string(),
            pdflatex: "pdflatex".to_string(),
            bibtex: "bibtex".to_string(),
        }
    }
}

/// Pipeline configuration, usually read from a TOML file.
///
/// Relative paths are resolved against `trunk`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Root of the source tree (contains `libraries/` and `doc/`).
    pub trunk: PathBuf,

    /// Doxygen XML output root.
    pub xml_dir: Option<PathBuf>,

    /// reStructuredText output root.
    pub rst_dir: Option<PathBuf>,

    /// Directory holding `compound.xsl` and template overrides.
    pub source_dir: Option<PathBuf>,

    /// Library whose `reference.rst` marks the transform stage as done.
    pub reference_marker: String,

    /// Library whose `articles.rst` marks the typesetting stage as done.
    pub article_marker: String,

    pub programs: Programs,

    /// Replaces the built-in library table when set.
    pub libraries: Option<Vec<Library>>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            trunk: PathBuf::from("."),
            xml_dir: None,
            rst_dir: None,
            source_dir: None,
            reference_marker: "atermpp".to_string(),
            article_marker: "pbes".to_string(),
            programs: Programs::default(),
            libraries: None,
        }
    }
}

impl PipelineConfig {
    /// Defaults rooted at `trunk`.
    pub fn for_trunk(trunk: impl Into<PathBuf>) -> Self {
        Self {
            trunk: trunk.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| DocgenError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| DocgenError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn libraries(&self) -> Vec<Library> {
        self.libraries.clone().unwrap_or_else(builtin_libraries)
    }

    /// Resolve the tree layout. A relative trunk is anchored at the current
    /// directory so paths stay valid while the typesetting stage changes it.
    pub fn layout(&self) -> Result<DocLayout> {
        let trunk = if self.trunk.is_absolute() {
            self.trunk.clone()
        } else {
            std::env::current_dir()?.join(&self.trunk)
        };

        let resolve = |custom: &Option<PathBuf>, default: &[&str]| match custom {
            Some(path) => trunk.join(path),
            None => default.iter().fold(trunk.clone(), |p, part| p.join(part)),
        };

        Ok(DocLayout {
            xml_root: resolve(&self.xml_dir, &["doc", "sphinx", "_temp", "xml"]),
            rst_root: resolve(
                &self.rst_dir,
                &["doc", "sphinx", "_temp", "rst", "developer_manual"],
            ),
            source_dir: resolve(
                &self.source_dir,
                &["doc", "sphinx", "source", "developer_manual", "libraries"],
            ),
            trunk,
        })
    }
}

/// File system locations used by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocLayout {
    pub trunk: PathBuf,
    pub xml_root: PathBuf,
    pub rst_root: PathBuf,
    pub source_dir: PathBuf,
}

impl DocLayout {
    /// `libraries/<dir>` in the source tree.
    pub fn library_source(&self, lib: &Library) -> PathBuf {
        self.trunk.join("libraries").join(&lib.dir)
    }

    pub fn library_xml(&self, lib: &Library) -> PathBuf {
        self.xml_root.join("libraries").join(&lib.dir)
    }

    pub fn library_rst(&self, lib: &Library) -> PathBuf {
        self.rst_root.join("libraries").join(&lib.dir)
    }

    pub fn latex_dir(&self, lib: &Library) -> PathBuf {
        self.library_rst(lib).join("latex")
    }

    pub fn reference_index(&self, dir: &str) -> PathBuf {
        self.rst_root.join("libraries").join(dir).join("reference.rst")
    }

    pub fn article_index(&self, dir: &str) -> PathBuf {
        self.rst_root.join("libraries").join(dir).join("articles.rst")
    }

    /// Stylesheet turning a Doxygen compound into reStructuredText.
    pub fn stylesheet(&self) -> PathBuf {
        self.source_dir.join("compound.xsl")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = PipelineConfig::for_trunk("/trunk").layout().unwrap();
        assert_eq!(layout.xml_root, PathBuf::from("/trunk/doc/sphinx/_temp/xml"));
        assert_eq!(
            layout.rst_root,
            PathBuf::from("/trunk/doc/sphinx/_temp/rst/developer_manual")
        );
        assert_eq!(
            layout.stylesheet(),
            PathBuf::from("/trunk/doc/sphinx/source/developer_manual/libraries/compound.xsl")
        );
    }

    #[test]
    fn test_library_paths() {
        let layout = PipelineConfig::for_trunk("/trunk").layout().unwrap();
        let lps = Library::new("lps", "LPS");
        assert_eq!(layout.library_source(&lps), PathBuf::from("/trunk/libraries/lps"));
        assert_eq!(
            layout.library_xml(&lps),
            PathBuf::from("/trunk/doc/sphinx/_temp/xml/libraries/lps")
        );
        assert_eq!(
            layout.latex_dir(&lps),
            PathBuf::from("/trunk/doc/sphinx/_temp/rst/developer_manual/libraries/lps/latex")
        );
        assert_eq!(
            layout.article_index("pbes"),
            PathBuf::from("/trunk/doc/sphinx/_temp/rst/developer_manual/libraries/pbes/articles.rst")
        );
    }

    #[test]
    fn test_relative_trunk_is_anchored() {
        let layout = PipelineConfig::for_trunk("src-tree").layout().unwrap();
        assert!(layout.trunk.is_absolute());
        assert!(layout.xml_root.is_absolute());
    }

    #[test]
    fn test_toml_overrides() {
        let config = PipelineConfig::from_toml_str(
            r#"
trunk = "/work/trunk"
xml_dir = "build/xml"

[programs]
pdflatex = "/usr/local/texlive/bin/pdflatex"

[[libraries]]
dir = "lps"
name = "LPS"
"#,
        )
        .unwrap();

        assert_eq!(config.programs.pdflatex, "/usr/local/texlive/bin/pdflatex");
        assert_eq!(config.programs.bibtex, "bibtex");
        assert_eq!(config.libraries(), vec![Library::new("lps", "LPS")]);
        assert_eq!(config.reference_marker, "atermpp");

        let layout = config.layout().unwrap();
        assert_eq!(layout.xml_root, PathBuf::from("/work/trunk/build/xml"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = PipelineConfig::from_toml_str("trunc = \"/x\"").unwrap_err();
        assert!(matches!(err, DocgenError::Config(_)));
    }

    #[test]
    fn test_default_libraries() {
        assert_eq!(PipelineConfig::default().libraries(), builtin_libraries());
    }
}
