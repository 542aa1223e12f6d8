//! Extraction stage: Doxygen XML for each library.

use crate::config::{DocLayout, Programs};
use crate::library::Library;
use crate::templates::TemplateSet;
use docgen_core::{call, Invocation, Result, ToolRunner};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

/// XML produced for one library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryXml {
    pub library: String,
    pub xml_dir: PathBuf,
}

/// Values substituted into the Doxygen template for `lib`.
pub fn doxygen_values(layout: &DocLayout, lib: &Library) -> BTreeMap<&'static str, String> {
    let lib_path = layout.library_source(lib);
    let lib_str = lib_path.display().to_string();

    BTreeMap::from([
        (
            "INPUT",
            format!("{0}/include {0}/source {0}/doc/Mainpage", lib_str),
        ),
        ("PROJECT_NAME", lib.name.clone()),
        ("PROJECT_NUMBER", "unknown".to_string()),
        ("STRIP_FROM_PATH", lib_str.clone()),
        (
            "STRIP_FROM_INC_PATH",
            format!(
                "{} {}",
                lib_path.join("include").display(),
                lib_path.join("source").display()
            ),
        ),
        ("XML_OUTPUT", layout.library_xml(lib).display().to_string()),
    ])
}

/// Run Doxygen for one library with the generated configuration on stdin.
pub async fn generate_library_xml(
    runner: &dyn ToolRunner,
    programs: &Programs,
    templates: &TemplateSet,
    layout: &DocLayout,
    lib: &Library,
) -> Result<LibraryXml> {
    let lib_path = layout.library_source(lib);
    info!(library = %lib.name, "Generating XML");
    info!(library = %lib.name, path = %lib_path.display(), "Library sources located");

    let xml_dir = layout.library_xml(lib);
    std::fs::create_dir_all(&xml_dir)?;

    let config = templates.doxygen.substitute(&doxygen_values(layout, lib))?;
    let invocation = Invocation::new(&programs.doxygen).arg("-").stdin(config);
    call(runner, &invocation).await?;

    Ok(LibraryXml {
        library: lib.dir.clone(),
        xml_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use docgen_core::fakes::RecordingRunner;
    use docgen_core::{DocgenError, ToolOutput};

    #[test]
    fn test_doxygen_values() {
        let layout = PipelineConfig::for_trunk("/trunk").layout().unwrap();
        let values = doxygen_values(&layout, &Library::new("data", "Data"));
        assert_eq!(
            values["INPUT"],
            "/trunk/libraries/data/include /trunk/libraries/data/source /trunk/libraries/data/doc/Mainpage"
        );
        assert_eq!(values["PROJECT_NAME"], "Data");
        assert_eq!(values["PROJECT_NUMBER"], "unknown");
        assert_eq!(values["STRIP_FROM_PATH"], "/trunk/libraries/data");
        assert_eq!(
            values["STRIP_FROM_INC_PATH"],
            "/trunk/libraries/data/include /trunk/libraries/data/source"
        );
        assert_eq!(values["XML_OUTPUT"], "/trunk/doc/sphinx/_temp/xml/libraries/data");
    }

    #[tokio::test]
    async fn test_generate_library_xml_feeds_config() {
        let dir = tempfile::tempdir().unwrap();
        let layout = PipelineConfig::for_trunk(dir.path()).layout().unwrap();
        let runner = RecordingRunner::new();
        let lib = Library::new("lts", "LTS");

        let xml = generate_library_xml(
            &runner,
            &Programs::default(),
            &TemplateSet::builtin(),
            &layout,
            &lib,
        )
        .await
        .unwrap();

        assert!(xml.xml_dir.is_dir());
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].invocation.command_line(), "doxygen -");
        let stdin = calls[0].invocation.stdin.as_deref().unwrap();
        assert!(stdin.contains("PROJECT_NAME           = \"LTS\""));
        assert!(stdin.contains(&format!("XML_OUTPUT             = {}", xml.xml_dir.display())));
    }

    #[tokio::test]
    async fn test_doxygen_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let layout = PipelineConfig::for_trunk(dir.path()).layout().unwrap();
        let runner = RecordingRunner::with_responder(|_| ToolOutput::failure(1, "error: no input"));

        let err = generate_library_xml(
            &runner,
            &Programs::default(),
            &TemplateSet::builtin(),
            &layout,
            &Library::new("lts", "LTS"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DocgenError::ToolFailed { .. }));
    }
}
