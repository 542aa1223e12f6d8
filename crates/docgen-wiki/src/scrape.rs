//! Status scraping from `Jamfile.v2` fragments.
//!
//! Accepted grammar, matched against the raw file text:
//!
//! * declaration: `tool`, whitespace, the tool name (not followed by a word
//!   character), then everything up to and including the next `;`
//! * status: `<status>` followed by zero or more word characters; the first
//!   occurrence inside the declaration wins
//! * capability: the literal `<squadt-connectivity>implemented`

use crate::table::ToolEntry;
use docgen_core::{DocgenError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Build file name inside each tool directory.
pub const BUILD_FILE: &str = "Jamfile.v2";

/// Status used when a declaration carries no `<status>` key.
pub const DEFAULT_STATUS: &str = "release";

const SQUADT_MARKER: &str = "<squadt-connectivity>implemented";

fn status_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<status>(\w*)").expect("status pattern is valid"))
}

/// What the scraper derives for one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolStatus {
    pub status: String,
    pub has_squadt: bool,
}

/// `<tools_dir>/<build dir>/Jamfile.v2` for `entry`.
pub fn build_file_path(tools_dir: &Path, entry: &ToolEntry) -> PathBuf {
    tools_dir.join(entry.build_dir()).join(BUILD_FILE)
}

/// The `tool <name> ... ;` block for `tool` in `fragment`.
pub fn extract_declaration<'a>(fragment: &'a str, tool: &str) -> Option<&'a str> {
    let pattern = Regex::new(&format!(r"tool\s+{}\b[^;]*;", regex::escape(tool))).ok()?;
    pattern.find(fragment).map(|m| m.as_str())
}

/// Derive status and capability from a declaration block.
pub fn scrape_status(declaration: &str) -> ToolStatus {
    let status = status_pattern()
        .captures(declaration)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_STATUS.to_string());

    ToolStatus {
        status,
        has_squadt: declaration.contains(SQUADT_MARKER),
    }
}

/// Read the tool's build file and scrape its declaration.
///
/// Fails when the build file or the declaration is missing.
pub fn scrape_tool(tools_dir: &Path, entry: &ToolEntry) -> Result<ToolStatus> {
    let path = build_file_path(tools_dir, entry);
    let fragment = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DocgenError::MissingBuildFile {
            tool: entry.name.clone(),
            path: path.clone(),
        },
        _ => DocgenError::Io(e),
    })?;

    let declaration =
        extract_declaration(&fragment, &entry.name).ok_or_else(|| DocgenError::MissingDeclaration {
            tool: entry.name.clone(),
            path: path.clone(),
        })?;

    Ok(scrape_status(declaration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Flag;

    const LPS2PBES_JAMFILE: &str = r#"
import mcrl2 ;

tool lps2pbes
  : lps2pbes.cpp
    ../../libraries/utilities//mcrl2_utilities
  : <include>include
    <squadt-connectivity>implemented
  ;

install install : lps2pbes ;
"#;

    const XSIM_JAMFILE: &str = r#"
tool xsim : xsim.cpp xsimmain.cpp : <status>experimental ;
tool sim : sim.cpp : <status>deprecated <squadt-connectivity>implemented ;
"#;

    fn entry(name: &str) -> ToolEntry {
        ToolEntry {
            name: name.to_string(),
            uses_tool_classes: Flag::Plus,
            has_regression_tests: Flag::Other("?".to_string()),
            not_using_libraries: Flag::Minus,
        }
    }

    #[test]
    fn test_extract_multiline_declaration() {
        let decl = extract_declaration(LPS2PBES_JAMFILE, "lps2pbes").unwrap();
        assert!(decl.starts_with("tool lps2pbes"));
        assert!(decl.ends_with(';'));
        assert!(decl.contains("<squadt-connectivity>implemented"));
        assert!(!decl.contains("install"));
    }

    #[test]
    fn test_default_status_is_release() {
        let decl = extract_declaration(LPS2PBES_JAMFILE, "lps2pbes").unwrap();
        let status = scrape_status(decl);
        assert_eq!(status.status, DEFAULT_STATUS);
        assert!(status.has_squadt);
    }

    #[test]
    fn test_status_from_own_declaration_only() {
        let xsim = scrape_status(extract_declaration(XSIM_JAMFILE, "xsim").unwrap());
        assert_eq!(xsim.status, "experimental");
        assert!(!xsim.has_squadt);

        let sim = scrape_status(extract_declaration(XSIM_JAMFILE, "sim").unwrap());
        assert_eq!(sim.status, "deprecated");
        assert!(sim.has_squadt);
    }

    #[test]
    fn test_name_prefix_does_not_match() {
        let fragment = "tool lps2lts_par : par.cpp ;\ntool lps2lts : lts.cpp : <status>beta ;";
        let decl = extract_declaration(fragment, "lps2lts").unwrap();
        assert_eq!(decl, "tool lps2lts : lts.cpp : <status>beta ;");
    }

    #[test]
    fn test_unterminated_declaration_not_found() {
        assert!(extract_declaration("tool lpsinfo : lpsinfo.cpp", "lpsinfo").is_none());
        assert!(extract_declaration("exe lpsinfo : lpsinfo.cpp ;", "lpsinfo").is_none());
    }

    #[test]
    fn test_empty_status_value() {
        let status = scrape_status("tool grape : grape.cpp : <status> ;");
        assert_eq!(status.status, "");
    }

    #[test]
    fn test_connectivity_marker_must_say_implemented() {
        let status = scrape_status("tool grape : grape.cpp : <squadt-connectivity>planned ;");
        assert!(!status.has_squadt);
    }

    #[test]
    fn test_build_file_path_uses_alias() {
        let path = build_file_path(Path::new("/trunk/tools"), &entry("sim"));
        assert_eq!(path, PathBuf::from("/trunk/tools/xsim/Jamfile.v2"));
        let path = build_file_path(Path::new("/trunk/tools"), &entry("lpsinfo"));
        assert_eq!(path, PathBuf::from("/trunk/tools/lpsinfo/Jamfile.v2"));
    }

    #[test]
    fn test_scrape_tool_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = scrape_tool(dir.path(), &entry("lpsinfo")).unwrap_err();
        assert!(matches!(err, DocgenError::MissingBuildFile { .. }));
    }

    #[test]
    fn test_scrape_tool_missing_declaration() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("lpsinfo")).unwrap();
        std::fs::write(dir.path().join("lpsinfo").join(BUILD_FILE), "exe other : a.cpp ;").unwrap();
        let err = scrape_tool(dir.path(), &entry("lpsinfo")).unwrap_err();
        assert!(matches!(err, DocgenError::MissingDeclaration { .. }));
    }
}
