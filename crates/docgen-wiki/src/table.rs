//! The hand-maintained tool table and its row model.

use docgen_core::{DocgenError, Result};
use serde::{Deserialize, Serialize};

/// Rows are `name | uses tool classes | has regression tests | not using libraries`.
///
/// Kept in sync with `tools/` by hand; a row naming a tool with no Jamfile
/// makes generation fail.
pub const TOOL_TABLE: &str = "
chi2mcrl2         | +               | ? | ? (Process Library)
diagraphica       | +               | ? | not applicable
formulacheck      | +               | ? | -
grape             | +               | ? | -
lps2lts           | +               | ? | -
lps2pbes          | +               | ? | +
lps2torx          | +               | ? | -
lpsactionrename   | +               | ? | +
lpsbinary         | +               | ? | +
lpsbisim2pbes     | +               | ? | +
lpsconfcheck      | +               | ? | +
lpsconstelm       | +               | ? | +
lpsinfo           | +               | ? | +
lpsinvelm         | +               | ? | +
lpsparelm         | +               | ? | +
lpsparunfold      | +               | ? | +
lpspp             | +               | ? | -
lpsrealelm        | +               | ? | +
lpsrewr           | +               | ? | +
lpssumelm         | +               | ? | +
lpssuminst        | +               | ? | +
lpsuntime         | +               | ? | +
ltscompare        | +               | ? | ?
ltsconvert        | +               | ? | ?
ltsgraph          | +               | ? | not applicable
ltsinfo           | +               | ? | ?
ltsmin            | +               | ? | ?
ltsview           | +               | ? | ?
lysa2mcrl2        | +               | ? | +
mcrl22lps         | +               | ? | +
mcrl2i            | +               | ? | +
pbes2bes          | +               | ? | +
pbes2bool         | +               | ? | +
pbesconstelm      | +               | ? | +
pbesinfo          | +               | ? | +
pbesparelm        | +               | ? | +
pbespareqelm      | +               | ? | +
pbespgsolve       | +               | ? | +
pbespp            | +               | ? | -
pbesrewr          | +               | ? | +
sim               | +               | ? | -
squadt            | +               | ? | not applicable
tbf2lps           | +               | ? | -
tracepp           | +               | ? | ?
txt2lps           | +               | ? | +
txt2pbes          | +               | ? | -
xsim              | +               | ? | -
";

/// Tools whose Jamfile lives under a different directory name.
const BUILD_DIR_ALIASES: &[(&str, &str)] = &[("sim", "xsim")];

/// A legend cell: `+`, `-`, or free text such as `?` or `not applicable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    Plus,
    Minus,
    Other(String),
}

impl Flag {
    pub fn parse(cell: &str) -> Self {
        match cell.trim() {
            "+" => Flag::Plus,
            "-" => Flag::Minus,
            other => Flag::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Flag::Plus => "+",
            Flag::Minus => "-",
            Flag::Other(text) => text,
        }
    }
}

/// One row of the tool table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    pub uses_tool_classes: Flag,
    pub has_regression_tests: Flag,
    pub not_using_libraries: Flag,
}

impl ToolEntry {
    /// Directory under `tools/` holding this tool's Jamfile.
    pub fn build_dir(&self) -> &str {
        BUILD_DIR_ALIASES
            .iter()
            .find(|(tool, _)| *tool == self.name)
            .map(|(_, dir)| *dir)
            .unwrap_or(self.name.as_str())
    }
}

/// Parse `|`-separated rows; blank lines are skipped.
pub fn parse_tool_table(text: &str) -> Result<Vec<ToolEntry>> {
    let mut entries = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split('|').map(str::trim).collect();
        if cells.len() != 4 {
            return Err(DocgenError::ToolTable {
                line: index + 1,
                reason: format!("expected 4 cells, found {}", cells.len()),
            });
        }
        if cells[0].is_empty() {
            return Err(DocgenError::ToolTable {
                line: index + 1,
                reason: "empty tool name".to_string(),
            });
        }

        entries.push(ToolEntry {
            name: cells[0].to_string(),
            uses_tool_classes: Flag::parse(cells[1]),
            has_regression_tests: Flag::parse(cells[2]),
            not_using_libraries: Flag::parse(cells[3]),
        });
    }

    Ok(entries)
}

/// The built-in table, parsed.
pub fn builtin_tools() -> Result<Vec<ToolEntry>> {
    parse_tool_table(TOOL_TABLE)
}
