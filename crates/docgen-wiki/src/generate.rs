//! End-to-end tool table generation.

use crate::render::render_table;
use crate::scrape::{scrape_tool, ToolStatus};
use crate::table::ToolEntry;
use docgen_core::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default output location, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "output/Tool_Status_Overview";

/// A tool row together with its scraped status.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapedTool {
    pub entry: ToolEntry,
    pub status: ToolStatus,
}

/// Result of a tool table run.
#[derive(Debug, Clone, Serialize)]
pub struct ToolTableReport {
    /// File the table was written to.
    pub output: PathBuf,

    /// Rows in table order.
    pub tools: Vec<ScrapedTool>,
}

impl ToolTableReport {
    /// Number of tools reporting squadt connectivity.
    pub fn squadt_count(&self) -> usize {
        self.tools.iter().filter(|t| t.status.has_squadt).count()
    }

    /// Tools whose status is not the default.
    pub fn non_release(&self) -> impl Iterator<Item = &ScrapedTool> {
        self.tools
            .iter()
            .filter(|t| t.status.status != crate::scrape::DEFAULT_STATUS)
    }
}

/// Scrape every tool, then render and write the table.
///
/// Nothing is written unless every tool scrapes successfully.
pub fn generate(tools_dir: &Path, entries: &[ToolEntry], output: &Path) -> Result<ToolTableReport> {
    info!(tools_dir = %tools_dir.display(), count = entries.len(), "Scraping tool build files");

    let mut tools = Vec::with_capacity(entries.len());
    for entry in entries {
        let status = scrape_tool(tools_dir, entry)?;
        debug!(tool = %entry.name, status = %status.status, squadt = status.has_squadt, "Scraped tool");
        tools.push(ScrapedTool {
            entry: entry.clone(),
            status,
        });
    }

    let text = render_table(tools.iter().map(|t| (&t.entry, &t.status)));

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, text)?;
    info!(output = %output.display(), "Generated tool table");

    Ok(ToolTableReport {
        output: output.to_path_buf(),
        tools,
    })
}
