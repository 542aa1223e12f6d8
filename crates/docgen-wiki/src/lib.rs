//! Docgen Wiki - tool status overview
//!
//! Generates the "Tool Status Overview" wiki page:
//! - rows come from the hand-maintained [`TOOL_TABLE`]
//! - status and squadt connectivity are scraped from each tool's `Jamfile.v2`
//! - output is a single MediaWiki table in table order

pub mod generate;
pub mod render;
pub mod scrape;
pub mod table;

pub use generate::{generate, ScrapedTool, ToolTableReport, DEFAULT_OUTPUT};
pub use render::{render_cell, render_row, render_table, Cell};
pub use scrape::{
    build_file_path, extract_declaration, scrape_status, scrape_tool, ToolStatus, BUILD_FILE,
    DEFAULT_STATUS,
};
pub use table::{builtin_tools, parse_tool_table, Flag, ToolEntry, TOOL_TABLE};
