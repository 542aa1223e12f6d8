//! Docgen - documentation generators for the toolset
//!
//! ## Commands
//!
//! - `tool-table`: scrape every tool's build file and write the wiki status table
//! - `library-docs`: run Doxygen, xsltproc and LaTeX over the libraries

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docgen_core::ProcessRunner;
use docgen_pipeline::{DocPipeline, PipelineConfig, PipelineReport, StageOutcome};
use docgen_wiki::{builtin_tools, ToolTableReport};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "docgen")]
#[command(author = "Toolset Docs Maintainers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Documentation generators for the toolset", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the "Tool Status Overview" wiki table
    ToolTable {
        /// Directory containing one subdirectory per tool
        #[arg(long, env = "DOCGEN_TOOLS_DIR", default_value = "../../tools")]
        tools_dir: PathBuf,

        /// File the wiki table is written to
        #[arg(short, long, default_value = docgen_wiki::DEFAULT_OUTPUT)]
        output: PathBuf,
    },

    /// Generate library reference pages and compile library articles
    LibraryDocs {
        /// Root of the source tree (overrides the config file)
        #[arg(long, env = "DOCGEN_TRUNK")]
        trunk: Option<PathBuf>,

        /// Pipeline configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the run report as JSON to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    docgen_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::ToolTable { tools_dir, output } => cmd_tool_table(&tools_dir, &output),
        Commands::LibraryDocs {
            trunk,
            config,
            report,
        } => cmd_library_docs(trunk, config.as_deref(), report.as_deref()).await,
    }
}

/// Scrape all tools and write the wiki table
fn cmd_tool_table(tools_dir: &Path, output: &Path) -> Result<()> {
    let entries = builtin_tools().context("Built-in tool table is malformed")?;
    let report = docgen_wiki::generate(tools_dir, &entries, output)
        .with_context(|| format!("Failed to generate tool table from {:?}", tools_dir))?;

    print!("{}", render_tool_table_summary(&report));
    Ok(())
}

fn render_tool_table_summary(report: &ToolTableReport) -> String {
    let mut out = format!(
        "Wrote {} tools to {:?} ({} with squadt connectivity)\n",
        report.tools.len(),
        report.output,
        report.squadt_count()
    );
    for tool in report.non_release() {
        out.push_str(&format!("  {:<24} {}\n", tool.entry.name, tool.status.status));
    }
    out
}

/// Resolve the pipeline configuration from the config file and `--trunk`.
fn load_config(trunk: Option<PathBuf>, config: Option<&Path>) -> Result<PipelineConfig> {
    let mut resolved = match config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load pipeline config {:?}", path))?,
        None => PipelineConfig::default(),
    };
    if let Some(trunk) = trunk {
        resolved.trunk = trunk;
    }
    Ok(resolved)
}

/// Run the library documentation pipeline
async fn cmd_library_docs(
    trunk: Option<PathBuf>,
    config: Option<&Path>,
    report_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(trunk, config)?;
    let pipeline = DocPipeline::new(Arc::new(ProcessRunner::new()), &config)
        .context("Failed to set up documentation pipeline")?;

    let report = pipeline
        .run()
        .await
        .context("Library documentation pipeline failed")?;

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write report to {:?}", path))?;
        info!(report = %path.display(), "Wrote pipeline report");
    }

    print!("{}", render_pipeline_summary(&report));
    Ok(())
}

fn stage_line<T>(name: &str, outcome: &StageOutcome<T>, unit: &str) -> String {
    match outcome {
        StageOutcome::Skipped { marker } => {
            format!("{:<12} skipped ({:?} exists)\n", name, marker)
        }
        StageOutcome::Completed { libraries } => {
            format!("{:<12} {} {}\n", name, libraries.len(), unit)
        }
    }
}

fn render_pipeline_summary(report: &PipelineReport) -> String {
    let mut out = String::new();
    out.push_str(&stage_line("extraction", &report.extraction, "libraries"));
    out.push_str(&stage_line("transform", &report.transform, "libraries"));
    out.push_str(&stage_line("typesetting", &report.typesetting, "libraries with articles"));

    let pages: usize = report
        .transform
        .libraries()
        .iter()
        .map(|lib| lib.classes.len() + lib.headers.len())
        .sum();
    if pages > 0 {
        out.push_str(&format!("Reference pages: {}\n", pages));
    }

    let documents = report.documents().count();
    if documents > 0 {
        out.push_str(&format!("Articles: {}\n", documents));
    }
    let partial: Vec<_> = report.partial_documents().collect();
    if !partial.is_empty() {
        out.push_str("\nUnresolved references in:\n");
        for doc in partial {
            out.push_str(&format!("  - {}\n", doc.base));
        }
    }

    out.push_str(&format!("Finished in {} ms\n", report.duration_ms));
    out
}
