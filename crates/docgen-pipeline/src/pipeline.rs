//! Documentation pipeline orchestration.
//!
//! Three stages run in order, each skipped as a whole when its marker file
//! or directory already exists:
//!
//! 1. extraction: Doxygen XML (marker: the XML root)
//! 2. transform: reference pages (marker: the reference index of one library)
//! 3. typesetting: PDF articles (marker: the article index of one library)
//!
//! Markers are presence checks only; delete the output tree to regenerate.

use crate::config::{DocLayout, PipelineConfig, Programs};
use crate::extract::{generate_library_xml, LibraryXml};
use crate::library::Library;
use crate::templates::TemplateSet;
use crate::transform::{generate_library_rst, LibraryReference};
use crate::typeset::{generate_library_pdf, CompiledDocument, LibraryArticles};
use docgen_core::{Result, ToolRunner};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// What a stage did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StageOutcome<T> {
    /// The marker existed; nothing was run.
    Skipped { marker: PathBuf },

    /// The stage ran for every library.
    Completed { libraries: Vec<T> },
}

impl<T> StageOutcome<T> {
    pub fn is_skipped(&self) -> bool {
        matches!(self, StageOutcome::Skipped { .. })
    }

    /// Per-library results; empty when skipped.
    pub fn libraries(&self) -> &[T] {
        match self {
            StageOutcome::Skipped { .. } => &[],
            StageOutcome::Completed { libraries } => libraries,
        }
    }
}

/// Result of a complete pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub extraction: StageOutcome<LibraryXml>,
    pub transform: StageOutcome<LibraryReference>,
    pub typesetting: StageOutcome<LibraryArticles>,

    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

impl PipelineReport {
    /// Number of stages skipped because their output was present.
    pub fn skipped_count(&self) -> usize {
        [
            self.extraction.is_skipped(),
            self.transform.is_skipped(),
            self.typesetting.is_skipped(),
        ]
        .iter()
        .filter(|s| **s)
        .count()
    }

    /// Every compiled article across libraries.
    pub fn documents(&self) -> impl Iterator<Item = &CompiledDocument> {
        self.typesetting
            .libraries()
            .iter()
            .flat_map(|lib| lib.documents.iter())
    }

    /// Articles whose reference passes did not complete.
    pub fn partial_documents(&self) -> impl Iterator<Item = &CompiledDocument> {
        self.documents().filter(|d| !d.outcome.is_complete())
    }
}

/// Documentation pipeline orchestrator.
pub struct DocPipeline {
    runner: Arc<dyn ToolRunner>,
    layout: DocLayout,
    programs: Programs,
    templates: TemplateSet,
    libraries: Vec<Library>,
    reference_marker: String,
    article_marker: String,
}

impl DocPipeline {
    /// Build a pipeline from `config`, loading template overrides from the
    /// configured source directory.
    pub fn new(runner: Arc<dyn ToolRunner>, config: &PipelineConfig) -> Result<Self> {
        let layout = config.layout()?;
        let templates = TemplateSet::load(&layout.source_dir)?;
        Ok(Self {
            runner,
            layout,
            programs: config.programs.clone(),
            templates,
            libraries: config.libraries(),
            reference_marker: config.reference_marker.clone(),
            article_marker: config.article_marker.clone(),
        })
    }

    pub fn layout(&self) -> &DocLayout {
        &self.layout
    }

    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    /// Run all three stages in order.
    ///
    /// Extraction and transform failures abort the run. Typesetting failures
    /// abort too, except in the reference passes (see
    /// [`crate::typeset::compile_document`]).
    pub async fn run(&self) -> Result<PipelineReport> {
        let start = Instant::now();
        info!(trunk = %self.layout.trunk.display(), libraries = self.libraries.len(), "Starting documentation pipeline");

        let extraction = self.run_extraction().await?;
        let transform = self.run_transform().await?;
        let typesetting = self.run_typesetting().await?;

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(duration_ms, "Documentation pipeline finished");

        Ok(PipelineReport {
            extraction,
            transform,
            typesetting,
            duration_ms,
        })
    }

    /// Stage 1: Doxygen XML for every library.
    pub async fn run_extraction(&self) -> Result<StageOutcome<LibraryXml>> {
        let marker = self.layout.xml_root.clone();
        if marker.exists() {
            info!(
                "Assuming Doxygen XML is up-to-date. Remove directory \"{}\" to re-generate.",
                marker.display()
            );
            return Ok(StageOutcome::Skipped { marker });
        }

        let mut libraries = Vec::new();
        for lib in &self.libraries {
            libraries.push(
                generate_library_xml(
                    self.runner.as_ref(),
                    &self.programs,
                    &self.templates,
                    &self.layout,
                    lib,
                )
                .await?,
            );
        }
        Ok(StageOutcome::Completed { libraries })
    }

    /// Stage 2: reference pages and `reference.rst` for every library.
    pub async fn run_transform(&self) -> Result<StageOutcome<LibraryReference>> {
        let marker = self.layout.reference_index(&self.reference_marker);
        if marker.exists() {
            info!(
                "Assuming reStructuredText is up-to-date. Remove directory \"{}\" to re-generate.",
                self.layout.rst_root.display()
            );
            return Ok(StageOutcome::Skipped { marker });
        }

        let mut libraries = Vec::new();
        for lib in &self.libraries {
            libraries.push(
                generate_library_rst(
                    self.runner.as_ref(),
                    &self.programs,
                    &self.templates,
                    &self.layout,
                    lib,
                )
                .await?,
            );
        }
        Ok(StageOutcome::Completed { libraries })
    }

    /// Stage 3: PDF articles and `articles.rst` for libraries with a
    /// `latex/` directory.
    pub async fn run_typesetting(&self) -> Result<StageOutcome<LibraryArticles>> {
        let marker = self.layout.article_index(&self.article_marker);
        if marker.exists() {
            info!(
                "Assuming generated PDF is up-to-date. Remove directory \"{}\" to re-generate.",
                self.layout.rst_root.display()
            );
            return Ok(StageOutcome::Skipped { marker });
        }

        let mut libraries = Vec::new();
        for lib in &self.libraries {
            if let Some(articles) = generate_library_pdf(
                self.runner.as_ref(),
                &self.programs,
                &self.templates,
                &self.layout,
                lib,
            )
            .await?
            {
                libraries.push(articles);
            }
        }
        Ok(StageOutcome::Completed { libraries })
    }
}
