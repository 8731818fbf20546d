//! Command-line surface.
//!
//! ```bash
//! cvgen build                      # markdown for every version
//! cvgen build ai --format all      # markdown, HTML and PDF for one version
//! cvgen check executive            # what a version would contain
//! cvgen enrich cv.md -o cv.html    # enrich hand-edited markdown
//! cvgen serve                      # HTTP API
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::Config;
use crate::content::ContentLoader;
use crate::enrichment::MarkdownEnricher;
use crate::generation::generator::{DocumentAssembler, SelectionSummary};
use crate::render::publish::{OutputFormat, Publisher};
use crate::render::{wrap_standalone, RenderOrchestrator, RenderOutcome};
use crate::state::load_registry;
use crate::versions::ALL_VERSIONS;

/// Build tailored CV variants from one YAML content source.
#[derive(Parser, Debug)]
#[command(name = "cvgen", version, about)]
pub struct Cli {
    /// Content directory (overrides CV_CONTENT_DIR).
    #[arg(long, global = true)]
    pub content_dir: Option<PathBuf>,

    /// Output directory (overrides CV_OUTPUT_DIR).
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Generate documents for one version or `all`.
    Build {
        #[arg(default_value = ALL_VERSIONS)]
        version: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
    },

    /// Report what each version would contain without writing anything.
    Check {
        #[arg(default_value = ALL_VERSIONS)]
        version: String,
    },

    /// Enrich a markdown file into cv-* annotated HTML.
    Enrich {
        input: PathBuf,

        /// Write here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Wrap the result in a complete HTML page.
        #[arg(long)]
        standalone: bool,
    },

    /// Serve the HTTP API.
    Serve,
}

fn assembler(config: &Config) -> Result<DocumentAssembler> {
    let registry = load_registry(config).context("Failed to load version registry")?;
    let content = ContentLoader::new(&config.content_dir)
        .load()
        .with_context(|| format!("Failed to load content from {}", config.content_dir.display()))?;
    Ok(DocumentAssembler::new(content.into(), registry.into()))
}

fn publisher(config: &Config) -> Publisher {
    Publisher {
        output_dir: config.output_dir.clone(),
        file_stem: config.file_stem.clone(),
        asset_root: config.asset_root.clone(),
        stylesheet: config.stylesheet.clone(),
        print_stylesheet: config.print_stylesheet.clone(),
        orchestrator: RenderOrchestrator::with_default_chain(
            &config.stylesheet,
            &config.print_stylesheet,
            config.render_timeout,
        ),
    }
}

pub fn format_summary(summary: &SelectionSummary) -> String {
    format!(
        "{}: layout={} tagline={:?} skills={} ({} columns) experiences={} projects={} education={} certifications={}",
        summary.version,
        summary.layout,
        summary.tagline,
        summary.skills_shape,
        summary.skills_columns,
        summary.experiences,
        summary.projects,
        summary.education,
        summary.certifications
    )
}

async fn build(config: &Config, version: &str, format: OutputFormat) -> Result<()> {
    let assembler = assembler(config)?;
    let publisher = publisher(config);
    for document in assembler.build_all(version)? {
        let report = publisher.publish(&document, format).await?;
        println!("✅ {} -> {}", report.version, report.markdown.display());
        if let Some(html) = &report.html {
            println!("   html: {}", html.display());
        }
        match &report.pdf {
            Some(RenderOutcome::Rendered { renderer }) => {
                println!("   pdf: {} ({renderer})", publisher.paths(&report.version).pdf.display());
            }
            Some(RenderOutcome::ManualRequired { instructions }) => println!("{instructions}"),
            None => {}
        }
    }
    Ok(())
}

fn check(config: &Config, version: &str) -> Result<Vec<SelectionSummary>> {
    let assembler = assembler(config)?;
    let summaries = assembler
        .registry()
        .resolve_targets(version)?
        .iter()
        .map(|profile| assembler.check(&profile.name))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(summaries)
}

async fn enrich(
    config: &Config,
    input: &Path,
    output: Option<&Path>,
    standalone: bool,
) -> Result<()> {
    let markdown = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let mut html = MarkdownEnricher::new().enrich(&markdown);
    if standalone {
        let title = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        html = wrap_standalone(&html, &title, &config.stylesheet);
    }
    match output {
        Some(path) => {
            tokio::fs::write(path, html)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Enriched {} -> {}", input.display(), path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

/// Runs every command except `serve`, which owns the server lifecycle in `main`.
pub async fn run(command: &Command, config: &Config) -> Result<()> {
    match command {
        Command::Build { version, format } => build(config, version, *format).await,
        Command::Check { version } => {
            for summary in check(config, version)? {
                println!("{}", format_summary(&summary));
            }
            Ok(())
        }
        Command::Enrich {
            input,
            output,
            standalone,
        } => enrich(config, input, output.as_deref(), *standalone).await,
        Command::Serve => anyhow::bail!("serve is handled by the server entry point"),
    }
}
