//! Writing build outputs to `<output>/<version>/<stem>-<version>.{md,html,pdf}`.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, info};

use crate::enrichment::MarkdownEnricher;
use crate::errors::AppError;
use crate::generation::generator::GeneratedDocument;
use crate::render::{document_page, RenderOrchestrator, RenderOutcome};

const ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Html,
    Pdf,
    All,
}

impl OutputFormat {
    fn wants_html(&self) -> bool {
        // PDF is rendered from the HTML page
        !matches!(self, OutputFormat::Markdown)
    }

    fn wants_pdf(&self) -> bool {
        matches!(self, OutputFormat::Pdf | OutputFormat::All)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub dir: PathBuf,
    pub markdown: PathBuf,
    pub html: PathBuf,
    pub pdf: PathBuf,
}

impl OutputPaths {
    pub fn new(output_dir: &Path, stem: &str, version: &str) -> Self {
        let dir = output_dir.join(version);
        let file = |ext: &str| dir.join(format!("{stem}-{version}.{ext}"));
        Self {
            markdown: file("md"),
            html: file("html"),
            pdf: file("pdf"),
            dir,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PublishReport {
    pub version: String,
    pub markdown: PathBuf,
    pub html: Option<PathBuf>,
    pub pdf: Option<RenderOutcome>,
}

fn copy_dir(src: &Path, dest: &Path) -> std::io::Result<usize> {
    std::fs::create_dir_all(dest)?;
    let mut copied = 0;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Copies `assets/` and the named stylesheets from `root` into `dest`.
/// Anything missing under `root` is skipped. Returns the number of files copied.
pub fn copy_assets(root: &Path, dest: &Path, stylesheets: &[&str]) -> Result<usize, AppError> {
    let mut copied = 0;
    let assets = root.join(ASSETS_DIR);
    if assets.is_dir() {
        copied += copy_dir(&assets, &dest.join(ASSETS_DIR))?;
    } else {
        debug!("No assets directory at {}", assets.display());
    }
    for sheet in stylesheets {
        let src = root.join(sheet);
        if src.is_file() {
            std::fs::create_dir_all(dest)?;
            std::fs::copy(&src, dest.join(sheet))?;
            copied += 1;
        } else {
            debug!("Stylesheet {} not found, skipping", src.display());
        }
    }
    Ok(copied)
}

pub struct Publisher {
    pub output_dir: PathBuf,
    pub file_stem: String,
    pub asset_root: PathBuf,
    pub stylesheet: String,
    pub print_stylesheet: String,
    pub orchestrator: RenderOrchestrator,
}

impl Publisher {
    pub fn paths(&self, version: &str) -> OutputPaths {
        OutputPaths::new(&self.output_dir, &self.file_stem, version)
    }

    pub async fn publish(
        &self,
        document: &GeneratedDocument,
        format: OutputFormat,
    ) -> Result<PublishReport, AppError> {
        let paths = self.paths(&document.version);
        tokio::fs::create_dir_all(&paths.dir).await?;

        tokio::fs::write(&paths.markdown, &document.markdown).await?;
        info!("Markdown written: {}", paths.markdown.display());

        let mut report = PublishReport {
            version: document.version.clone(),
            markdown: paths.markdown.clone(),
            html: None,
            pdf: None,
        };
        if !format.wants_html() {
            return Ok(report);
        }

        let copied = copy_assets(
            &self.asset_root,
            &paths.dir,
            &[self.stylesheet.as_str(), self.print_stylesheet.as_str()],
        )?;
        debug!("Copied {copied} asset files into {}", paths.dir.display());

        let page = document_page(&MarkdownEnricher::new(), document, &self.stylesheet);
        tokio::fs::write(&paths.html, page).await?;
        info!("HTML written: {}", paths.html.display());
        report.html = Some(paths.html.clone());

        if format.wants_pdf() {
            report.pdf = Some(self.orchestrator.render_pdf(&paths.html, &paths.pdf).await);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::FakeRenderer;
    use tempfile::TempDir;

    fn document() -> GeneratedDocument {
        GeneratedDocument {
            version: "ai".to_string(),
            markdown: "# **Ada**\n\n## Skills\n\n**Core**: Rust\n".to_string(),
        }
    }

    fn publisher(output: &Path, root: &Path, pdf_succeeds: bool) -> Publisher {
        let (renderer, _) = FakeRenderer::boxed("fake", pdf_succeeds);
        Publisher {
            output_dir: output.to_path_buf(),
            file_stem: "ada".to_string(),
            asset_root: root.to_path_buf(),
            stylesheet: "css_styling.css".to_string(),
            print_stylesheet: "css_styling_print.css".to_string(),
            orchestrator: RenderOrchestrator::new(vec![renderer]),
        }
    }

    #[test]
    fn test_output_paths() {
        let paths = OutputPaths::new(Path::new("output"), "cv", "firmware");
        assert_eq!(paths.dir, Path::new("output/firmware"));
        assert_eq!(paths.markdown, Path::new("output/firmware/cv-firmware.md"));
        assert_eq!(paths.pdf, Path::new("output/firmware/cv-firmware.pdf"));
    }

    #[test]
    fn test_copy_assets_skips_missing() {
        let root = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("assets/icons")).unwrap();
        std::fs::write(root.path().join("assets/icons/phone.png"), b"png").unwrap();
        std::fs::write(root.path().join("assets/profile.jpeg"), b"jpg").unwrap();
        std::fs::write(root.path().join("screen.css"), b"body{}").unwrap();

        let copied = copy_assets(root.path(), dest.path(), &["screen.css", "print.css"]).unwrap();
        assert_eq!(copied, 3);
        assert!(dest.path().join("assets/icons/phone.png").exists());
        assert!(dest.path().join("screen.css").exists());
        assert!(!dest.path().join("print.css").exists());
    }

    #[tokio::test]
    async fn test_markdown_only() {
        let out = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let report = publisher(out.path(), root.path(), true)
            .publish(&document(), OutputFormat::Markdown)
            .await
            .unwrap();
        assert!(report.html.is_none());
        assert!(report.pdf.is_none());
        let written = tokio::fs::read_to_string(out.path().join("ai/ada-ai.md")).await.unwrap();
        assert_eq!(written, document().markdown);
    }

    #[tokio::test]
    async fn test_all_formats() {
        let out = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let report = publisher(out.path(), root.path(), true)
            .publish(&document(), OutputFormat::All)
            .await
            .unwrap();

        let html = tokio::fs::read_to_string(out.path().join("ai/ada-ai.html")).await.unwrap();
        assert!(html.contains("<title>CV - ai</title>"));
        assert!(html.contains("cv-executive-skills"));
        assert_eq!(
            report.pdf,
            Some(RenderOutcome::Rendered {
                renderer: "fake".to_string()
            })
        );
        assert!(out.path().join("ai/ada-ai.pdf").exists());
    }

    #[tokio::test]
    async fn test_pdf_falls_back_to_manual() {
        let out = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let report = publisher(out.path(), root.path(), false)
            .publish(&document(), OutputFormat::Pdf)
            .await
            .unwrap();
        assert!(matches!(report.pdf, Some(RenderOutcome::ManualRequired { .. })));
        assert!(report.html.is_some());
    }
}
