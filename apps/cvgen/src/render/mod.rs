//! Standalone HTML pages and the PDF renderer chain.
//!
//! Renderers are tried in order and the first success wins. When none is
//! available the caller gets print-to-PDF instructions instead of an error.

pub mod publish;
pub mod renderers;

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::enrichment::html::escape;
use crate::enrichment::MarkdownEnricher;
use crate::generation::generator::GeneratedDocument;
use crate::render::renderers::{ChromeRenderer, PandocRenderer, PdfRenderer, WeasyPrintRenderer};

/// Complete HTML page around enriched body markup. The stylesheet is
/// referenced relative to the page.
pub fn wrap_standalone(body: &str, title: &str, stylesheet: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n  \
         <meta charset=\"utf-8\" />\n  \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n  \
         <title>{}</title>\n  \
         <link rel=\"stylesheet\" href=\"./{}\" />\n\
         </head>\n\
         <body>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        escape(title),
        escape(stylesheet),
    )
}

/// Enriched, standalone page for one generated document.
pub fn document_page(
    enricher: &MarkdownEnricher,
    document: &GeneratedDocument,
    stylesheet: &str,
) -> String {
    let body = enricher.enrich(&document.markdown);
    wrap_standalone(&body, &format!("CV - {}", document.version), stylesheet)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderOutcome {
    Rendered { renderer: String },
    ManualRequired { instructions: String },
}

pub fn manual_instructions(html_path: &Path, pdf_path: &Path) -> String {
    format!(
        "Manual PDF generation required:\n\
         1. Open {} in a browser\n\
         2. Print (Cmd+P / Ctrl+P) and choose 'Save as PDF'\n\
         3. Save as {}",
        html_path.display(),
        pdf_path.display()
    )
}

pub struct RenderOrchestrator {
    renderers: Vec<Box<dyn PdfRenderer>>,
}

impl RenderOrchestrator {
    pub fn new(renderers: Vec<Box<dyn PdfRenderer>>) -> Self {
        Self { renderers }
    }

    /// Chrome, then WeasyPrint, then pandoc.
    pub fn with_default_chain(stylesheet: &str, print_stylesheet: &str, timeout: Duration) -> Self {
        Self::new(vec![
            Box::new(ChromeRenderer::new(timeout)),
            Box::new(WeasyPrintRenderer::new(stylesheet, print_stylesheet, timeout * 2)),
            Box::new(PandocRenderer::new(timeout)),
        ])
    }

    pub fn renderer_names(&self) -> Vec<&str> {
        self.renderers.iter().map(|r| r.name()).collect()
    }

    pub async fn render_pdf(&self, html_path: &Path, pdf_path: &Path) -> RenderOutcome {
        for renderer in &self.renderers {
            info!("Trying {} for {}", renderer.name(), pdf_path.display());
            if renderer.render(html_path, pdf_path).await {
                info!("PDF generated with {}: {}", renderer.name(), pdf_path.display());
                return RenderOutcome::Rendered {
                    renderer: renderer.name().to_string(),
                };
            }
        }
        warn!("No PDF renderer succeeded for {}", html_path.display());
        RenderOutcome::ManualRequired {
            instructions: manual_instructions(html_path, pdf_path),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Writes a fixed body to the PDF path when `succeeds` is set.
    pub(crate) struct FakeRenderer {
        pub(crate) label: &'static str,
        pub(crate) succeeds: bool,
        pub(crate) calls: Arc<AtomicUsize>,
    }

    impl FakeRenderer {
        pub(crate) fn boxed(label: &'static str, succeeds: bool) -> (Box<dyn PdfRenderer>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let renderer = FakeRenderer {
                label,
                succeeds,
                calls: calls.clone(),
            };
            (Box::new(renderer), calls)
        }
    }

    #[async_trait]
    impl PdfRenderer for FakeRenderer {
        fn name(&self) -> &str {
            self.label
        }

        async fn render(&self, _html_path: &Path, pdf_path: &Path) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.succeeds {
                tokio::fs::write(pdf_path, b"%PDF-1.4 fake").await.is_ok()
            } else {
                false
            }
        }
    }

    #[test]
    fn test_wrap_standalone() {
        let page = wrap_standalone("<div class=\"cv-header\"></div>", "Ada & Co", "css_styling.css");
        assert!(page.starts_with("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\" />"));
        assert!(page.contains("<title>Ada &amp; Co</title>"));
        assert!(page.contains("<link rel=\"stylesheet\" href=\"./css_styling.css\" />"));
        assert!(page.contains("<body>\n<div class=\"cv-header\"></div>\n</body>"));
    }

    #[tokio::test]
    async fn test_first_success_stops_the_chain() {
        let dir = tempfile::TempDir::new().unwrap();
        let (first, first_calls) = FakeRenderer::boxed("first", false);
        let (second, second_calls) = FakeRenderer::boxed("second", true);
        let (third, third_calls) = FakeRenderer::boxed("third", true);
        let orchestrator = RenderOrchestrator::new(vec![first, second, third]);

        let outcome = orchestrator
            .render_pdf(&dir.path().join("cv.html"), &dir.path().join("cv.pdf"))
            .await;
        assert_eq!(
            outcome,
            RenderOutcome::Rendered {
                renderer: "second".to_string()
            }
        );
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
        assert_eq!(third_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_all_failed_means_manual_instructions() {
        let (only, _) = FakeRenderer::boxed("broken", false);
        let orchestrator = RenderOrchestrator::new(vec![only]);
        let outcome = orchestrator
            .render_pdf(Path::new("out/ai/cv-ai.html"), Path::new("out/ai/cv-ai.pdf"))
            .await;
        match outcome {
            RenderOutcome::ManualRequired { instructions } => {
                assert!(instructions.contains("out/ai/cv-ai.html"));
                assert!(instructions.contains("Save as out/ai/cv-ai.pdf"));
            }
            other => panic!("expected manual fallback, got {other:?}"),
        }
    }

    #[test]
    fn test_default_chain_order() {
        let orchestrator =
            RenderOrchestrator::with_default_chain("a.css", "b.css", Duration::from_secs(30));
        assert_eq!(
            orchestrator.renderer_names(),
            vec!["chrome-headless", "weasyprint", "pandoc"]
        );
    }
}
