//! External PDF renderers. Each one shells out to a tool that may or may not be
//! installed; a missing tool is a failed attempt, never an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

/// Converts a standalone HTML file into a PDF.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    fn name(&self) -> &str;

    /// Returns true only when the PDF was written.
    async fn render(&self, html_path: &Path, pdf_path: &Path) -> bool;
}

/// Runs a command to completion, bounded by `timeout`. Spawn failures,
/// timeouts and non-zero exits all count as failure.
async fn run(program: &str, args: &[String], timeout: Duration) -> bool {
    debug!(program = %program, "Running renderer command");
    let child = Command::new(program).args(args).kill_on_drop(true).output();

    match tokio::time::timeout(timeout, child).await {
        Ok(Ok(output)) if output.status.success() => true,
        Ok(Ok(output)) => {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(program = %program, exit_code = code, "Renderer failed: {}", stderr.trim());
            false
        }
        Ok(Err(e)) => {
            debug!(program = %program, "Renderer unavailable: {e}");
            false
        }
        Err(_) => {
            warn!(program = %program, "Renderer timed out after {}s", timeout.as_secs());
            false
        }
    }
}

async fn absolute(path: &Path) -> PathBuf {
    tokio::fs::canonicalize(path)
        .await
        .unwrap_or_else(|_| path.to_path_buf())
}

// ────────────────────────────────────────────────────────────────────────────
// Headless Chrome
// ────────────────────────────────────────────────────────────────────────────

pub const CHROME_EXECUTABLES: &[&str] = &[
    "google-chrome",
    "chromium",
    "chromium-browser",
    "google-chrome-stable",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
];

pub struct ChromeRenderer {
    executables: Vec<String>,
    timeout: Duration,
}

impl ChromeRenderer {
    pub fn new(timeout: Duration) -> Self {
        Self::with_executables(CHROME_EXECUTABLES.iter().map(|s| s.to_string()).collect(), timeout)
    }

    pub fn with_executables(executables: Vec<String>, timeout: Duration) -> Self {
        Self {
            executables,
            timeout,
        }
    }
}

#[async_trait]
impl PdfRenderer for ChromeRenderer {
    fn name(&self) -> &str {
        "chrome-headless"
    }

    async fn render(&self, html_path: &Path, pdf_path: &Path) -> bool {
        let url = format!("file://{}", absolute(html_path).await.display());
        let args = vec![
            "--headless".to_string(),
            "--disable-gpu".to_string(),
            format!("--print-to-pdf={}", pdf_path.display()),
            url,
        ];
        for executable in &self.executables {
            if run(executable, &args, self.timeout).await && pdf_path.exists() {
                return true;
            }
        }
        false
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WeasyPrint
// ────────────────────────────────────────────────────────────────────────────

/// Same page with the screen stylesheet reference swapped for the print one.
pub fn print_variant(html: &str, stylesheet: &str, print_stylesheet: &str) -> String {
    html.replace(&format!("./{stylesheet}"), &format!("./{print_stylesheet}"))
}

pub struct WeasyPrintRenderer {
    stylesheet: String,
    print_stylesheet: String,
    timeout: Duration,
}

impl WeasyPrintRenderer {
    pub fn new(stylesheet: &str, print_stylesheet: &str, timeout: Duration) -> Self {
        Self {
            stylesheet: stylesheet.to_string(),
            print_stylesheet: print_stylesheet.to_string(),
            timeout,
        }
    }

    /// Writes the print variant next to the original so relative asset paths
    /// still resolve. The file is removed when the handle drops.
    async fn temp_copy(&self, html_path: &Path) -> std::io::Result<tempfile::NamedTempFile> {
        let html = tokio::fs::read_to_string(html_path).await?;
        let dir = html_path.parent().unwrap_or_else(|| Path::new("."));
        let temp = tempfile::Builder::new()
            .prefix("temp_")
            .suffix(".html")
            .tempfile_in(dir)?;
        tokio::fs::write(
            temp.path(),
            print_variant(&html, &self.stylesheet, &self.print_stylesheet),
        )
        .await?;
        Ok(temp)
    }
}

#[async_trait]
impl PdfRenderer for WeasyPrintRenderer {
    fn name(&self) -> &str {
        "weasyprint"
    }

    async fn render(&self, html_path: &Path, pdf_path: &Path) -> bool {
        let temp = match self.temp_copy(html_path).await {
            Ok(temp) => temp,
            Err(e) => {
                warn!("Could not prepare print copy of {}: {e}", html_path.display());
                return false;
            }
        };
        let args = vec![
            temp.path().display().to_string(),
            pdf_path.display().to_string(),
        ];
        run("weasyprint", &args, self.timeout).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// pandoc
// ────────────────────────────────────────────────────────────────────────────

pub struct PandocRenderer {
    timeout: Duration,
}

impl PandocRenderer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl PdfRenderer for PandocRenderer {
    fn name(&self) -> &str {
        "pandoc"
    }

    async fn render(&self, html_path: &Path, pdf_path: &Path) -> bool {
        let args = vec![
            html_path.display().to_string(),
            "-f".to_string(),
            "html".to_string(),
            "-o".to_string(),
            pdf_path.display().to_string(),
        ];
        run("pandoc", &args, self.timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_print_variant_swaps_stylesheet() {
        let html = r#"<link rel="stylesheet" href="./css_styling.css" />"#;
        assert_eq!(
            print_variant(html, "css_styling.css", "css_styling_print.css"),
            r#"<link rel="stylesheet" href="./css_styling_print.css" />"#
        );
    }

    #[tokio::test]
    async fn test_missing_executables_fail_quietly() {
        let dir = TempDir::new().unwrap();
        let html = dir.path().join("cv.html");
        tokio::fs::write(&html, "<html></html>").await.unwrap();
        let chrome = ChromeRenderer::with_executables(
            vec!["cvgen-no-such-browser".to_string()],
            Duration::from_secs(5),
        );
        assert!(!chrome.render(&html, &dir.path().join("cv.pdf")).await);
    }

    #[tokio::test]
    async fn test_weasyprint_temp_copy_is_removed() {
        let dir = TempDir::new().unwrap();
        let html = dir.path().join("cv.html");
        tokio::fs::write(&html, r#"<link href="./screen.css" />"#).await.unwrap();
        let weasy = WeasyPrintRenderer::new("screen.css", "print.css", Duration::from_secs(5));

        let temp = weasy.temp_copy(&html).await.unwrap();
        let copied = tokio::fs::read_to_string(temp.path()).await.unwrap();
        assert_eq!(copied, r#"<link href="./print.css" />"#);
        assert_eq!(temp.path().parent(), Some(dir.path()));

        let path = temp.path().to_path_buf();
        drop(temp);
        assert!(!path.exists());
    }
}
