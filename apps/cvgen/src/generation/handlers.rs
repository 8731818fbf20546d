//! Axum route handlers for the document API.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::content_selector::toggles_active;
use crate::generation::generator::SelectionSummary;
use crate::render::publish::copy_assets;
use crate::render::{document_page, RenderOutcome};
use crate::state::AppState;
use crate::versions::VersionProfile;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct VersionsQuery {
    /// Only list profiles with this legacy toggle active.
    pub toggle: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VersionsResponse {
    pub versions: Vec<VersionProfile>,
}

#[derive(Debug, Serialize)]
pub struct MarkdownResponse {
    pub render_id: Uuid,
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub markdown: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/versions
///
/// Registry profiles in build order, optionally narrowed by `?toggle=`.
pub async fn handle_list_versions(
    State(state): State<AppState>,
    Query(query): Query<VersionsQuery>,
) -> Json<VersionsResponse> {
    let wanted: Vec<String> = query.toggle.into_iter().collect();
    let versions = state
        .assembler
        .registry()
        .profiles()
        .iter()
        .filter(|p| wanted.is_empty() || toggles_active(&wanted, p))
        .cloned()
        .collect();
    Json(VersionsResponse { versions })
}

/// GET /api/v1/documents/:version/markdown
pub async fn handle_get_markdown(
    State(state): State<AppState>,
    Path(version): Path<String>,
) -> Result<Json<MarkdownResponse>, AppError> {
    let document = state.assembler.build(&version)?;
    Ok(Json(MarkdownResponse {
        render_id: Uuid::new_v4(),
        version: document.version,
        generated_at: Utc::now(),
        markdown: document.markdown,
    }))
}

/// GET /api/v1/documents/:version/html
///
/// Standalone enriched page. The stylesheet is referenced, not inlined.
pub async fn handle_get_html(
    State(state): State<AppState>,
    Path(version): Path<String>,
) -> Result<Html<String>, AppError> {
    let document = state.assembler.build(&version)?;
    Ok(Html(document_page(
        &state.enricher,
        &document,
        &state.config.stylesheet,
    )))
}

/// GET /api/v1/documents/:version/pdf
///
/// Runs the renderer chain in a scratch directory holding the page, its
/// stylesheets and `assets/`. Returns 502 when no renderer is installed,
/// since only manual print-to-PDF remains.
pub async fn handle_get_pdf(
    State(state): State<AppState>,
    Path(version): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let document = state.assembler.build(&version)?;
    let render_id = Uuid::new_v4();

    let scratch = tempfile::TempDir::new()?;
    // stylesheets and photo resolve relative to the page
    copy_assets(
        &state.config.asset_root,
        scratch.path(),
        &[state.config.stylesheet.as_str(), state.config.print_stylesheet.as_str()],
    )?;
    let html_path = scratch.path().join(format!("{render_id}.html"));
    let pdf_path = scratch.path().join(format!("{render_id}.pdf"));
    let page = document_page(&state.enricher, &document, &state.config.stylesheet);
    tokio::fs::write(&html_path, page).await?;

    match state.renderer.render_pdf(&html_path, &pdf_path).await {
        RenderOutcome::Rendered { renderer } => {
            let pdf = Bytes::from(tokio::fs::read(&pdf_path).await?);
            info!(
                "Rendered {} PDF ({} bytes) with {renderer}, render_id={render_id}",
                document.version,
                pdf.len()
            );
            let disposition = format!("inline; filename=\"cv-{}.pdf\"", document.version);
            Ok((
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                pdf,
            ))
        }
        RenderOutcome::ManualRequired { .. } => Err(AppError::Render(
            "No PDF renderer is available on the server; fetch the HTML and print it to PDF"
                .to_string(),
        )),
    }
}

/// GET /api/v1/documents/:version/summary
pub async fn handle_get_summary(
    State(state): State<AppState>,
    Path(version): Path<String>,
) -> Result<Json<SelectionSummary>, AppError> {
    Ok(Json(state.assembler.check(&version)?))
}

/// POST /api/v1/enrich
///
/// Body is markdown text; response is the enriched HTML fragment.
pub async fn handle_enrich(
    State(state): State<AppState>,
    body: String,
) -> Result<Html<String>, AppError> {
    if body.trim().is_empty() {
        return Err(AppError::Validation("markdown body cannot be empty".to_string()));
    }
    Ok(Html(state.enricher.enrich(&body)))
}
