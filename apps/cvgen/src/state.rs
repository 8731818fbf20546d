use std::sync::Arc;

use crate::config::Config;
use crate::content::ContentLoader;
use crate::enrichment::MarkdownEnricher;
use crate::errors::AppError;
use crate::generation::generator::DocumentAssembler;
use crate::render::RenderOrchestrator;
use crate::versions::VersionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
/// Content is loaded once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub assembler: Arc<DocumentAssembler>,
    pub enricher: MarkdownEnricher,
    /// PDF renderer chain. Default: Chrome, WeasyPrint, pandoc.
    pub renderer: Arc<RenderOrchestrator>,
}

/// The configured registry file, or the built-in profiles.
pub fn load_registry(config: &Config) -> Result<VersionRegistry, AppError> {
    match &config.versions_file {
        Some(path) => VersionRegistry::from_yaml_file(path),
        None => Ok(VersionRegistry::default()),
    }
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let registry = load_registry(&config)?;
        let content = ContentLoader::new(&config.content_dir).load()?;
        let renderer = RenderOrchestrator::with_default_chain(
            &config.stylesheet,
            &config.print_stylesheet,
            config.render_timeout,
        );
        Ok(Self {
            assembler: Arc::new(DocumentAssembler::new(Arc::new(content), Arc::new(registry))),
            enricher: MarkdownEnricher::new(),
            renderer: Arc::new(renderer),
            config,
        })
    }
}
