//! Unified service container for askdoc.
//!
//! Provides shared access to all core services. Collaborators
//! (embedder, language model, extractor) are injected as trait
//! objects so adapters and tests wire the same container.

use std::sync::Arc;
use std::time::Duration;

use crate::core::answer::AnswerComposer;
use crate::core::config::Config;
use crate::core::embed::{Embedder, OllamaEmbedder};
use crate::core::error::Result;
use crate::core::extract::{PlainTextExtractor, TextExtractor};
use crate::core::ingest::IngestPipeline;
use crate::core::llm::{LanguageModel, OllamaGenerator};
use crate::core::ollama::OllamaClient;
use crate::core::registry::DocumentRegistry;

/// Unified services container
///
/// All adapters use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,

    /// Registry of searchable documents
    pub registry: Arc<DocumentRegistry>,

    /// Ingestion pipeline for uploaded files
    pub pipeline: Arc<IngestPipeline>,

    /// Retrieval and answer composition
    pub composer: Arc<AnswerComposer>,
}

impl Services {
    /// Create services from configuration, wiring the Ollama
    /// collaborators.
    pub fn new(config: Config) -> Result<Self> {
        let client = OllamaClient::new(config.ollama.base_url.clone())?;

        let embedder: Arc<dyn Embedder> = Arc::new(OllamaEmbedder::new(
            client.clone(),
            config.ollama.embed_model.clone(),
            Duration::from_secs(config.ollama.embed_timeout_sec),
        ));
        let llm: Arc<dyn LanguageModel> = Arc::new(OllamaGenerator::new(
            client,
            config.ollama.llm_model.clone(),
            Duration::from_secs(config.ollama.generate_timeout_sec),
        ));

        Self::with_collaborators(config, embedder, llm, Arc::new(PlainTextExtractor))
    }

    /// Create services with explicit collaborators.
    ///
    /// Used by tests and by deployments that wire their own
    /// extractor or model backends.
    pub fn with_collaborators(
        config: Config,
        embedder: Arc<dyn Embedder>,
        llm: Arc<dyn LanguageModel>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Result<Self> {
        config.validate()?;

        let registry = Arc::new(DocumentRegistry::new());

        let pipeline = Arc::new(IngestPipeline::new(
            &config,
            Arc::clone(&registry),
            Arc::clone(&embedder),
            extractor,
        ));

        let composer = Arc::new(AnswerComposer::new(
            &config,
            Arc::clone(&registry),
            embedder,
            llm,
        ));

        Ok(Self {
            config: Arc::new(config),
            registry,
            pipeline,
            composer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AskdocError;
    use crate::core::mock::{MockEmbedder, MockLlm};

    fn test_services() -> Services {
        Services::with_collaborators(
            Config::default(),
            Arc::new(MockEmbedder::new()),
            Arc::new(MockLlm::with_response("ok")),
            Arc::new(PlainTextExtractor),
        )
        .unwrap()
    }

    #[test]
    fn test_services_creation() {
        let services = test_services();
        assert_eq!(services.config.retrieval.top_k, 15);
        assert!(services.registry.is_empty());
    }

    #[test]
    fn test_services_clone_shares_state() {
        let services = test_services();
        let cloned = services.clone();

        // Both should point to the same Arc instances
        assert!(Arc::ptr_eq(&services.registry, &cloned.registry));
        assert!(Arc::ptr_eq(&services.composer, &cloned.composer));
        assert!(Arc::ptr_eq(&services.config, &cloned.config));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.chunking.overlap = config.chunking.chunk_size;

        let result = Services::with_collaborators(
            config,
            Arc::new(MockEmbedder::new()),
            Arc::new(MockLlm::with_response("ok")),
            Arc::new(PlainTextExtractor),
        );
        assert!(matches!(result, Err(AskdocError::ConfigError(_))));
    }
}
