//! Configuration management for the askdoc service.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{AskdocError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Chunking configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChunkingConfig {
    /// Characters per chunk (not bytes!)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Character overlap between consecutive chunks
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

/// Retrieval and answering configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    /// Chunks retrieved per document per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Hard cap on assembled context length, in characters
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,

    /// Questions shorter than this (trimmed, in characters) get
    /// the concise answer style
    #[serde(default = "default_short_question_chars")]
    pub short_question_chars: usize,
}

/// Ollama collaborator configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama API
    #[serde(default = "default_ollama_url")]
    pub base_url: String,

    /// Embedding model name
    #[serde(default = "default_embed_model")]
    pub embed_model: String,

    /// Completion model name
    #[serde(default = "default_llm_model")]
    pub llm_model: String,

    /// Per-request timeout for embedding calls, in seconds
    #[serde(default = "default_embed_timeout")]
    pub embed_timeout_sec: u64,

    /// Per-request timeout for completion calls, in seconds
    #[serde(default = "default_generate_timeout")]
    pub generate_timeout_sec: u64,
}

/// Upload limits configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Maximum files per upload batch
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Maximum file size in MiB
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_chunk_size() -> usize {
    500
}

fn default_overlap() -> usize {
    100
}

fn default_top_k() -> usize {
    15
}

fn default_max_context_chars() -> usize {
    4000
}

fn default_short_question_chars() -> usize {
    30
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_embed_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_llm_model() -> String {
    "llama3".to_string()
}

fn default_embed_timeout() -> u64 {
    10
}

fn default_generate_timeout() -> u64 {
    120
}

fn default_max_files() -> usize {
    5
}

fn default_max_file_size() -> usize {
    20
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            max_context_chars: default_max_context_chars(),
            short_question_chars: default_short_question_chars(),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_url(),
            embed_model: default_embed_model(),
            llm_model: default_llm_model(),
            embed_timeout_sec: default_embed_timeout(),
            generate_timeout_sec: default_generate_timeout(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_files: default_max_files(),
            max_file_size_mb: default_max_file_size(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| AskdocError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the standard precedence:
    ///
    /// 1. `ASKDOC_CONFIG` env var pointing at a TOML file
    /// 2. Built-in defaults
    /// 3. `ASKDOC_*` env var overrides on top of either
    pub fn load() -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("ASKDOC_CONFIG") {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = env::var("ASKDOC_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("ASKDOC_PORT") {
            if let Ok(v) = port.parse() {
                self.server.port = v;
            }
        }
        if let Ok(chunk_size) = env::var("ASKDOC_CHUNK_SIZE") {
            if let Ok(v) = chunk_size.parse() {
                self.chunking.chunk_size = v;
            }
        }
        if let Ok(overlap) = env::var("ASKDOC_OVERLAP") {
            if let Ok(v) = overlap.parse() {
                self.chunking.overlap = v;
            }
        }
        if let Ok(top_k) = env::var("ASKDOC_TOP_K") {
            if let Ok(v) = top_k.parse() {
                self.retrieval.top_k = v;
            }
        }
        if let Ok(url) = env::var("ASKDOC_OLLAMA_URL") {
            self.ollama.base_url = url;
        }
        if let Ok(model) = env::var("ASKDOC_EMBED_MODEL") {
            self.ollama.embed_model = model;
        }
        if let Ok(model) = env::var("ASKDOC_LLM_MODEL") {
            self.ollama.llm_model = model;
        }
        if let Ok(max_files) = env::var("ASKDOC_MAX_FILES") {
            if let Ok(v) = max_files.parse() {
                self.limits.max_files = v;
            }
        }
        if let Ok(max_size) = env::var("ASKDOC_MAX_FILE_SIZE_MB") {
            if let Ok(v) = max_size.parse() {
                self.limits.max_file_size_mb = v;
            }
        }
    }

    /// Validate configuration invariants
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(AskdocError::ConfigError(
                "chunk_size must be > 0".to_string(),
            ));
        }
        if self.chunking.overlap >= self.chunking.chunk_size {
            return Err(AskdocError::ConfigError(format!(
                "overlap ({}) must be < chunk_size ({})",
                self.chunking.overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(AskdocError::ConfigError("top_k must be >= 1".to_string()));
        }
        if self.retrieval.max_context_chars == 0 {
            return Err(AskdocError::ConfigError(
                "max_context_chars must be > 0".to_string(),
            ));
        }
        if self.limits.max_files == 0 {
            return Err(AskdocError::ConfigError(
                "max_files must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Maximum file size in bytes
    pub fn max_file_bytes(&self) -> usize {
        self.limits.max_file_size_mb * 1024 * 1024
    }

    /// Log the effective configuration at startup
    pub fn log_config(&self) {
        tracing::info!(
            host = %self.server.host,
            port = self.server.port,
            "Server configuration"
        );
        tracing::info!(
            chunk_size = self.chunking.chunk_size,
            overlap = self.chunking.overlap,
            "Chunking configuration"
        );
        tracing::info!(
            top_k = self.retrieval.top_k,
            max_context_chars = self.retrieval.max_context_chars,
            short_question_chars = self.retrieval.short_question_chars,
            "Retrieval configuration"
        );
        tracing::info!(
            base_url = %self.ollama.base_url,
            embed_model = %self.ollama.embed_model,
            llm_model = %self.ollama.llm_model,
            "Ollama configuration"
        );
        tracing::info!(
            max_files = self.limits.max_files,
            max_file_size_mb = self.limits.max_file_size_mb,
            "Upload limits"
        );
    }
}
