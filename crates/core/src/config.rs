//! Configuration management for docrag.
//!
//! This module handles loading and merging configuration from multiple
//! sources, in increasing order of precedence:
//! - Built-in defaults
//! - Config file (`docrag.yaml`)
//! - Environment variables
//! - Command-line flags (applied via [`AppConfig::with_overrides`])

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default Ollama API endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Main application configuration.
///
/// This struct holds all options shared by the ingestion pipeline, the
/// retriever, the LLM client, and the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Folder containing the `.txt` documents to ingest
    pub docs_dir: PathBuf,

    /// Path to the persisted vector index (SQLite file)
    pub index_path: PathBuf,

    /// Ollama API base URL
    pub endpoint: String,

    /// Completion model identifier
    pub model: String,

    /// Embedding provider name ("ollama" or "hash")
    pub embedding_provider: String,

    /// Embedding model identifier
    pub embedding_model: String,

    /// Embedding vector dimensions
    pub embedding_dim: usize,

    /// Chunk size in characters
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,

    /// Number of chunks to retrieve per question
    pub top_k: usize,

    /// HTTP server bind address
    pub host: String,

    /// HTTP server port
    pub port: u16,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    #[serde(default)]
    pub verbose: bool,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,
}

/// Config file structure (`docrag.yaml`).
///
/// Every field is optional; missing fields keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    docs_dir: Option<PathBuf>,
    index_path: Option<PathBuf>,
    endpoint: Option<String>,
    model: Option<String>,
    embedding_provider: Option<String>,
    embedding_model: Option<String>,
    embedding_dim: Option<usize>,
    chunk_size: Option<usize>,
    chunk_overlap: Option<usize>,
    top_k: Option<usize>,
    server: Option<ServerConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ServerConfig {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("data/docs"),
            index_path: PathBuf::from("data/index.db"),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: "phi3".to_string(),
            embedding_provider: "ollama".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            embedding_dim: 768,
            chunk_size: 500,
            chunk_overlap: 50,
            top_k: 5,
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Environment variables:
    /// - `DOCRAG_CONFIG`: Path to the config file (default: `docrag.yaml`)
    /// - `DOCRAG_DOCS_DIR`: Documents folder
    /// - `DOCRAG_INDEX`: Vector index path
    /// - `DOCRAG_ENDPOINT` / `OLLAMA_URL`: Ollama base URL
    /// - `DOCRAG_MODEL`: Completion model
    /// - `DOCRAG_EMBEDDING_MODEL`: Embedding model
    /// - `PORT`: Server port (hosting platforms set this)
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let mut config = Self::default();

        let config_path = match config_file {
            Some(path) => path.to_path_buf(),
            None => std::env::var("DOCRAG_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("docrag.yaml")),
        };

        if config_path.exists() {
            config.merge_yaml(&config_path)?;
        } else if config_file.is_some() {
            // An explicitly requested file must exist
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        // Environment variables override the config file
        if let Ok(docs_dir) = std::env::var("DOCRAG_DOCS_DIR") {
            config.docs_dir = PathBuf::from(docs_dir);
        }

        if let Ok(index_path) = std::env::var("DOCRAG_INDEX") {
            config.index_path = PathBuf::from(index_path);
        }

        if let Ok(endpoint) = std::env::var("DOCRAG_ENDPOINT") {
            config.endpoint = endpoint;
        } else if let Ok(endpoint) = std::env::var("OLLAMA_URL") {
            config.endpoint = endpoint;
        }

        if let Ok(model) = std::env::var("DOCRAG_MODEL") {
            config.model = model;
        }

        if let Ok(embedding_model) = std::env::var("DOCRAG_EMBEDDING_MODEL") {
            config.embedding_model = embedding_model;
        }

        if let Ok(port) = std::env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid PORT value: {}", port)))?;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        config.validate()?;
        Ok(config)
    }

    /// Merge a YAML config file into this config.
    fn merge_yaml(&mut self, path: &Path) -> AppResult<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        if let Some(docs_dir) = file.docs_dir {
            self.docs_dir = docs_dir;
        }
        if let Some(index_path) = file.index_path {
            self.index_path = index_path;
        }
        if let Some(endpoint) = file.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(model) = file.model {
            self.model = model;
        }
        if let Some(embedding_provider) = file.embedding_provider {
            self.embedding_provider = embedding_provider;
        }
        if let Some(embedding_model) = file.embedding_model {
            self.embedding_model = embedding_model;
        }
        if let Some(embedding_dim) = file.embedding_dim {
            self.embedding_dim = embedding_dim;
        }
        if let Some(chunk_size) = file.chunk_size {
            self.chunk_size = chunk_size;
        }
        if let Some(chunk_overlap) = file.chunk_overlap {
            self.chunk_overlap = chunk_overlap;
        }
        if let Some(top_k) = file.top_k {
            self.top_k = top_k;
        }
        if let Some(server) = file.server {
            if let Some(host) = server.host {
                self.host = host;
            }
            if let Some(port) = server.port {
                self.port = port;
            }
        }
        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        Ok(())
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the
    /// config file.
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate configuration values that would break the pipeline.
    pub fn validate(&self) -> AppResult<()> {
        if self.chunk_size == 0 {
            return Err(AppError::Config("chunk_size must be positive".to_string()));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(AppError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        if self.top_k == 0 {
            return Err(AppError::Config("top_k must be positive".to_string()));
        }

        if self.embedding_dim == 0 {
            return Err(AppError::Config(
                "embedding_dim must be positive".to_string(),
            ));
        }

        let known_providers = ["ollama", "hash"];
        if !known_providers.contains(&self.embedding_provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embedding_provider,
                known_providers.join(", ")
            )));
        }

        Ok(())
    }
}
