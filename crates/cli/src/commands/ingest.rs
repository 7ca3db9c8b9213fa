//! Ingest command handler.

use clap::Args;
use docrag_core::{AppConfig, AppResult};
use docrag_rag::embeddings::create_provider;
use std::path::PathBuf;

/// Ingest text documents into the vector index
#[derive(Args, Debug)]
pub struct IngestCommand {
    /// Folder containing `.txt` documents (overrides config)
    #[arg(short, long)]
    pub docs: Option<PathBuf>,
}

impl IngestCommand {
    /// Execute the ingest command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let mut config = config.clone();
        if let Some(ref docs) = self.docs {
            config.docs_dir = docs.clone();
        }

        let embedder = create_provider(&config)?;
        let report = docrag_rag::ingest(&config, embedder).await?;

        println!(
            "Ingested {} files ({} chunks). Index at: {}",
            report.files,
            report.chunks,
            config.index_path.display()
        );

        Ok(())
    }
}
