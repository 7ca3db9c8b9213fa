//! Ask command handler: one-shot question answering.

use super::build_pipeline;
use clap::Args;
use docrag_core::{AppConfig, AppResult};

/// Ask a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let pipeline = build_pipeline(config)?;

        let result = pipeline.answer(&self.question).await?;
        println!("{}", result.answer);

        Ok(())
    }
}
