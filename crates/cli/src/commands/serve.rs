//! Serve command handler: run the HTTP API server.

use clap::Args;
use docrag_core::{AppConfig, AppResult};

/// Run the HTTP API server
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Bind address (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides config and PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeCommand {
    /// Execute the serve command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let mut config = config.clone();
        if let Some(ref host) = self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }

        docrag_server::serve(&config).await
    }
}
