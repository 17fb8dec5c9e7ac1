use anyhow::Result;
use colored::Colorize;
use print_quote::{config, server};
use std::path::Path;
use tracing::info;

/// Execute the serve command
///
/// Configuration is loaded before binding, so missing cost keys stop the
/// process before it accepts any request.
pub async fn execute(config_path: &Path) -> Result<()> {
    println!("{}", "Starting print-quote API...".green());

    let cfg = config::load_config(config_path)?;
    info!("Configuration loaded from {}", config_path.display());

    server::start_server(cfg).await?;

    Ok(())
}
