mod app;
mod client;
mod config;
mod error;
mod ui;

use std::{fs, path::Path, sync::Arc};

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}

/// Logs go to a file: stdout belongs to the alternate screen.
fn init_tracing(config: &config::AppConfig) -> Result<()> {
    if let Some(parent) = Path::new(&config.log_file).parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spese_tui={level},api_types={level}",
            level = config.log_level
        ))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
