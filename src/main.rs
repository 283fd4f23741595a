use std::path::Path;

use pcs_tools::export;
use pcs_tools::io::api::ApiClient;
use pcs_tools::{Result, ToolError};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_tracing()?;

    let client = ApiClient::new();
    export::export_indicators(&client, Path::new(export::OUTPUT_FILE)).await?;
    info!(output = export::OUTPUT_FILE, "workbook written");
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}
