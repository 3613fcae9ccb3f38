// Entrypoint for the CLI application.
// - Keeps `main` small: build the client, apply environment config and hand
//   it to the UI loop.
// - Returns `anyhow::Result` so setup failures print with context.

use std::sync::Arc;

use anyhow::Context;
use texie_cli::{config::CliConfig, logging, ui, ReqwestTransport, TexieCloud};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::setup();
    let config = CliConfig::from_env();

    let transport = ReqwestTransport::new().context("Failed to build HTTP client")?;
    let cloud = TexieCloud::new(Arc::new(transport), Arc::new(config.token_store()));

    if let Some((id, secret)) = config.credentials() {
        cloud.configure(id, secret);
        ui::handle_authenticate(&cloud).await?;
    }

    ui::main_menu(cloud, config).await?;
    Ok(())
}
