//! # postline Main Entry Point

use anyhow::Result;
use postline::cmd_args::CommandLineArgs;
use postline::config::Settings;
use postline::{logging, AppController};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CommandLineArgs::parse();
    let settings = Settings::load(&args)?;

    if logging::init(&settings)? {
        tracing::info!("postline {} starting against {}", env!("CARGO_PKG_VERSION"), settings.base_url);
    }

    let mut app = AppController::new(&settings)?;
    app.run().await?;

    Ok(())
}
