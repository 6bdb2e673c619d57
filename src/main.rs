mod api;
mod cli;
mod error;
mod models;

use anyhow::Context;
use api::ProviderRegistry;
use clap::Parser;
use cli::{App, Cli};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables (RUST_LOG may live in .env)
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    info!("Initializing IP location finder...");

    let command = cli.command.unwrap_or_default();
    let app = App::new(ProviderRegistry::default());

    // The returned error is printed once, by anyhow's report on exit.
    app.run_command(command)
        .await
        .context("command execution failed")?;

    Ok(())
}
