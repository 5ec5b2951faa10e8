//! # Mindline Main Entry Point
//!
//! Terminal administration console for the mental-health backend.

use anyhow::Result;
use mindline::cmd_args::CommandLineArgs;
use mindline::config::LOG_LEVEL_ENV_VAR;
use mindline::AppController;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing(cmd_args.verbose());

    let mut app = AppController::new(&cmd_args)?;

    println!("Mindline admin console - type 'help' for commands");
    app.run().await?;

    println!("\nBye!");
    Ok(())
}
