//! HELA CLI binary entrypoint.
//!
//! This is the main entry point for the hela command-line tool, providing
//! network, paratime, wallet, and stablecoin governance commands.

use hela_rs::cli;
use hela_rs::cli::utils::print_error;

#[tokio::main]
async fn main() {
    // Initialize basic logging for CLI
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    // Run the CLI
    if let Err(err) = cli::run().await {
        print_error(&format!("{err:#}"));
        std::process::exit(1);
    }
}
