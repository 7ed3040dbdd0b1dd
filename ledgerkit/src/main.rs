//! `ledgerkit` command-line client.
//!
//! ```sh
//! ledgerkit init                         # Generate default config.toml
//! ledgerkit profile 42                   # GET /users/42
//! ledgerkit provider xrpl -n testnet -w xaman
//! ledgerkit wallets --chain aptos
//! ```

mod cmd;

use std::process::ExitCode;

use clap::Parser;
use cmd::{Cli, Commands};
use ledgerkit::Configuration;

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    #[cfg(feature = "telemetry")]
    let _telemetry = ledgerkit::telemetry::Telemetry::new()
        .with_name(env!("CARGO_PKG_NAME"))
        .with_version(env!("CARGO_PKG_VERSION"))
        .register();
    #[cfg(not(feature = "telemetry"))]
    init_logging();

    let holder = Configuration::new();
    let result = match cli.command {
        Commands::Init { output, force } => cmd::init::run(&output, force),
        Commands::Login { username, password } => {
            cmd::account::login(&cli.config, &holder, &username, &password).await
        }
        Commands::Profile { user_id } => cmd::account::profile(&cli.config, &holder, &user_id).await,
        Commands::Provider {
            blockchain,
            network,
            wallet,
        } => cmd::chain::provider(&cli.config, &blockchain, network.as_deref(), &wallet),
        Commands::Wallets { chain } => cmd::chain::wallets(chain.as_deref()),
        Commands::Chains => cmd::chain::chains(&cli.config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "telemetry"))]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
}
