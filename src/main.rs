use clap::{Parser, Subcommand};

use shortgate::config::LoggingConfig;
use shortgate::runtime::modes;
use shortgate::system::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "shortgate",
    version,
    about = "Distributed URL shortener: a public gateway forwarding to a storage node"
)]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Run the storage node (identifier allocation and mapping persistence)
    Storage,
    /// Run the public gateway (forwards shorten/resolve to the storage node)
    Gateway,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let _guard = init_logging(&logging);

    match cli.mode {
        Mode::Storage => modes::storage::run_storage_node().await,
        Mode::Gateway => modes::gateway::run_gateway().await,
    }
}
