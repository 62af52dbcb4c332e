//! Podprobe server binary

use anyhow::Result;
use clap::Parser;
use podprobe_config::{ConfigLoader, ProbeConfig};
use std::path::PathBuf;

use podprobe_server::Server;

#[derive(Parser)]
#[command(author, version, about = "In-cluster diagnostic and fault-injection probe", long_about = None)]
struct Cli {
    /// Configuration file path (YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Server bind address, overriding configuration
    #[arg(short, long)]
    bind: Option<String>,

    /// Server port, overriding configuration
    #[arg(short, long)]
    port: Option<u16>,

    /// Print default configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", serde_yaml::to_string(&ProbeConfig::default())?);
        return Ok(());
    }

    let mut config = ConfigLoader::new().load(cli.config.as_ref())?;
    apply_cli_overrides(&mut config, &cli);
    config.validate_all()?;

    let server = Server::new(config)?;
    server.start().await
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut ProbeConfig, cli: &Cli) {
    if let Some(bind) = &cli.bind {
        config.server.bind_address = bind.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
}
