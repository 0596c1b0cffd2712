use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use taskgen::connector::api::{http, Router};
use taskgen::{Cli, Commands, Container};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let container = Container::new(cli.container_config())?;

    match cli.command {
        Commands::Serve { host, port } => http::serve(&container, &host, port).await,
        command => {
            let router = Router::new(&container);
            let output = router.route(command).await?;
            println!("{}", output);
            Ok(())
        }
    }
}
