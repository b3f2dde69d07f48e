//! Taskwright CLI entry point.

use clap::Parser;

use taskwright::cli::{commands, handle_error, Cli, Commands};
use taskwright::infrastructure::config::ConfigLoader;
use taskwright::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load_with_override(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Plan(args) => commands::plan::execute(args, &config).await,
        Commands::Session(args) => commands::session::execute(args, &config, cli.json).await,
        Commands::Agents(args) => commands::agents::execute(args, &config, cli.json).await,
        Commands::Schedule(args) => commands::schedule::execute(args, cli.json),
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
