use clap::Parser;
use keycloud_core::storage::config::Config;
use keycloud_core::utils::logging::{VerboseLogger, log_error};
use std::path::PathBuf;

mod cli;

use cli::dispatcher::Dispatcher;
use cli::main_types::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    VerboseLogger::install(cli.verbose);

    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("Error loading config: {}", err));
            std::process::exit(1);
        }
    };

    if cli.verbose {
        eprintln!("Verbose mode is enabled");

        if let Some(config_dir) = &cli.config_dir {
            eprintln!("Using config directory: {}", config_dir);
        }

        if cli.session_token.as_ref().is_some_and(|t| !t.is_empty()) {
            eprintln!("Using session token provided via env or command line");
        }
    }

    let mut dispatcher = Dispatcher::new(
        config,
        config_path,
        cli.verbose,
        cli.server,
        cli.session_token,
    );

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("{} {}", e.severity().emoji(), e.display_friendly());
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("💡 {}", hint);
        }
        std::process::exit(1);
    }
}
