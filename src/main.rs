use clap::Parser;
use log::debug;

use ownotes::{App, Cli, Settings, Vault};

fn initialize_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    let settings_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load(&settings_path);
    debug!("Using settings from {}", settings_path.display());

    let vault_root = match cli.vault_dir.clone() {
        Some(dir) => dir,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Failed to determine the working directory: {}", e);
                std::process::exit(1);
            }
        },
    };

    let mut app = App::new(settings, settings_path, Vault::new(vault_root), cli.verbose);
    if let Err(e) = app.run(cli.command).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
