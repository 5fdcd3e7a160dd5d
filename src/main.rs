use std::process;

use clap::Parser;
use proplan::{
    cli::{self, Cli},
    config::Config,
    logging,
    storage::Storage,
};

fn main() {
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    logging::init(config.log_format);

    let dir = config.data_dir().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    let storage = match Storage::open(dir) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize storage: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(&storage, cli, config.seed_demo_data) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
