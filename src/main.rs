use comic_poster::run::{list_groups, run, RunOutcome};
use comic_poster::startup::{load_env, logger, LOG_FILTER_ENV};
use comic_poster::{Cli, Settings};
use log::{error, info};
use std::process;

#[tokio::main]
async fn main() {
    // Load .env first so RUST_LOG can come from it too
    let dotenv = load_env(None);

    // Init logging
    logger(LOG_FILTER_ENV).init();

    if let Err(e) = dotenv {
        error!("Unable to read .env: {}", e);
        process::exit(1);
    }

    // Parse Args
    let args = Cli::new();

    // Parse Settings
    let settings = match Settings::new(&args.config_file) {
        Ok(s) => s,
        Err(e) => {
            error!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    if args.list_groups {
        match list_groups(settings).await {
            Ok(groups) => {
                for id in groups {
                    println!("{}", id);
                }
            }
            Err(e) => {
                error!("Application error: {:#}", e);
                process::exit(1);
            }
        }
        return;
    }

    // Run
    match run(settings, args.comic).await {
        Ok(RunOutcome::Published { .. }) => info!("Finished!"),
        Ok(RunOutcome::Aborted { message }) => info!("Nothing posted: {}", message),
        Err(e) => {
            error!("Application error: {:#}", e);
            process::exit(1);
        }
    }
}
