mod bus;
mod cli;
mod config;
mod kstars;
mod launcher;
mod logging;
mod supervisor;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

/// Exit code when KStars stays unreachable through a whole retry budget.
const EXIT_UNREACHABLE: i32 = 1;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logging::init(args.output.as_deref(), &args.log_level)?;
    let cfg = cli::build_config(&args)?;

    let bus = bus::SessionBus::connect().await?;
    let launcher = launcher::KStarsLauncher::new(cfg.kstars_executable.clone());

    // The session connection drops on either exit path, releasing the bus.
    tokio::select! {
        res = supervisor::run(&bus, &launcher, &cfg) => {
            if let Err(err) = res {
                error!("{err:#}");
                std::process::exit(EXIT_UNREACHABLE);
            }
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, exiting");
            Ok(())
        }
    }
}
