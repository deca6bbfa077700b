use crate::config::SupervisorConfig;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "kstars-watchdog",
    version,
    about = "Keeps KStars running and restores the Ekos session after a crash"
)]
pub struct Cli {
    /// KStars executable to spawn when the session bus has no live instance
    #[arg(short = 'k', long, default_value = "/usr/bin/kstars")]
    pub kstars_executable: PathBuf,

    /// Ekos scheduler job to resume after a restart (default: ~/default.esl)
    #[arg(short = 's', long)]
    pub sched_job: Option<PathBuf>,

    /// Append log output to this file in addition to stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Connection retries before a target is declared unreachable
    #[arg(long, default_value_t = 10)]
    pub max_retries: u32,

    /// Pause between connection attempts
    #[arg(long, default_value = "1s")]
    pub retry_delay: humantime::Duration,

    /// Grace period for KStars to register on the bus after spawning it
    #[arg(long, default_value = "8s")]
    pub warmup: humantime::Duration,

    /// Settling time between parking and unparking the mount
    #[arg(long, default_value = "20s")]
    pub settle: humantime::Duration,

    /// Liveness poll cadence while KStars is healthy
    #[arg(long, default_value = "1s")]
    pub poll_interval: humantime::Duration,

    /// Cooldown before restarting the cycle after KStars disappears
    #[arg(long, default_value = "5s")]
    pub restart_delay: humantime::Duration,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Build a `SupervisorConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> Result<SupervisorConfig> {
    let sched_job = match args.sched_job.clone() {
        Some(path) => path,
        None => dirs::home_dir()
            .context("cannot determine the home directory for the default --sched-job")?
            .join("default.esl"),
    };
    Ok(SupervisorConfig {
        kstars_executable: args.kstars_executable.clone(),
        sched_job,
        max_retries: args.max_retries,
        retry_delay: Duration::from(args.retry_delay),
        warmup: Duration::from(args.warmup),
        settle: Duration::from(args.settle),
        poll_interval: Duration::from(args.poll_interval),
        restart_delay: Duration::from(args.restart_delay),
    })
}
