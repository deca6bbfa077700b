//! The supervision cycle: bring KStars up, restore the Ekos session, watch
//! it, repeat. Only an exhausted connection budget ends the cycle; every
//! other failure feeds back into the next pass.

mod connector;
mod monitor;
pub(crate) mod retry;
mod sequencer;

pub(crate) use retry::RetryPolicy;

use crate::bus::ControlBus;
use crate::config::SupervisorConfig;
use crate::launcher::Launcher;
use anyhow::{Context, Result};
use tracing::info;

/// Run supervision until KStars stays unreachable through a whole retry
/// budget. Handles from one pass are dropped before the next begins; the
/// bus connection itself is reused throughout.
pub async fn run<B, L>(bus: &B, launcher: &L, cfg: &SupervisorConfig) -> Result<()>
where
    B: ControlBus,
    L: Launcher,
{
    loop {
        let root = connector::connect_or_launch(bus, launcher, cfg)
            .await
            .context("KStars is not coming up")?;
        info!("KStars is running");

        sequencer::restore(bus, &root, cfg).await;

        info!("everything is up and running, initiating the watchdog");
        monitor::watch(bus, cfg).await;
    }
}
