//! Connector: reach the Ekos root object, spawning KStars when it is gone.

use crate::bus::ControlBus;
use crate::config::SupervisorConfig;
use crate::kstars;
use crate::launcher::Launcher;
use crate::supervisor::retry::{retry_with_recovery, Exhausted};
use tokio::time::sleep;
use tracing::{error, info};

/// Acquire the Ekos root object, launching KStars after each failed attempt
/// and giving it `warmup` to register on the bus. A slow starter can
/// legitimately be spawned more than once within one budget; exhausting the
/// budget is the watchdog's one definitive failure.
pub async fn connect_or_launch<B, L>(
    bus: &B,
    launcher: &L,
    cfg: &SupervisorConfig,
) -> Result<B::Handle, Exhausted>
where
    B: ControlBus,
    L: Launcher,
{
    let warmup = cfg.warmup;
    retry_with_recovery(
        cfg.retry_policy(),
        "connecting to KStars",
        move || bus.acquire(&kstars::EKOS),
        move || async move {
            info!("starting KStars");
            match launcher.launch() {
                Ok(()) => sleep(warmup).await,
                Err(err) => error!("could not start KStars: {err:#}"),
            }
        },
    )
    .await
}
