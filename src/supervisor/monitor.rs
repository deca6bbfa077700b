//! Health monitor: poll KStars liveness until it goes away.

use crate::bus::ControlBus;
use crate::config::SupervisorConfig;
use crate::kstars;
use tokio::time::sleep;
use tracing::warn;

/// Poll the Ekos root object once per interval. The first failed poll ends
/// the watch: the loss is logged, the restart cooldown elapses and the
/// caller gets control back to begin a fresh recovery cycle. There is no
/// retry budget here, liveness has to hold on every poll.
pub async fn watch<B: ControlBus>(bus: &B, cfg: &SupervisorConfig) {
    loop {
        match bus.acquire(&kstars::EKOS).await {
            Ok(_) => sleep(cfg.poll_interval).await,
            Err(err) => {
                warn!(
                    "KStars has been closed or crashed, restarting in {}: {err}",
                    humantime::format_duration(cfg.restart_delay)
                );
                sleep(cfg.restart_delay).await;
                return;
            }
        }
    }
}
