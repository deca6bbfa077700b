//! Recovery sequence run once per supervision pass.

use crate::bus::{ControlBus, ControlHandle};
use crate::config::SupervisorConfig;
use crate::kstars;
use crate::supervisor::retry::retry;
use tokio::time::sleep;
use tracing::{info, warn};

/// Drive KStars back to its operational state: Ekos started, window raised
/// and, when a scheduler job sits on disk, mount unparked and the job
/// resumed. Every step is best-effort; a step that exhausts its retries is
/// logged and skipped, never fatal.
pub async fn restore<B: ControlBus>(bus: &B, root: &B::Handle, cfg: &SupervisorConfig) {
    let policy = cfg.retry_policy();

    // Safe to repeat: start() is a no-op when Ekos is already up.
    if let Err(err) = retry(policy, "starting Ekos", move || root.call("start")).await {
        warn!("{err}");
    }

    // TODO: trigger() is a toggle, so a pass over an already-visible window
    // hides it again; switch to a visibility-checked raise if KStars ever
    // exposes one on the bus.
    let raise = move || async move {
        let action = bus.acquire(&kstars::SHOW_EKOS).await?;
        action.call("trigger").await
    };
    if let Err(err) = retry(policy, "raising the Ekos window", raise).await {
        warn!("{err}");
    }

    if !cfg.sched_job.exists() {
        info!(
            "no scheduler job at {}, leaving the mount and scheduler alone",
            cfg.sched_job.display()
        );
        return;
    }
    info!("scheduler job found at {}", cfg.sched_job.display());

    restore_mount(bus, cfg).await;
    resume_scheduler(bus, cfg).await;
}

/// Put the mount through a full park/unpark so it starts from a known pose.
/// A mount that already reports parked is unparked straight away.
async fn restore_mount<B: ControlBus>(bus: &B, cfg: &SupervisorConfig) {
    let mount = match retry(cfg.retry_policy(), "connecting to the mount", move || {
        bus.acquire(&kstars::MOUNT)
    })
    .await
    {
        Ok(mount) => mount,
        Err(err) => {
            warn!("could not unpark the mount: {err}");
            return;
        }
    };

    match mount.status().await {
        Ok(status) if status != kstars::MOUNT_PARKED => {
            info!("parking the mount");
            if let Err(err) = mount.call("park").await {
                warn!("park failed, unparking anyway: {err}");
            }
            sleep(cfg.settle).await;
        }
        Ok(_) => info!("mount is already parked"),
        Err(err) => warn!("could not read the mount status, unparking as-is: {err}"),
    }

    info!("unparking the mount");
    if let Err(err) = mount.call("unpark").await {
        warn!("unpark failed: {err}");
    }
}

/// Reload the scheduler job and start it. A failed load leaves the
/// scheduler stopped rather than starting whatever job it still holds.
async fn resume_scheduler<B: ControlBus>(bus: &B, cfg: &SupervisorConfig) {
    let scheduler = match retry(
        cfg.retry_policy(),
        "connecting to the scheduler",
        move || bus.acquire(&kstars::SCHEDULER),
    )
    .await
    {
        Ok(scheduler) => scheduler,
        Err(err) => {
            warn!("could not resume the scheduler job: {err}");
            return;
        }
    };

    let job = cfg.sched_job.to_string_lossy();
    if let Err(err) = scheduler.call_with_arg("loadScheduler", &job).await {
        warn!("could not load the scheduler job: {err}");
        return;
    }
    info!("starting the scheduler with {job}");
    if let Err(err) = scheduler.call("start").await {
        warn!("could not start the scheduler: {err}");
    }
}
