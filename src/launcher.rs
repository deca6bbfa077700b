use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Spawns the supervised process.
pub trait Launcher {
    fn launch(&self) -> Result<()>;
}

/// Launches KStars fire-and-forget: stdio discarded, own process group, the
/// child handle dropped without reaping. Whether the spawned instance
/// actually came up is decided by the next connection attempt, not here.
pub struct KStarsLauncher {
    executable: PathBuf,
}

impl KStarsLauncher {
    pub fn new(executable: PathBuf) -> Self {
        KStarsLauncher { executable }
    }
}

impl Launcher for KStarsLauncher {
    fn launch(&self) -> Result<()> {
        let mut command = Command::new(&self.executable);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        // Own process group, so a Ctrl-C aimed at the watchdog does not take
        // KStars down with it.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }
        command
            .spawn()
            .map(drop)
            .with_context(|| format!("cannot spawn {}", self.executable.display()))
    }
}

/// Test double counting launch requests, optionally refusing them.
#[cfg(test)]
pub(crate) struct CountingLauncher {
    spawned: std::sync::atomic::AtomicU32,
    fail: bool,
}

#[cfg(test)]
impl CountingLauncher {
    pub(crate) fn new() -> Self {
        CountingLauncher {
            spawned: std::sync::atomic::AtomicU32::new(0),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        CountingLauncher {
            spawned: std::sync::atomic::AtomicU32::new(0),
            fail: true,
        }
    }

    pub(crate) fn count(&self) -> u32 {
        self.spawned.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl Launcher for CountingLauncher {
    fn launch(&self) -> Result<()> {
        self.spawned
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.fail {
            Err(anyhow::anyhow!("spawn refused"))
        } else {
            Ok(())
        }
    }
}
