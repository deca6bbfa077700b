use crate::supervisor::RetryPolicy;
use std::path::PathBuf;
use std::time::Duration;

/// Immutable settings for one watchdog run.
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    pub kstars_executable: PathBuf,
    pub sched_job: PathBuf,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub warmup: Duration,
    pub settle: Duration,
    pub poll_interval: Duration,
    pub restart_delay: Duration,
}

impl SupervisorConfig {
    /// Retry policy shared by every guarded control call.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            delay: self.retry_delay,
        }
    }
}

#[cfg(test)]
impl SupervisorConfig {
    /// Stock configuration; tests override individual fields as needed.
    pub(crate) fn for_tests(sched_job: PathBuf) -> Self {
        SupervisorConfig {
            kstars_executable: PathBuf::from("/usr/bin/kstars"),
            sched_job,
            max_retries: 10,
            retry_delay: Duration::from_secs(1),
            warmup: Duration::from_secs(8),
            settle: Duration::from_secs(20),
            poll_interval: Duration::from_secs(1),
            restart_delay: Duration::from_secs(5),
        }
    }
}
