//! Bounded retry with a recovery hook, shared by every guarded control call.

use crate::bus::BusError;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::warn;

/// Attempt budget and backoff for one guarded operation.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

/// Terminal failure of a guarded operation: the retry budget ran out.
#[derive(Debug, Error)]
#[error("{label}: giving up after {attempts} failed attempts: {last}")]
pub struct Exhausted {
    pub(crate) label: String,
    pub(crate) attempts: u32,
    pub(crate) last: BusError,
}

/// Run `op` until it succeeds, sleeping `policy.delay` after every failure
/// and running `recover` before each fresh attempt. Gives up once the
/// failure count exceeds `policy.max_retries`, so `recover` never runs
/// after the deciding failure.
pub async fn retry_with_recovery<T, Op, OpFut, Rec, RecFut>(
    policy: RetryPolicy,
    label: &str,
    mut op: Op,
    mut recover: Rec,
) -> Result<T, Exhausted>
where
    Op: FnMut() -> OpFut,
    OpFut: Future<Output = Result<T, BusError>>,
    Rec: FnMut() -> RecFut,
    RecFut: Future<Output = ()>,
{
    let mut failures = 0u32;
    loop {
        let err = match op().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        sleep(policy.delay).await;
        failures += 1;
        if failures > policy.max_retries {
            return Err(Exhausted {
                label: label.to_string(),
                attempts: failures,
                last: err,
            });
        }
        warn!(
            "{label} failed, retrying ({failures} of {}): {err}",
            policy.max_retries
        );
        recover().await;
    }
}

/// [`retry_with_recovery`] with nothing to do between attempts.
pub async fn retry<T, Op, OpFut>(policy: RetryPolicy, label: &str, op: Op) -> Result<T, Exhausted>
where
    Op: FnMut() -> OpFut,
    OpFut: Future<Output = Result<T, BusError>>,
{
    retry_with_recovery(policy, label, op, || async {}).await
}
