//! Seam between the supervision logic and the session-bus backend.
//!
//! The supervisor only sees [`ControlBus`] and [`ControlHandle`], so the
//! whole recovery cycle can run against a scripted in-process bus in tests.
//! The real implementation lives in [`session`].

mod session;
#[cfg(test)]
pub(crate) mod testing;

pub use session::SessionBus;

use std::fmt;
use thiserror::Error;

/// Address of one object on the control interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteObject {
    pub service: &'static str,
    pub path: &'static str,
    pub interface: &'static str,
}

impl fmt::Display for RemoteObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.service, self.path)
    }
}

/// Failure talking to a remote object.
///
/// The supervisor treats every variant as "target unreachable"; the split
/// only keeps the log lines precise.
#[derive(Debug, Error)]
pub enum BusError {
    #[error("cannot reach {target}: {reason}")]
    Unreachable { target: String, reason: String },
    #[error("{method}() on {target} failed: {reason}")]
    Call {
        target: String,
        method: String,
        reason: String,
    },
    #[error("reading status of {target} failed: {reason}")]
    Status { target: String, reason: String },
}

impl BusError {
    pub fn unreachable(target: &RemoteObject, reason: impl fmt::Display) -> Self {
        BusError::Unreachable {
            target: target.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn call(target: &RemoteObject, method: &str, reason: impl fmt::Display) -> Self {
        BusError::Call {
            target: target.to_string(),
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn status(target: &RemoteObject, reason: impl fmt::Display) -> Self {
        BusError::Status {
            target: target.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Connection to the control interface; hands out per-object handles.
pub trait ControlBus {
    type Handle: ControlHandle;

    /// Bind to one remote object, verifying the peer actually answers for it.
    async fn acquire(&self, target: &RemoteObject) -> Result<Self::Handle, BusError>;
}

/// Live handle to one remote object. Handles are acquired fresh for each
/// supervision step and never cached across a liveness loss.
pub trait ControlHandle {
    /// Invoke a no-argument method, discarding the reply.
    async fn call(&self, method: &str) -> Result<(), BusError>;

    /// Invoke a method taking a single string argument, discarding the reply.
    async fn call_with_arg(&self, method: &str, arg: &str) -> Result<(), BusError>;

    /// Read the object's integer `status` property.
    async fn status(&self) -> Result<i32, BusError>;
}
