//! Scripted in-process control bus for supervisor tests.
//!
//! Acquisitions pop per-path scripted outcomes; every operation lands in a
//! chronological log together with the (paused-clock) instant it happened,
//! so tests can assert call order and the waits between calls. An
//! acquisition with nothing scripted panics, keeping tests deterministic.

use crate::bus::{BusError, ControlBus, ControlHandle, RemoteObject};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// Scripted outcome for one acquisition of one path.
#[derive(Debug, Clone)]
pub(crate) enum Outcome {
    /// Acquisition succeeds and yields a handle behaving like this object.
    Up(FakeObject),
    /// Acquisition fails.
    Down,
}

/// Behavior of one scripted handle.
#[derive(Debug, Clone)]
pub(crate) struct FakeObject {
    pub status: i32,
    pub deny: &'static [&'static str],
    pub status_err: bool,
}

impl FakeObject {
    /// Reachable object answering every call, reporting an unparked status.
    pub(crate) fn healthy() -> Self {
        FakeObject {
            status: 0,
            deny: &[],
            status_err: false,
        }
    }

    pub(crate) fn parked() -> Self {
        FakeObject {
            status: crate::kstars::MOUNT_PARKED,
            ..Self::healthy()
        }
    }

    pub(crate) fn status_unreadable() -> Self {
        FakeObject {
            status_err: true,
            ..Self::healthy()
        }
    }

    /// Healthy object refusing the named methods.
    pub(crate) fn denying(deny: &'static [&'static str]) -> Self {
        FakeObject {
            deny,
            ..Self::healthy()
        }
    }
}

#[derive(Debug, Default)]
struct State {
    scripts: HashMap<&'static str, VecDeque<Outcome>>,
    log: Vec<(String, Instant)>,
}

pub(crate) struct FakeBus {
    state: Arc<Mutex<State>>,
}

impl FakeBus {
    pub(crate) fn new() -> Self {
        FakeBus {
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Queue outcomes for successive acquisitions of `path`.
    pub(crate) fn script(&self, path: &'static str, outcomes: impl IntoIterator<Item = Outcome>) {
        let mut state = self.state.lock().unwrap();
        state.scripts.entry(path).or_default().extend(outcomes);
    }

    /// Script `failures` refused acquisitions followed by one healthy handle.
    pub(crate) fn fail_then_up(&self, path: &'static str, failures: usize) {
        self.script(
            path,
            std::iter::repeat(Outcome::Down)
                .take(failures)
                .chain([Outcome::Up(FakeObject::healthy())]),
        );
    }

    /// Chronological operation log.
    pub(crate) fn calls(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.log.iter().map(|(op, _)| op.clone()).collect()
    }

    /// Chronological operation log with capture instants.
    pub(crate) fn timed(&self) -> Vec<(String, Instant)> {
        self.state.lock().unwrap().log.clone()
    }
}

impl ControlBus for FakeBus {
    type Handle = FakeHandle;

    async fn acquire(&self, target: &RemoteObject) -> Result<Self::Handle, BusError> {
        let mut state = self.state.lock().unwrap();
        let outcome = state
            .scripts
            .get_mut(target.path)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| panic!("no scripted outcome left for {}", target.path));
        match outcome {
            Outcome::Up(object) => {
                state
                    .log
                    .push((format!("acquire {} ok", target.path), Instant::now()));
                Ok(FakeHandle {
                    target: *target,
                    object,
                    state: Arc::clone(&self.state),
                })
            }
            Outcome::Down => {
                state
                    .log
                    .push((format!("acquire {} down", target.path), Instant::now()));
                Err(BusError::unreachable(target, "scripted outage"))
            }
        }
    }
}

#[derive(Debug)]
pub(crate) struct FakeHandle {
    target: RemoteObject,
    object: FakeObject,
    state: Arc<Mutex<State>>,
}

impl FakeHandle {
    fn log(&self, op: String) {
        self.state.lock().unwrap().log.push((op, Instant::now()));
    }
}

impl ControlHandle for FakeHandle {
    async fn call(&self, method: &str) -> Result<(), BusError> {
        self.log(format!("call {} {}", self.target.path, method));
        if self.object.deny.contains(&method) {
            return Err(BusError::call(&self.target, method, "scripted refusal"));
        }
        Ok(())
    }

    async fn call_with_arg(&self, method: &str, arg: &str) -> Result<(), BusError> {
        self.log(format!("call {} {}({})", self.target.path, method, arg));
        if self.object.deny.contains(&method) {
            return Err(BusError::call(&self.target, method, "scripted refusal"));
        }
        Ok(())
    }

    async fn status(&self) -> Result<i32, BusError> {
        self.log(format!("status {}", self.target.path));
        if self.object.status_err {
            return Err(BusError::status(&self.target, "scripted failure"));
        }
        Ok(self.object.status)
    }
}
