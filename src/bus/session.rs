//! Session-bus backend for the control seam, built on zbus.

use crate::bus::{BusError, ControlBus, ControlHandle, RemoteObject};
use anyhow::{Context, Result};
use zbus::zvariant::OwnedValue;
use zbus::Connection;

/// Shared session-bus connection, one per watchdog process. The connection
/// survives every restart cycle and is only released when the process exits.
pub struct SessionBus {
    conn: Connection,
}

impl SessionBus {
    /// Connect to the D-Bus session bus.
    pub async fn connect() -> Result<Self> {
        let conn = Connection::session()
            .await
            .context("cannot connect to the D-Bus session bus")?;
        Ok(SessionBus { conn })
    }
}

impl ControlBus for SessionBus {
    type Handle = SessionHandle;

    async fn acquire(&self, target: &RemoteObject) -> Result<Self::Handle, BusError> {
        // Introspect at bind time, so a dead KStars or a module it has not
        // registered yet fails here, inside the caller's retry budget, and
        // not on the first method call.
        let reply = self
            .conn
            .call_method(
                Some(target.service),
                target.path,
                Some("org.freedesktop.DBus.Introspectable"),
                "Introspect",
                &(),
            )
            .await
            .map_err(|err| BusError::unreachable(target, &err))?;
        let xml: String = reply
            .body()
            .deserialize()
            .map_err(|err| BusError::unreachable(target, &err))?;
        if !xml.contains(target.interface) {
            return Err(BusError::unreachable(
                target,
                format!("object does not expose {}", target.interface),
            ));
        }
        Ok(SessionHandle {
            conn: self.conn.clone(),
            target: *target,
        })
    }
}

/// Handle to one remote object, valid for as long as the peer stays up.
pub struct SessionHandle {
    conn: Connection,
    target: RemoteObject,
}

impl ControlHandle for SessionHandle {
    async fn call(&self, method: &str) -> Result<(), BusError> {
        self.conn
            .call_method(
                Some(self.target.service),
                self.target.path,
                Some(self.target.interface),
                method,
                &(),
            )
            .await
            .map(drop)
            .map_err(|err| BusError::call(&self.target, method, &err))
    }

    async fn call_with_arg(&self, method: &str, arg: &str) -> Result<(), BusError> {
        self.conn
            .call_method(
                Some(self.target.service),
                self.target.path,
                Some(self.target.interface),
                method,
                &(arg,),
            )
            .await
            .map(drop)
            .map_err(|err| BusError::call(&self.target, method, &err))
    }

    async fn status(&self) -> Result<i32, BusError> {
        let reply = self
            .conn
            .call_method(
                Some(self.target.service),
                self.target.path,
                Some("org.freedesktop.DBus.Properties"),
                "Get",
                &(self.target.interface, "status"),
            )
            .await
            .map_err(|err| BusError::status(&self.target, &err))?;
        let value: OwnedValue = reply
            .body()
            .deserialize()
            .map_err(|err| BusError::status(&self.target, &err))?;
        i32::try_from(value).map_err(|err| BusError::status(&self.target, &err))
    }
}
