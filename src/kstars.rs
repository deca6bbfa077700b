//! Well-known addresses on the KStars control interface.

use crate::bus::RemoteObject;

/// Bus name KStars claims on the session bus.
pub const SERVICE: &str = "org.kde.kstars";

/// Ekos root object. `start()` brings Ekos up and is safe to repeat.
pub const EKOS: RemoteObject = RemoteObject {
    service: SERVICE,
    path: "/KStars/Ekos",
    interface: "org.kde.kstars.Ekos",
};

/// Main-window action whose `trigger()` toggles the Ekos window.
pub const SHOW_EKOS: RemoteObject = RemoteObject {
    service: SERVICE,
    path: "/kstars/MainWindow_1/actions/show_ekos",
    interface: "org.qtproject.Qt.QAction",
};

/// Mount module, registered once an Ekos profile is running.
pub const MOUNT: RemoteObject = RemoteObject {
    service: SERVICE,
    path: "/KStars/Ekos/Mount",
    interface: "org.kde.kstars.Ekos.Mount",
};

/// Ekos scheduler module.
pub const SCHEDULER: RemoteObject = RemoteObject {
    service: SERVICE,
    path: "/KStars/Ekos/Scheduler",
    interface: "org.kde.kstars.Ekos.Scheduler",
};

/// Value of the mount `status` property while the mount is parked.
pub const MOUNT_PARKED: i32 = 4;
