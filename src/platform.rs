//! Platform services the supervisor brings up before advertising.  Each is owned by the
//! surrounding firmware; this crate only sequences them.

use core::fmt::{Display, Formatter};

/// Raw error code handed back by a platform service, passed through untouched.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Errno(pub i32);

impl Display for Errno {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Persistent settings backend (OpenThread credentials and friends).
pub trait SettingsStore {
  fn init(&mut self) -> Result<(), Errno>;
}

/// GATT service through which a peer configures the gateway's IPv6 parameters.
pub trait GattService {
  fn init(&mut self) -> Result<(), Errno>;
}

/// Firmware management over SMP.
pub trait McuMgr {
  /// Register the image management command group.
  fn register_image_group(&mut self);

  /// Attach the SMP transport to the BLE host.  Must run after the host is enabled.
  fn register_transport(&mut self);
}
