use core::fmt::{Display, Formatter};

use crate::platform::Errno;

/// Initialization steps that can fail.  Registrations are fire-and-forget and never show up here.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InitStage {
  Settings,
  GattService,
  BluetoothEnable,
}

impl Display for InitStage {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    let name = match self {
      InitStage::Settings => "Settings storage",
      InitStage::GattService => "IPv6 config GATT service",
      InitStage::BluetoothEnable => "Bluetooth enable",
    };
    f.write_str(name)
  }
}

/// Startup aborted at `stage`, which reported `code`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InitError {
  pub stage: InitStage,
  pub code: Errno,
}

impl InitError {
  pub fn new(stage: InitStage, code: Errno) -> Self {
    Self { stage, code }
  }
}

impl Display for InitError {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    write!(f, "{} init failed (err {})", self.stage, self.code)
  }
}
