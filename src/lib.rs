#![no_std]

extern crate alloc;

pub mod advertisement;
pub mod bluetooth_error;
pub mod config;
pub mod connection_cb;
pub mod error;
pub mod host;
pub mod platform;
pub mod services;
pub mod shutdown;
pub mod supervisor;
pub mod uuid;

pub mod prelude {
  pub use crate::advertisement::*;
  pub use crate::bluetooth_error::*;
  pub use crate::config::*;
  pub use crate::connection_cb::*;
  pub use crate::error::*;
  pub use crate::host::*;
  pub use crate::platform::*;
  pub use crate::services::*;
  pub use crate::shutdown::*;
  pub use crate::supervisor::*;
  pub use crate::uuid::*;
}
