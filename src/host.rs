use alloc::sync::Arc;

use crate::advertisement::{AdvertisementParams, AdvertisementPayload, ScanResponsePayload};
use crate::connection_cb::ConnectionCallbacks;
use crate::platform::Errno;

/// The parts of a BLE host stack the setup peripheral drives.  This is meant to be a thin mapping
/// onto the platform's own API (Zephyr, SoftDevice, BlueZ...), not a safe high level abstraction.
pub trait BleHost {
  /// Bring up the controller and host.  Must succeed before anything else is called.
  fn enable(&mut self) -> Result<(), Errno>;

  /// Register the listener for connection events.  The host keeps the reference for as long as
  /// it runs and calls it from its own context.
  fn register_connection_callbacks(&mut self, callbacks: Arc<dyn ConnectionCallbacks + Send + Sync>);

  /// Stop any advertising in progress.  Stopping while idle is not an error for most hosts.
  fn stop_advertising(&mut self) -> Result<(), Errno>;

  /// Start advertising `advertisement`, answering scan requests with `scan_response` when set.
  /// Note that hosts typically stop advertising on their own once a peer connects.
  fn start_advertising(
    &mut self,
    params: &AdvertisementParams,
    advertisement: &AdvertisementPayload,
    scan_response: Option<&ScanResponsePayload>,
  ) -> Result<(), Errno>;
}
