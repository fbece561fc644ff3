use core::time::Duration;

use crate::advertisement::AdvertisementParams;

/// How often the supervisor wakes up to (re)start advertising while nobody is connected.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::manual_non_exhaustive)]
pub struct SupervisorConfig {
  /// Sleep between two poll ticks.  This is also the retry interval after a failed start.
  pub poll_interval: Duration,

  /// Register the firmware image management command group during initialization.  Defaults to
  /// whether the `img-mgmt` feature is enabled.
  pub register_image_mgmt: bool,

  /// Parameters used for every advertising start.
  pub advertisement_params: AdvertisementParams,

  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl Default for SupervisorConfig {
  fn default() -> Self {
    Self {
      poll_interval: DEFAULT_POLL_INTERVAL,
      register_image_mgmt: cfg!(feature = "img-mgmt"),
      advertisement_params: AdvertisementParams::default(),
      _non_exhaustive: (),
    }
  }
}

impl SupervisorConfig {
  /// Poll interval in the unit accepted by the delay provider, saturating at `u32::MAX`.
  pub fn poll_interval_ms(&self) -> u32 {
    u32::try_from(self.poll_interval.as_millis()).unwrap_or(u32::MAX)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = SupervisorConfig::default();
    assert_eq!(config.poll_interval_ms(), 500);
    assert_eq!(config.register_image_mgmt, cfg!(feature = "img-mgmt"));
    assert!(config.advertisement_params.include_name);
  }

  #[test]
  fn test_poll_interval_saturates() {
    let config = SupervisorConfig {
      poll_interval: Duration::from_secs(u64::MAX),
      ..Default::default()
    };
    assert_eq!(config.poll_interval_ms(), u32::MAX);
  }
}
