use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::blocking::delay::DelayMs;
use log::{debug, error, info, trace};

use crate::advertisement::PushError;
use crate::bluetooth_error::BluetoothError;
use crate::config::SupervisorConfig;
use crate::connection_cb::ConnectionCallbacks;
use crate::error::{InitError, InitStage};
use crate::host::BleHost;
use crate::platform::{Errno, GattService, McuMgr, SettingsStore};
use crate::services::{AdvertisedService, PayloadSet};
use crate::shutdown::ShutdownToken;

/// Tracks whether a peer is connected.  Written from the host's callback context, read by the
/// advertising loop.  A stale read costs at most one poll interval.
#[derive(Debug, Default)]
pub struct ConnectionMonitor {
  connected: AtomicBool,
}

impl ConnectionMonitor {
  pub fn new() -> Self {
    Default::default()
  }

  pub fn is_connected(&self) -> bool {
    self.connected.load(Ordering::Acquire)
  }
}

impl ConnectionCallbacks for ConnectionMonitor {
  fn on_connected(&self, result: Result<(), BluetoothError>) {
    // A failed attempt still counts as connected until the host reports the disconnect.
    self.connected.store(true, Ordering::Release);

    match result {
      Ok(()) => debug!("Connected"),
      Err(e) => error!("Connection failed (err {:#04x}: {e:?})", u8::from(e)),
    }
  }

  fn on_disconnected(&self, reason: BluetoothError) {
    self.connected.store(false, Ordering::Release);
    debug!("Disconnected (reason {:#04x}: {reason:?})", u8::from(reason));
  }
}

/// Picks which advertisement goes out next.  Flips on every start attempt, successful or not.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct AlternationCursor {
  inet6_next: bool,
}

impl AlternationCursor {
  pub fn peek(&self) -> AdvertisedService {
    if self.inet6_next {
      AdvertisedService::Inet6
    } else {
      AdvertisedService::McuMgr
    }
  }

  /// Return the current selection and move on to the other one.
  pub fn advance(&mut self) -> AdvertisedService {
    let service = self.peek();
    self.inet6_next = !self.inet6_next;
    service
  }
}

/// What a single poll tick did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
  /// A peer is connected; advertising was left alone.
  Connected,

  /// Advertising was restarted with the given service.
  Advertising(AdvertisedService),

  /// The host refused to start advertising.  The next tick tries again.
  StartFailed(AdvertisedService, Errno),
}

/// Keeps the setup peripheral discoverable: while no peer is connected it restarts advertising
/// every poll interval, alternating between the IPv6 configuration and firmware management
/// advertisements.
pub struct AdvertisingSupervisor<H: BleHost> {
  host: H,
  config: SupervisorConfig,
  payloads: PayloadSet,
  connection: Arc<ConnectionMonitor>,
  cursor: AlternationCursor,
}

impl<H: BleHost> AdvertisingSupervisor<H> {
  pub fn new(host: H, config: SupervisorConfig) -> Result<Self, PushError> {
    Ok(Self {
      host,
      config,
      payloads: PayloadSet::new()?,
      connection: Arc::new(ConnectionMonitor::new()),
      cursor: AlternationCursor::default(),
    })
  }

  pub fn host(&self) -> &H {
    &self.host
  }

  pub fn config(&self) -> &SupervisorConfig {
    &self.config
  }

  /// Shared connection state, as registered with the host.
  pub fn connection(&self) -> Arc<ConnectionMonitor> {
    self.connection.clone()
  }

  pub fn is_connected(&self) -> bool {
    self.connection.is_connected()
  }

  pub fn cursor(&self) -> AlternationCursor {
    self.cursor
  }

  pub fn on_connected(&self, result: Result<(), BluetoothError>) {
    self.connection.on_connected(result);
  }

  pub fn on_disconnected(&self, reason: BluetoothError) {
    self.connection.on_disconnected(reason);
  }

  /// Bring up every platform service in order.  The first failure is returned as is and nothing
  /// after it is touched.
  pub fn initialize<S, G, M>(
    &mut self,
    settings: &mut S,
    gatt: &mut G,
    mgmt: &mut M,
  ) -> Result<(), InitError>
  where
    S: SettingsStore,
    G: GattService,
    M: McuMgr,
  {
    settings.init().map_err(|code| fail(InitStage::Settings, code))?;
    gatt.init().map_err(|code| fail(InitStage::GattService, code))?;

    if self.config.register_image_mgmt {
      mgmt.register_image_group();
    }

    self
      .host
      .enable()
      .map_err(|code| fail(InitStage::BluetoothEnable, code))?;
    debug!("Bluetooth initialized");

    self.host.register_connection_callbacks(self.connection.clone());
    mgmt.register_transport();

    info!("Advertising...");
    Ok(())
  }

  /// One poll cycle.
  pub fn tick(&mut self) -> TickOutcome {
    if self.connection.is_connected() {
      trace!("Peer connected, not advertising");
      return TickOutcome::Connected;
    }

    let service = self.cursor.advance();
    if let Err(e) = self.host.stop_advertising() {
      trace!("Advertising stop returned {e}");
    }

    let result = self.host.start_advertising(
      &self.config.advertisement_params,
      self.payloads.advertisement(service),
      Some(self.payloads.scan_response()),
    );
    match result {
      Ok(()) => {
        trace!("Advertising {service:?}");
        TickOutcome::Advertising(service)
      }
      Err(e) => {
        error!("Advertising failed to start (err {e})");
        TickOutcome::StartFailed(service, e)
      }
    }
  }

  /// Poll until `shutdown` is cancelled, which production firmware never does.
  pub fn run<D: DelayMs<u32>>(&mut self, delay: &mut D, shutdown: &ShutdownToken) {
    let interval_ms = self.config.poll_interval_ms();
    while !shutdown.is_cancelled() {
      delay.delay_ms(interval_ms);
      if shutdown.is_cancelled() {
        break;
      }
      self.tick();
    }
    info!("Advertising loop stopped");
  }

  /// [Self::initialize] followed by [Self::run].
  pub fn initialize_and_run<S, G, M, D>(
    &mut self,
    settings: &mut S,
    gatt: &mut G,
    mgmt: &mut M,
    delay: &mut D,
    shutdown: &ShutdownToken,
  ) -> Result<(), InitError>
  where
    S: SettingsStore,
    G: GattService,
    M: McuMgr,
    D: DelayMs<u32>,
  {
    self.initialize(settings, gatt, mgmt)?;
    self.run(delay, shutdown);
    Ok(())
  }
}

fn fail(stage: InitStage, code: Errno) -> InitError {
  let err = InitError::new(stage, code);
  error!("{err}");
  err
}
