//! Service UUIDs the setup peripheral advertises, and the fixed payloads built from them.

use crate::advertisement::{
  AdvertisementPayload, AdvertisementPayloadBuilder, PushError, ScanResponsePayload,
};
use crate::uuid::UUID;

/// Peer IPv6 configuration GATT service.
pub const INET6_SERVICE_UUID: UUID = UUID::from_le_bytes([
  0x70, 0x14, 0x1c, 0xbe, 0xdd, 0xe6, 0x5a, 0xb3, 0x8b, 0x49, 0xb4, 0x5d, 0x83, 0x11, 0x60, 0x49,
]);

/// SMP (mcumgr) firmware management service.
pub const MCUMGR_SERVICE_UUID: UUID = UUID::from_le_bytes([
  0x84, 0xaa, 0x60, 0x74, 0x52, 0x8a, 0x8b, 0x86, 0xd3, 0x4c, 0xb7, 0x1d, 0x1d, 0xdc, 0x53, 0x8d,
]);

/// OpenThread settings GATT service, carried in the scan response.
pub const OT_SETTINGS_SERVICE_UUID: UUID = UUID::from_le_bytes([
  0x30, 0x0d, 0x90, 0xb4, 0x7b, 0x81, 0xec, 0x9b, 0x41, 0xd4, 0x9a, 0xaa, 0x9c, 0xe4, 0xa9, 0xa8,
]);

/// Which of the two advertisements goes out.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AdvertisedService {
  Inet6,
  McuMgr,
}

impl AdvertisedService {
  pub fn uuid(self) -> UUID {
    match self {
      AdvertisedService::Inet6 => INET6_SERVICE_UUID,
      AdvertisedService::McuMgr => MCUMGR_SERVICE_UUID,
    }
  }
}

/// The two alternating advertisements plus the scan response shared by both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSet {
  inet6: AdvertisementPayload,
  mcumgr: AdvertisementPayload,
  scan_response: ScanResponsePayload,
}

impl PayloadSet {
  pub fn new() -> Result<Self, PushError> {
    Ok(Self {
      inet6: service_advertisement(AdvertisedService::Inet6)?,
      mcumgr: service_advertisement(AdvertisedService::McuMgr)?,
      scan_response: AdvertisementPayloadBuilder::for_scan_response()
        .push_service_uuids(&[OT_SETTINGS_SERVICE_UUID], false)?
        .build()?,
    })
  }

  pub fn advertisement(&self, service: AdvertisedService) -> &AdvertisementPayload {
    match service {
      AdvertisedService::Inet6 => &self.inet6,
      AdvertisedService::McuMgr => &self.mcumgr,
    }
  }

  pub fn scan_response(&self) -> &ScanResponsePayload {
    &self.scan_response
  }
}

fn service_advertisement(service: AdvertisedService) -> Result<AdvertisementPayload, PushError> {
  AdvertisementPayloadBuilder::new()
    .push_service_uuids(&[service.uuid()], false)?
    .build()
}
