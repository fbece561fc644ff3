use core::ops::Deref;
use core::time::Duration;

use enumset::{EnumSet, EnumSetType};

use crate::uuid::UUID;

/// Maximum size of a legacy advertising or scan response PDU payload.
pub const MAX_AD_LEN: usize = 31;

#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::manual_non_exhaustive)]
pub struct AdvertisementParams {
  /// Can a peer connect to us, and using what mechanism?
  pub connect_mode: ConnectMode,

  /// Ask the host to append the device name to the scan response.
  pub include_name: bool,

  /// Minimum advertising interval to be used by the advertising set.  Acceptable values are
  /// in the range [20ms, 10,485s].  Left to the host when unset.
  pub interval_min: Option<Duration>,

  /// Maximum advertising interval to be used by the advertising set.  Acceptable values are
  /// in the range [20ms, 10,485s].  Left to the host when unset.
  pub interval_max: Option<Duration>,

  // Not using #[non_exhaustive] because it doesn't support construction using
  // `..Default::default()`.
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl Default for AdvertisementParams {
  /// Connectable, undirected and carrying the device name.
  fn default() -> Self {
    Self {
      connect_mode: ConnectMode::Undirected,
      include_name: true,
      interval_min: None,
      interval_max: None,
      _non_exhaustive: (),
    }
  }
}

/// Whether and how this peripheral is connectable.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConnectMode {
  /// Connections from any address are allowed.  If unsure, this is probably what you want to use.
  Undirected = 0b0000,

  /// Connections are allowed only from a specific address.
  Directed = 0b0001,

  /// Connections are not allowed.
  None = 0b0010,
}

/// Bits of the Flags AD type.  The discriminant is the bit position.
#[derive(Debug, EnumSetType)]
#[enumset(repr = "u8")]
pub enum AdFlag {
  LeLimitedDiscoverable = 0,
  LeGeneralDiscoverable = 1,
  BrEdrNotSupported = 2,
  SimultaneousLeBrEdrController = 3,
  SimultaneousLeBrEdrHost = 4,
}

/// Whether and how this peripheral is discovered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DiscoverMode {
  /// This device can only be discovered when a central device is following the limited
  /// discovery procedure.
  Limited,

  /// General discovery.  This is the normal discovery mode that most customers would use.
  General,

  /// Device is not discoverable (whether the device is connectable is determined independently).
  None,
}

impl DiscoverMode {
  fn flags(self) -> EnumSet<AdFlag> {
    match self {
      DiscoverMode::Limited => AdFlag::LeLimitedDiscoverable.into(),
      DiscoverMode::General => AdFlag::LeGeneralDiscoverable.into(),
      DiscoverMode::None => EnumSet::empty(),
    }
  }
}

/// Advertisements consist of one or more ad type units in a TLV-style format (but actually it's
/// LTV).  Note that this list is not exhaustive but is provided as a convenience.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum AdType {
  Flags = 0x01,
  PartialServiceUuids16 = 0x02,
  CompleteServiceUuids16 = 0x03,
  PartialServiceUuids128 = 0x06,
  CompleteServiceUuids128 = 0x07,
  ShortLocalName = 0x08,
  LongLocalName = 0x09,
  ServiceData16 = 0x16,
  ServiceData128 = 0x21,
  ManufacturerData = 0xff,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PushError {
  CapacityExceeded,
  UuidInputError,
  FlagsNotAllowed,
}

pub type AdvertisementPayloadBuilder = RawAdvertisementBuilder<MAX_AD_LEN>;

/// Helper to facilitate creating correctly structured advertisement PDUs.  The Flags record is
/// always emitted first regardless of when the flags were set.
#[derive(Debug, Clone)]
pub struct RawAdvertisementBuilder<const N: usize> {
  raw: heapless::Vec<u8, N>,
  flags: EnumSet<AdFlag>,
  omit_flags: bool,
}

impl<const N: usize> Default for RawAdvertisementBuilder<N> {
  fn default() -> Self {
    Self::new()
  }
}

impl<const N: usize> RawAdvertisementBuilder<N> {
  /// Builder for an advertising payload, starting with general discoverable and BR/EDR not
  /// supported flags.
  pub fn new() -> Self {
    Self {
      raw: heapless::Vec::new(),
      flags: AdFlag::LeGeneralDiscoverable | AdFlag::BrEdrNotSupported,
      omit_flags: false,
    }
  }

  /// Builder for a scan response payload, which never carries a Flags record.
  pub fn for_scan_response() -> Self {
    Self {
      raw: heapless::Vec::new(),
      flags: EnumSet::empty(),
      omit_flags: true,
    }
  }

  /// Set the discover mode.
  pub fn set_discover_mode(mut self, discover_mode: DiscoverMode) -> Self {
    let mode_mask = AdFlag::LeLimitedDiscoverable | AdFlag::LeGeneralDiscoverable;
    self.flags = (self.flags - mode_mask) | discover_mode.flags();
    self
  }

  /// Indicate that Bluetooth Classic (BR/EDR) is _NOT_ supported.
  pub fn set_classic_not_supported(mut self, classic_not_supported: bool) -> Self {
    if classic_not_supported {
      self.flags.insert(AdFlag::BrEdrNotSupported);
    } else {
      self.flags.remove(AdFlag::BrEdrNotSupported);
    }
    self
  }

  /// Push a list of service UUIDs.  All UUIDs must share the same width.  `complete` tells
  /// scanners whether more UUIDs of this width exist than the ones listed.
  pub fn push_service_uuids(mut self, uuids: &[UUID], complete: bool) -> Result<Self, PushError> {
    let size_of_item = Self::require_equal_size(uuids)?;
    let ad_type = match (size_of_item, complete) {
      (2, true) => AdType::CompleteServiceUuids16,
      (2, false) => AdType::PartialServiceUuids16,
      (_, true) => AdType::CompleteServiceUuids128,
      (_, false) => AdType::PartialServiceUuids128,
    };

    self = self.push_start_record(ad_type as _, size_of_item * uuids.len())?;
    for uuid in uuids {
      uuid
        .push_into(&mut self.raw)
        .map_err(|_| PushError::CapacityExceeded)?;
    }

    Ok(self)
  }

  fn require_equal_size(uuids: &[UUID]) -> Result<usize, PushError> {
    let mut size = None;
    for uuid in uuids {
      let size_of = uuid.encoded_len();
      if size.get_or_insert(size_of) != &size_of {
        return Err(PushError::UuidInputError);
      }
    }
    size.ok_or(PushError::UuidInputError)
  }

  /// Push an arbitrary record.  Flags are managed by the builder and cannot be pushed this way.
  pub fn push_raw_ad_type(mut self, ad_type: u8, data: &[u8]) -> Result<Self, PushError> {
    if ad_type == AdType::Flags as u8 {
      return Err(PushError::FlagsNotAllowed);
    }
    self = self.push_start_record(ad_type, data.len())?;
    self
      .raw
      .extend_from_slice(data)
      .map_err(|_| PushError::CapacityExceeded)?;
    Ok(self)
  }

  fn push_start_record(mut self, ad_type: u8, remaining_size: usize) -> Result<Self, PushError> {
    if self.flags_len() + self.raw.len() + 2 + remaining_size > N {
      return Err(PushError::CapacityExceeded);
    }
    let length = u8::try_from(remaining_size + 1).map_err(|_| PushError::CapacityExceeded)?;

    self
      .raw
      .extend_from_slice(&[length, ad_type])
      .map_err(|_| PushError::CapacityExceeded)?;
    Ok(self)
  }

  fn flags_len(&self) -> usize {
    if self.omit_flags || self.flags.is_empty() {
      0
    } else {
      3
    }
  }

  pub fn build(self) -> Result<RawAdvertisement<N>, PushError> {
    let mut out = heapless::Vec::new();
    if self.flags_len() > 0 {
      out
        .extend_from_slice(&[0x02, AdType::Flags as u8, self.flags.as_u8()])
        .map_err(|_| PushError::CapacityExceeded)?;
    }
    out
      .extend_from_slice(&self.raw)
      .map_err(|_| PushError::CapacityExceeded)?;
    Ok(RawAdvertisement(out))
  }
}

/// Represents the raw payload for an advertisement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAdvertisement<const N: usize>(pub heapless::Vec<u8, N>);

impl<const N: usize> Deref for RawAdvertisement<N> {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

pub type AdvertisementPayload = RawAdvertisement<MAX_AD_LEN>;
pub type ScanResponsePayload = RawAdvertisement<MAX_AD_LEN>;

#[cfg(test)]
pub(crate) mod tests {
  extern crate std;
  extern crate alloc;

  use alloc::vec;
  use alloc::vec::Vec;
  use std::io::Cursor;
  use std::io::Read;

  use byteorder::ReadBytesExt;

  use super::*;

  #[test]
  pub fn test_flags_default_encoding() {
    let adv = AdvertisementPayloadBuilder::new().build().unwrap();

    assert_eq!(&adv[..], [0x02, 0x01, 0x06]);
  }

  #[test]
  pub fn test_flags_non_default_encoding() {
    let adv = AdvertisementPayloadBuilder::new()
      .set_discover_mode(DiscoverMode::Limited)
      .set_classic_not_supported(true)
      .build()
      .unwrap();

    assert_eq!(&adv[..], [0x02, 0x01, 0b0000_0101]);
  }

  #[test]
  pub fn test_discover_mode_replaces_previous_mode() {
    let adv = AdvertisementPayloadBuilder::new()
      .set_discover_mode(DiscoverMode::Limited)
      .set_discover_mode(DiscoverMode::General)
      .build()
      .unwrap();

    assert_eq!(&adv[..], [0x02, 0x01, 0b0000_0110]);
  }

  #[test]
  pub fn test_scan_response_has_no_flags() {
    let rsp = AdvertisementPayloadBuilder::for_scan_response()
      .push_service_uuids(&[UUID::Short(0x180a)], true)
      .unwrap()
      .build()
      .unwrap();

    assert_eq!(&rsp[..], [0x03, 0x03, 0x0a, 0x18]);
  }

  #[test]
  pub fn test_partial_128_bit_uuid_list() {
    let uuid = 0x0123456789abcdef_u128;
    let adv = AdvertisementPayloadBuilder::new()
      .push_service_uuids(&[UUID::Long(uuid)], false)
      .unwrap()
      .build()
      .unwrap();

    let mut iter = AdRecordIter::new(&adv);
    assert_eq!(iter.next(), Some(AdRecord::new(AdType::Flags, &[0x06])));
    assert_eq!(
      iter.next(),
      Some(AdRecord::new(AdType::PartialServiceUuids128, &uuid.to_le_bytes()))
    );
    assert_eq!(iter.next(), None);
  }

  #[test]
  pub fn test_mixed_uuid_widths_rejected() {
    let result = AdvertisementPayloadBuilder::new()
      .push_service_uuids(&[UUID::Short(1), UUID::Long(2)], true);
    assert_eq!(result.err(), Some(PushError::UuidInputError));

    let result = AdvertisementPayloadBuilder::new().push_service_uuids(&[], true);
    assert_eq!(result.err(), Some(PushError::UuidInputError));
  }

  #[test]
  pub fn test_capacity_exceeded() {
    // Flags (3) and one 128-bit list (18) leave 10 bytes, too few for another 128-bit list.
    let result = AdvertisementPayloadBuilder::new()
      .push_service_uuids(&[UUID::Long(1)], false)
      .unwrap()
      .push_service_uuids(&[UUID::Long(2)], false);
    assert_eq!(result.err(), Some(PushError::CapacityExceeded));
  }

  #[test]
  pub fn test_flags_record_comes_first() {
    let adv = AdvertisementPayloadBuilder::new()
      .push_service_uuids(&[UUID::Short(0x180a)], true)
      .unwrap()
      .set_discover_mode(DiscoverMode::Limited)
      .build()
      .unwrap();

    assert_eq!(&adv[..], [0x02, 0x01, 0b0000_0101, 0x03, 0x03, 0x0a, 0x18]);
  }

  #[test]
  pub fn test_no_flags_record_when_empty() {
    let adv = AdvertisementPayloadBuilder::new()
      .set_discover_mode(DiscoverMode::None)
      .set_classic_not_supported(false)
      .build()
      .unwrap();

    assert!(adv.is_empty());
  }

  #[test]
  pub fn test_flags_cannot_be_pushed_raw() {
    let result = AdvertisementPayloadBuilder::new().push_raw_ad_type(AdType::Flags as _, &[0x06]);
    assert_eq!(result.err(), Some(PushError::FlagsNotAllowed));
  }

  #[test]
  pub fn test_fills_exactly_to_capacity() {
    let adv = AdvertisementPayloadBuilder::for_scan_response()
      .push_raw_ad_type(AdType::ManufacturerData as _, &[0u8; MAX_AD_LEN - 2])
      .unwrap()
      .build()
      .unwrap();
    assert_eq!(adv.len(), MAX_AD_LEN);
  }

  pub(crate) struct AdRecordIter<'a> {
    cursor: Cursor<&'a [u8]>,
  }

  impl<'a> AdRecordIter<'a> {
    pub fn new(data: &'a [u8]) -> Self {
      Self {
        cursor: Cursor::new(data),
      }
    }
  }

  impl<'a> Iterator for AdRecordIter<'a> {
    type Item = AdRecord;

    fn next(&mut self) -> Option<Self::Item> {
      let length = self.cursor.read_u8().ok()?;
      if length < 1 {
        return None;
      }
      let ad_type = self.cursor.read_u8().ok()?;
      let mut data = vec![0u8; (length - 1).into()];
      self.cursor.read_exact(&mut data).ok()?;

      Some(AdRecord { ad_type, data })
    }
  }

  #[derive(Debug, Clone, PartialEq, Eq)]
  pub(crate) struct AdRecord {
    pub ad_type: u8,
    pub data: Vec<u8>,
  }

  impl AdRecord {
    pub fn new(ad_type: AdType, data: &[u8]) -> Self {
      Self {
        ad_type: ad_type as _,
        data: data.to_vec(),
      }
    }
  }
}
