#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UUID {
  /// For use only with SIG defined services (i.e. registered and publicly well known services).
  Short(u16),

  /// All other BLE UUIDs must be 128-bit
  Long(u128),
}

impl UUID {
  /// Build a 128-bit UUID from the little-endian byte order used on the air.
  pub const fn from_le_bytes(bytes: [u8; 16]) -> Self {
    UUID::Long(u128::from_le_bytes(bytes))
  }

  pub fn as_u128(&self) -> u128 {
    match *self {
      UUID::Short(u) => u.into(),
      UUID::Long(u) => u,
    }
  }

  /// Number of bytes this UUID occupies in an AD record or attribute value.
  pub fn encoded_len(&self) -> usize {
    match self {
      UUID::Short(_) => 2,
      UUID::Long(_) => 16,
    }
  }

  /// Append the little-endian encoding of this UUID.  Fails without writing anything if `buf`
  /// lacks the room.
  pub fn push_into<const N: usize>(&self, buf: &mut heapless::Vec<u8, N>) -> Result<(), ()> {
    match *self {
      UUID::Short(u) => buf.extend_from_slice(&u.to_le_bytes()),
      UUID::Long(u) => buf.extend_from_slice(&u.to_le_bytes()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_long_uuid_keeps_air_byte_order() {
    let bytes = [
      0x70, 0x14, 0x1c, 0xbe, 0xdd, 0xe6, 0x5a, 0xb3, 0x8b, 0x49, 0xb4, 0x5d, 0x83, 0x11, 0x60, 0x49,
    ];
    let uuid = UUID::from_le_bytes(bytes);

    let mut buf = heapless::Vec::<u8, 16>::new();
    uuid.push_into(&mut buf).unwrap();
    assert_eq!(&buf[..], &bytes[..]);
    assert_eq!(uuid.encoded_len(), 16);
  }

  #[test]
  fn test_push_into_full_buffer() {
    let mut buf = heapless::Vec::<u8, 1>::new();
    assert!(UUID::Short(0x180a).push_into(&mut buf).is_err());
    assert!(buf.is_empty());
  }
}
