/// HCI status and disconnect reason codes the host reports through the connection callbacks.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BluetoothError {
  Timeout,
  AuthFailure,
  PinOrKeyMissing,
  ClosedByPeer(RemoteShutdownReason),
  ClosedLocally,
  ConnectionLimitExceeded,
  PairingWithUnitKeyNotSupported,
  EncryptionNotAcceptable,
  FailedToEstablish,
  Other(u8),
}

impl From<u8> for BluetoothError {
  fn from(value: u8) -> Self {
    match value {
      0x05 => BluetoothError::AuthFailure,
      0x06 => BluetoothError::PinOrKeyMissing,
      0x08 => BluetoothError::Timeout,
      0x09 => BluetoothError::ConnectionLimitExceeded,
      0x13 => BluetoothError::ClosedByPeer(RemoteShutdownReason::NoneGiven),
      0x14 => BluetoothError::ClosedByPeer(RemoteShutdownReason::LowResources),
      0x15 => BluetoothError::ClosedByPeer(RemoteShutdownReason::PowerOff),
      0x16 => BluetoothError::ClosedLocally,
      0x25 => BluetoothError::EncryptionNotAcceptable,
      0x29 => BluetoothError::PairingWithUnitKeyNotSupported,
      0x3e => BluetoothError::FailedToEstablish,
      o => BluetoothError::Other(o),
    }
  }
}

impl From<BluetoothError> for u8 {
  fn from(value: BluetoothError) -> Self {
    match value {
      BluetoothError::AuthFailure => 0x05,
      BluetoothError::PinOrKeyMissing => 0x06,
      BluetoothError::Timeout => 0x08,
      BluetoothError::ConnectionLimitExceeded => 0x09,
      BluetoothError::ClosedByPeer(r) => match r {
        RemoteShutdownReason::NoneGiven => 0x13,
        RemoteShutdownReason::LowResources => 0x14,
        RemoteShutdownReason::PowerOff => 0x15,
      },
      BluetoothError::ClosedLocally => 0x16,
      BluetoothError::EncryptionNotAcceptable => 0x25,
      BluetoothError::PairingWithUnitKeyNotSupported => 0x29,
      BluetoothError::FailedToEstablish => 0x3e,
      BluetoothError::Other(o) => o,
    }
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RemoteShutdownReason {
  NoneGiven,
  LowResources,
  PowerOff,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_known_codes_map_both_ways() {
    for code in [0x05u8, 0x06, 0x08, 0x09, 0x13, 0x14, 0x15, 0x16, 0x25, 0x29, 0x3e] {
      let err = BluetoothError::from(code);
      assert!(!matches!(err, BluetoothError::Other(_)), "code {code:#x}");
      assert_eq!(u8::from(err), code);
    }
  }

  #[test]
  fn test_unknown_code_is_preserved() {
    assert_eq!(BluetoothError::from(0x3b), BluetoothError::Other(0x3b));
    assert_eq!(u8::from(BluetoothError::Other(0x3b)), 0x3b);
  }
}
