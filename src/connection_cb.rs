use crate::bluetooth_error::BluetoothError;

/// Connection lifecycle notifications delivered by the host stack.  Implementations are called
/// from the host's own execution context, never from the advertising loop, hence `&self`.
pub trait ConnectionCallbacks {
  /// A connection attempt completed.  `Err` carries the HCI status of a failed attempt.
  fn on_connected(&self, result: Result<(), BluetoothError>);

  /// An established connection went away.
  fn on_disconnected(&self, reason: BluetoothError);
}
