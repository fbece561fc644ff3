use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

/// Cloneable cancellation flag for the advertising loop.  Production firmware never cancels it.
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken {
  cancelled: Arc<AtomicBool>,
}

impl ShutdownToken {
  pub fn new() -> Self {
    Default::default()
  }

  pub fn cancel(&self) {
    self.cancelled.store(true, Ordering::Release);
  }

  pub fn is_cancelled(&self) -> bool {
    self.cancelled.load(Ordering::Acquire)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cancel_is_seen_by_clones() {
    let token = ShutdownToken::new();
    let clone = token.clone();
    assert!(!clone.is_cancelled());

    token.cancel();
    assert!(clone.is_cancelled());
  }
}
