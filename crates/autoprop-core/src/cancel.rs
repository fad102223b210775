//! Cooperative cancellation
//!
//! A `CancelToken` is shared between the caller and the fix-all loops.
//! Loops check it at the top of every iteration and before the final
//! merge; a canceled batch is discarded rather than partially committed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::AutopropError;
use crate::result::Result;

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; observable from all clones of this token
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_canceled() {
            Err(AutopropError::Canceled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(token.check().is_ok());
        clone.cancel();
        assert!(token.is_canceled());
        assert!(matches!(token.check(), Err(AutopropError::Canceled)));
    }
}
