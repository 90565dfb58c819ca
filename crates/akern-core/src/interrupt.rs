use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{AkernError, AkernResult};

/// Cooperative cancellation handle.
///
/// Every long pass polls the flag at the top of its node loop; once
/// triggered, the pass returns [`AkernError::Interrupted`] and its scratch
/// state is dropped, leaving no partial output behind. Handles are cheap to
/// clone and share across threads.
#[derive(Clone, Debug, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub(crate) fn check(&self) -> AkernResult<()> {
        if self.is_triggered() {
            Err(AkernError::Interrupted)
        } else {
            Ok(())
        }
    }
}
