//! Network-presence signal consumed by the write paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Boolean online/offline observable.
///
/// The core only ever reads this before attempting an immediate
/// single-record push; detecting network presence is the host's job.
pub trait ConnectivityProbe: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Shared flag implementation for hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct SharedConnectivity {
    online: Arc<AtomicBool>,
}

impl SharedConnectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }
}

impl ConnectivityProbe for SharedConnectivity {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }
}
