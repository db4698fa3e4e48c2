//! Application-update signal.
//!
//! The background update checker reports "a new version is available" at most
//! once per process lifetime. The shell exposes that as a monotonic boolean:
//! once raised it stays raised until the process is reloaded, which is
//! outside this crate's responsibility.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Monotonic update-available flag.
///
/// Cheap to clone; all clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct UpdateSignal {
    available: Arc<AtomicBool>,
}

impl UpdateSignal {
    /// Creates the signal in the "no update" state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an update has been reported.
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Creates the write-only handle handed to the update checker.
    pub fn notifier(&self) -> UpdateNotifier {
        UpdateNotifier {
            signal: self.clone(),
        }
    }
}

/// Write-only handle for the update-checker collaborator.
///
/// Redundant notifications after the flag is raised are no-ops; there is no
/// operation to lower the flag again.
#[derive(Debug, Clone)]
pub struct UpdateNotifier {
    signal: UpdateSignal,
}

impl UpdateNotifier {
    /// Raises the update-available flag. Idempotent.
    pub fn notify(&self) {
        if !self.signal.available.swap(true, Ordering::SeqCst) {
            tracing::debug!("Application update available");
        }
    }
}
