//! Best-effort consent ledger writes.
//!
//! A consent write never blocks or fails the operation that triggered it.
//! Each event is attempted exactly once on a spawned task; failures are
//! logged and counted, then dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use signalpath_store::{ConsentEvent, LeadStore};
use tokio::task::JoinHandle;

/// Capture method for the preference center form.
pub const PREFERENCE_CENTER_METHOD: &str = "preference_center";
/// Capture method for one-click unsubscribe links.
pub const UNSUBSCRIBE_METHOD: &str = "unsubscribe_link";

#[derive(Debug, Default)]
struct Counters {
    attempted: AtomicU64,
    recorded: AtomicU64,
    failed: AtomicU64,
}

/// Snapshot of consent write outcomes since startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsentStats {
    pub attempted: u64,
    pub recorded: u64,
    pub failed: u64,
}

/// Fire-and-forget writer for [`ConsentEvent`]s.
#[derive(Clone)]
pub struct ConsentRecorder {
    store: Arc<dyn LeadStore>,
    counters: Arc<Counters>,
}

impl std::fmt::Debug for ConsentRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsentRecorder")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl ConsentRecorder {
    #[must_use]
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self {
            store,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Start one write attempt and return immediately.
    ///
    /// The handle is only for callers that want to wait (tests, shutdown);
    /// dropping it does not cancel the write.
    pub fn record(&self, event: ConsentEvent) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let counters = Arc::clone(&self.counters);
        counters.attempted.fetch_add(1, Ordering::Relaxed);

        tokio::spawn(async move {
            match store.record_consent(&event).await {
                Ok(()) => {
                    counters.recorded.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(
                        consent_type = %event.consent_type,
                        consent_given = event.consent_given,
                        method = %event.method,
                        "consent recorded"
                    );
                }
                Err(e) => {
                    counters.failed.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(
                        error = %e,
                        consent_type = %event.consent_type,
                        method = %event.method,
                        "consent write failed, dropping event"
                    );
                }
            }
        })
    }

    #[must_use]
    pub fn stats(&self) -> ConsentStats {
        ConsentStats {
            attempted: self.counters.attempted.load(Ordering::Relaxed),
            recorded: self.counters.recorded.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}
