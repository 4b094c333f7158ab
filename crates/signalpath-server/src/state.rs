//! Shared application state for the SignalPath server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use signalpath_core::consent::ConsentRecorder;
use signalpath_core::error::FormError;
use signalpath_core::preferences::PreferenceCenter;
use signalpath_store::LeadStore;

use crate::config::SiteSettings;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// The hosted tables (or the in-memory stand-in).
    pub store: Arc<dyn LeadStore>,
    /// Email preference center.
    pub preferences: PreferenceCenter,
    /// Best-effort consent writer, shared with `preferences`.
    pub consent: ConsentRecorder,
    /// Contact addresses and external URLs.
    pub site: SiteSettings,
    /// Pilot application outcomes since startup.
    pub pilot_outcomes: PilotOutcomes,
}

/// Counters for `/metrics`.
#[derive(Debug, Default)]
pub struct PilotOutcomes {
    pub received: AtomicU64,
    pub rejected: AtomicU64,
    pub duplicate: AtomicU64,
    pub failed: AtomicU64,
}

impl PilotOutcomes {
    /// Count one submission outcome.
    pub fn record(&self, result: &Result<(), FormError>) {
        let counter = match result {
            Ok(()) => &self.received,
            Err(err) if err.is_validation() => &self.rejected,
            Err(FormError::DuplicateEmail(_)) => &self.duplicate,
            Err(_) => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl AppState {
    /// Wire the controllers around one store.
    #[must_use]
    pub fn new(store: Arc<dyn LeadStore>, site: SiteSettings) -> Self {
        let consent = ConsentRecorder::new(Arc::clone(&store));
        let preferences = PreferenceCenter::new(Arc::clone(&store), consent.clone());
        Self {
            store,
            preferences,
            consent,
            site,
            pilot_outcomes: PilotOutcomes::default(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("site", &self.site)
            .finish_non_exhaustive()
    }
}
