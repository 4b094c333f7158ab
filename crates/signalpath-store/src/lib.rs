//! Persistence abstraction for the SignalPath site.
//!
//! This crate defines the [`LeadStore`] trait, the only door between the
//! site and the hosted data store that owns pilot applications and email
//! preferences. The site never runs its own database; it shapes requests and
//! renders responses.
//!
//! Two implementations are provided:
//!
//! - [`RestStore`]: production backend, talks to the hosted PostgREST surface
//! - [`MemoryStore`]: in-memory, for local development and tests

mod error;
mod memory;
pub mod model;
mod rest;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use model::{
    ConsentEvent, EmailPreference, Frequency, PilotApplication, EMAIL_MARKETING_CONSENT,
    PENDING_STATUS,
};
pub use rest::{RestStore, RestStoreConfig};

/// The hosted tables the site reads and writes.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`);
/// the server holds one as `Arc<dyn LeadStore>`.
#[async_trait::async_trait]
pub trait LeadStore: Send + Sync + 'static {
    /// Insert one pilot application.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if the email was already used.
    async fn insert_pilot_application(&self, application: &PilotApplication)
        -> Result<(), StoreError>;

    /// Look up preferences by (already lower-cased) email.
    ///
    /// Returns `Ok(None)` if no row exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transient`] or [`StoreError::Unknown`] if the
    /// lookup itself fails.
    async fn find_preference_by_email(
        &self,
        email: &str,
    ) -> Result<Option<EmailPreference>, StoreError>;

    /// Look up preferences by opaque preference token.
    ///
    /// # Errors
    ///
    /// Same as [`find_preference_by_email`](LeadStore::find_preference_by_email).
    async fn find_preference_by_token(
        &self,
        token: &str,
    ) -> Result<Option<EmailPreference>, StoreError>;

    /// Create a preference row and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if a row for the email exists.
    async fn insert_preference(
        &self,
        preference: &EmailPreference,
    ) -> Result<EmailPreference, StoreError>;

    /// Overwrite (or create) the row keyed by `preference.email`, stamping
    /// `updated_at`, and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transient`] or [`StoreError::Unknown`] on failure.
    async fn upsert_preference(
        &self,
        preference: &EmailPreference,
    ) -> Result<EmailPreference, StoreError>;

    /// Append one consent event to the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transient`] or [`StoreError::Unknown`] on failure.
    async fn record_consent(&self, event: &ConsentEvent) -> Result<(), StoreError>;
}
