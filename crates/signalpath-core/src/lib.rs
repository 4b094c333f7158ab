//! Core library for the SignalPath site.
//!
//! Contains the page routing table and navigator, the pilot application form
//! controller, the email preference center, and the best-effort consent
//! recorder. This crate depends on `signalpath-store` for the [`LeadStore`]
//! trait and knows nothing about HTTP or markup.
//!
//! [`LeadStore`]: signalpath_store::LeadStore

pub mod consent;
pub mod error;
pub mod navigation;
pub mod pilot;
pub mod preferences;

pub use signalpath_store as store;
